//! Win/bonus evaluation against persisted rounds.

use bingo_backend::config::settlement::SettlementConfig;
use bingo_backend::domain::claims::WinCondition;
use bingo_backend::domain::fixtures::{sample_misses, sample_numbers_for};
use bingo_backend::domain::grid::CellSet;
use bingo_backend::domain::patterns::PatternName;
use bingo_backend::entities::bonus_awards::BonusKind;
use bingo_backend::entities::bonus_pools::PoolStatus;
use bingo_backend::errors::domain::{ConflictKind, DomainError, ValidationKind};
use bingo_backend::repos::{awards, houses, sessions};
use bingo_backend::services::ClaimRequest;

use crate::support::hall_setup::{setup_hall, HallOptions, HallSetup};

fn middle_row() -> Vec<u8> {
    sample_numbers_for(CellSet::row(3))
}

fn top_row() -> Vec<u8> {
    sample_numbers_for(CellSet::row(1))
}

async fn open_round(hall: &HallSetup) -> Result<i64, DomainError> {
    Ok(hall
        .api
        .create_or_update_session(hall.new_session(10, 5, 20))
        .await?
        .session_seq)
}

#[tokio::test]
async fn exact_row_at_four_calls_pays_top_fixed_tier() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    let result = hall.api.check_winner(hall.row_claim(seq, "C01", middle_row())).await?;

    assert!(result.won);
    assert!(result.exact);
    assert!(!result.replayed);
    assert_eq!(result.matched_patterns, vec![PatternName::Row]);
    let bonus = result.bonus.expect("fixed bonus");
    assert_eq!(bonus.amount, 1_000);
    assert_eq!(bonus.kind, BonusKind::Fixed);
    assert_eq!(bonus.call_count, Some(4));
    assert_eq!(bonus.card_id.as_deref(), Some("C01"));

    let session = sessions::require_session(hall.db(), hall.house_id, seq).await?;
    assert!(session.finished);
    assert!(session.finished_at.is_some());
    assert_eq!(session.winning_card_id.as_deref(), Some("C01"));

    // Bonuses are recorded, not paid out of the house package.
    assert_eq!(hall.operator_balance().await?, 990);
    Ok(())
}

#[tokio::test]
async fn late_row_wins_without_bonus() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    let mut called = middle_row();
    called.extend([1, 16, 31, 46, 2, 17]);
    let result = hall.api.check_winner(hall.row_claim(seq, "C01", called)).await?;

    assert!(result.won);
    assert!(!result.exact);
    assert!(result.bonus.is_none());
    assert!(awards::find_by_house_seq(hall.db(), hall.house_id, seq).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn locked_card_cannot_claim() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;
    hall.api.lock_card(hall.house_id, seq, "C02".to_string()).await?;

    let err = hall
        .api
        .check_winner(hall.row_claim(seq, "C02", middle_row()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Locked(_)));

    let session = sessions::require_session(hall.db(), hall.house_id, seq).await?;
    assert!(!session.finished);
    Ok(())
}

#[tokio::test]
async fn unregistered_card_cannot_claim() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    let err = hall
        .api
        .check_winner(hall.row_claim(seq, "C09", middle_row()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotRegistered(_)));
    Ok(())
}

#[tokio::test]
async fn malformed_calls_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    let err = hall
        .api
        .check_winner(hall.row_claim(seq, "C01", vec![1, 76]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::CalledNumberOutOfRange, _)
    ));

    let err = hall
        .api
        .check_winner(hall.row_claim(seq, "C01", vec![1, 1]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::DuplicateCalledNumber, _)
    ));
    Ok(())
}

#[tokio::test]
async fn repeated_claim_by_winner_replays_without_writes() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    let first = hall.api.check_winner(hall.row_claim(seq, "C01", middle_row())).await?;
    let before = sessions::require_session(hall.db(), hall.house_id, seq).await?;

    let again = hall.api.check_winner(hall.row_claim(seq, "C01", middle_row())).await?;
    assert!(again.won);
    assert!(again.replayed);
    assert_eq!(again.bonus, first.bonus);

    let after = sessions::require_session(hall.db(), hall.house_id, seq).await?;
    assert_eq!(after.lock_version, before.lock_version);
    assert_eq!(after.finished_at, before.finished_at);
    Ok(())
}

#[tokio::test]
async fn second_card_conflicts_after_round_is_won() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    hall.api.check_winner(hall.row_claim(seq, "C01", middle_row())).await?;
    let err = hall
        .api
        .check_winner(hall.row_claim(seq, "C03", middle_row()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::RoundFinished, _)));

    let session = sessions::require_session(hall.db(), hall.house_id, seq).await?;
    assert_eq!(session.winning_card_id.as_deref(), Some("C01"));
    Ok(())
}

#[tokio::test]
async fn false_claim_locks_the_card() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    let misses: Vec<u8> = sample_misses().into_iter().take(6).collect();
    let result = hall.api.check_winner(hall.row_claim(seq, "C04", misses)).await?;
    assert!(!result.won);
    assert!(result.card_locked);
    assert!(result.bonus.is_none());

    let err = hall
        .api
        .check_winner(hall.row_claim(seq, "C04", middle_row()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Locked(_)));

    // Another card can still win the round.
    let other = hall.api.check_winner(hall.row_claim(seq, "C05", middle_row())).await?;
    assert!(other.won);
    Ok(())
}

#[tokio::test]
async fn false_claim_lock_can_be_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions {
        settlement: SettlementConfig {
            lock_false_claims: false,
            ..SettlementConfig::default()
        },
        ..HallOptions::default()
    })
    .await?;
    let seq = open_round(&hall).await?;

    let result = hall.api.check_winner(hall.row_claim(seq, "C04", vec![1, 2])).await?;
    assert!(!result.won);
    assert!(!result.card_locked);

    let retry = hall.api.check_winner(hall.row_claim(seq, "C04", middle_row())).await?;
    assert!(retry.won);
    Ok(())
}

#[tokio::test]
async fn dynamic_trigger_pays_whole_pool() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::dynamic()).await?;
    let seq = open_round(&hall).await?;
    let pool_before = hall.api.get_active_pool(hall.house_id).await?;
    assert_eq!(pool_before.amount, 2);

    let result = hall.api.check_winner(hall.row_claim(seq, "C01", middle_row())).await?;
    let bonus = result.bonus.expect("pool bonus");
    assert_eq!(bonus.kind, BonusKind::Dynamic);
    assert_eq!(bonus.amount, 2);
    assert_eq!(bonus.pool_id, Some(pool_before.id));

    let fresh = hall.api.get_active_pool(hall.house_id).await?;
    assert_ne!(fresh.id, pool_before.id);
    assert_eq!(fresh.amount, 0);
    assert_eq!(fresh.status, PoolStatus::Active);
    Ok(())
}

#[tokio::test]
async fn off_trigger_win_needs_armed_global_bonus() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::dynamic()).await?;

    let seq = open_round(&hall).await?;
    let unarmed = hall.api.check_winner(hall.row_claim(seq, "C01", top_row())).await?;
    assert!(unarmed.won);
    assert!(unarmed.exact);
    assert!(unarmed.bonus.is_none());
    // Next round's skim lands on the same pool.
    let seq = open_round(&hall).await?;
    assert_eq!(hall.api.get_active_pool(hall.house_id).await?.amount, 4);

    hall.api.arm_global_bonus(hall.house_id).await?;
    let armed = hall.api.check_winner(hall.row_claim(seq, "C01", top_row())).await?;
    let bonus = armed.bonus.expect("global bonus");
    assert_eq!(bonus.kind, BonusKind::Dynamic);
    assert_eq!(bonus.amount, 4);
    assert_eq!(bonus.call_count, Some(5));

    let house = houses::require_house(hall.db(), hall.house_id).await?;
    assert!(!house.global_bonus_armed);
    Ok(())
}

#[tokio::test]
async fn armed_flag_survives_when_pool_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions {
        settlement: SettlementConfig {
            creation_skim_percent: 0,
            ..SettlementConfig::default()
        },
        ..HallOptions::dynamic()
    })
    .await?;
    let seq = open_round(&hall).await?;
    hall.api.arm_global_bonus(hall.house_id).await?;

    let result = hall.api.check_winner(hall.row_claim(seq, "C01", top_row())).await?;
    assert!(result.won);
    assert!(result.bonus.is_none());
    assert!(houses::require_house(hall.db(), hall.house_id).await?.global_bonus_armed);
    Ok(())
}

#[tokio::test]
async fn bad_bingo_wins_without_bonus() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions {
        bad_bingo: true,
        ..HallOptions::default()
    })
    .await?;
    let seq = open_round(&hall).await?;

    let misses: Vec<u8> = sample_misses().into_iter().take(15).collect();
    let result = hall
        .api
        .check_winner(ClaimRequest {
            condition: WinCondition::single(PatternName::Blackout),
            ..hall.row_claim(seq, "C02", misses)
        })
        .await?;

    assert!(result.won);
    assert!(result.bad_bingo);
    assert!(result.matched_patterns.is_empty());
    assert!(result.bonus.is_none());
    Ok(())
}

#[tokio::test]
async fn bad_bingo_is_a_false_claim_when_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let seq = open_round(&hall).await?;

    let misses: Vec<u8> = sample_misses().into_iter().take(15).collect();
    let result = hall
        .api
        .check_winner(ClaimRequest {
            condition: WinCondition::single(PatternName::Blackout),
            ..hall.row_claim(seq, "C02", misses)
        })
        .await?;
    assert!(!result.won);
    assert!(result.card_locked);
    Ok(())
}
