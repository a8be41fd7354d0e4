//! Game session manager: creation, incremental roster updates and balances.

use bingo_backend::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use bingo_backend::repos::{pools, sessions};
use bingo_backend::services::SessionRequest;

use crate::support::hall_setup::{card_ids, setup_hall, HallOptions};

#[tokio::test]
async fn create_charges_house_earnings_only() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;

    let session = hall
        .api
        .create_or_update_session(hall.new_session(10, 5, 20))
        .await?;

    assert_eq!(session.session_seq, 1);
    assert_eq!(session.player_count, 5);
    assert_eq!(session.economics.total_stake, 50);
    assert_eq!(session.economics.house_earnings, 10);
    assert_eq!(session.economics.prize, 40);
    assert_eq!(session.economics.bonus_deduction, 0);
    assert_eq!(session.lock_version, 1);
    assert!(!session.finished);

    assert_eq!(hall.operator_balance().await?, 990);
    Ok(())
}

#[tokio::test]
async fn session_numbers_increase_per_house() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let first = hall.api.create_or_update_session(hall.new_session(10, 2, 10)).await?;
    let second = hall.api.create_or_update_session(hall.new_session(10, 2, 10)).await?;
    assert_eq!(first.session_seq, 1);
    assert_eq!(second.session_seq, 2);
    Ok(())
}

#[tokio::test]
async fn growing_roster_charges_only_the_new_players() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created = hall.api.create_or_update_session(hall.new_session(10, 5, 20)).await?;
    assert_eq!(hall.operator_balance().await?, 990);

    let updated = hall
        .api
        .create_or_update_session(hall.update_session(created.session_seq, 10, 8, 20))
        .await?;

    // Three extra players at 20% of 10 each.
    assert_eq!(hall.operator_balance().await?, 984);
    assert_eq!(updated.player_count, 8);
    assert_eq!(updated.economics.total_stake, 80);
    assert_eq!(updated.economics.house_earnings, 16);
    assert_eq!(updated.economics.prize, 64);
    assert_eq!(updated.lock_version, created.lock_version + 1);
    Ok(())
}

#[tokio::test]
async fn shrinking_roster_refunds_house_earnings() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created = hall.api.create_or_update_session(hall.new_session(10, 8, 20)).await?;
    assert_eq!(hall.operator_balance().await?, 984);

    let updated = hall
        .api
        .create_or_update_session(hall.update_session(created.session_seq, 10, 6, 20))
        .await?;

    assert_eq!(hall.operator_balance().await?, 988);
    assert_eq!(updated.economics.total_stake, 60);
    assert_eq!(updated.economics.house_earnings, 12);
    assert_eq!(updated.economics.prize, 48);
    Ok(())
}

#[tokio::test]
async fn same_roster_update_moves_no_money() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created = hall.api.create_or_update_session(hall.new_session(10, 4, 20)).await?;
    let before = hall.operator_balance().await?;

    let updated = hall
        .api
        .create_or_update_session(hall.update_session(created.session_seq, 10, 4, 20))
        .await?;

    assert_eq!(hall.operator_balance().await?, before);
    assert_eq!(updated.economics, created.economics);
    Ok(())
}

#[tokio::test]
async fn insufficient_balance_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions {
        operator_balance: 5,
        ..HallOptions::default()
    })
    .await?;

    let err = hall
        .api
        .create_or_update_session(hall.new_session(10, 5, 20))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::InsufficientBalance(_)));
    assert_eq!(hall.operator_balance().await?, 5);
    assert!(sessions::find_by_house_seq(hall.db(), hall.house_id, 1).await?.is_none());

    // The rolled-back attempt did not burn a session number.
    let ok = hall.api.create_or_update_session(hall.new_session(10, 2, 20)).await?;
    assert_eq!(ok.session_seq, 1);
    assert_eq!(hall.operator_balance().await?, 1);
    Ok(())
}

#[tokio::test]
async fn cashier_balance_mirrors_operator() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created = hall.api.create_or_update_session(hall.new_session(10, 5, 20)).await?;
    assert_eq!(hall.cashier_balance().await?, Some(990));

    hall.api
        .create_or_update_session(hall.update_session(created.session_seq, 10, 3, 20))
        .await?;
    assert_eq!(hall.operator_balance().await?, 994);
    assert_eq!(hall.cashier_balance().await?, Some(994));
    Ok(())
}

#[tokio::test]
async fn cashier_may_open_rounds() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let cashier_id = hall.cashier_id.expect("cashier seeded");

    let session = hall
        .api
        .create_or_update_session(SessionRequest {
            operator_id: cashier_id,
            ..hall.new_session(10, 5, 20)
        })
        .await?;

    assert_eq!(session.operator_account_id, cashier_id);
    // The house package pays regardless of who opened the round.
    assert_eq!(hall.operator_balance().await?, 990);
    Ok(())
}

#[tokio::test]
async fn stranger_is_not_an_operator() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let err = hall
        .api
        .create_or_update_session(SessionRequest {
            operator_id: hall.operator_id + 1_000,
            ..hall.new_session(10, 5, 20)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Operator, _)));
    Ok(())
}

#[tokio::test]
async fn unknown_house_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let err = hall
        .api
        .create_or_update_session(SessionRequest {
            house_id: hall.house_id + 1_000,
            ..hall.new_session(10, 5, 20)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::House, _)));
    Ok(())
}

#[tokio::test]
async fn invalid_requests_are_rejected_before_any_write() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;

    let err = hall
        .api
        .create_or_update_session(hall.new_session(10, 5, 101))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::PercentOutOfRange, _)));

    let err = hall
        .api
        .create_or_update_session(hall.new_session(0, 5, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::InvalidStake, _)));

    let mut dupes = card_ids(2);
    dupes.push("C01".to_string());
    let err = hall
        .api
        .create_or_update_session(SessionRequest {
            card_ids: dupes,
            ..hall.new_session(10, 0, 20)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::DuplicateCard, _)));

    assert_eq!(hall.operator_balance().await?, 1_000);
    Ok(())
}

#[tokio::test]
async fn update_with_different_stake_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created = hall.api.create_or_update_session(hall.new_session(10, 5, 20)).await?;

    let err = hall
        .api
        .create_or_update_session(hall.update_session(created.session_seq, 20, 6, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::StakeMismatch, _)));

    let err = hall
        .api
        .create_or_update_session(hall.update_session(created.session_seq, 10, 6, 25))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::StakeMismatch, _)));
    assert_eq!(hall.operator_balance().await?, 990);
    Ok(())
}

#[tokio::test]
async fn finished_round_cannot_be_updated() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created = hall.api.create_or_update_session(hall.new_session(10, 5, 20)).await?;

    let top_row = vec![1, 16, 31, 46, 61];
    let won = hall
        .api
        .check_winner(hall.row_claim(created.session_seq, "C01", top_row))
        .await?;
    assert!(won.won);

    let err = hall
        .api
        .create_or_update_session(hall.update_session(created.session_seq, 10, 8, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
    assert_eq!(hall.operator_balance().await?, 990);
    Ok(())
}

#[tokio::test]
async fn missing_round_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let err = hall
        .api
        .create_or_update_session(hall.update_session(42, 10, 5, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
    Ok(())
}

#[tokio::test]
async fn dynamic_house_skims_prize_into_pool() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::dynamic()).await?;

    let created = hall.api.create_or_update_session(hall.new_session(10, 5, 20)).await?;
    // 5% of the 40 prize.
    assert_eq!(created.economics.bonus_deduction, 2);
    assert_eq!(created.economics.prize, 38);
    assert_eq!(hall.operator_balance().await?, 990);

    let pool = pools::find_active(hall.db(), hall.house_id).await?.expect("pool opened");
    assert_eq!(pool.amount, 2);

    // Adding 100 players skims 1% of their 800 prize.
    let mut grown = card_ids(5);
    grown.extend((0..100).map(|i| format!("X{i:03}")));
    let updated = hall
        .api
        .create_or_update_session(SessionRequest {
            card_ids: grown,
            existing_session_seq: Some(created.session_seq),
            ..hall.new_session(10, 0, 20)
        })
        .await?;
    assert_eq!(updated.player_count, 105);
    assert_eq!(updated.economics.bonus_deduction, 10);
    assert_eq!(hall.api.get_active_pool(hall.house_id).await?.amount, 10);
    assert_eq!(hall.operator_balance().await?, 790);
    Ok(())
}

#[tokio::test]
async fn lock_card_requires_a_registered_card() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created = hall.api.create_or_update_session(hall.new_session(10, 3, 20)).await?;

    let locked = hall
        .api
        .lock_card(hall.house_id, created.session_seq, "C02".to_string())
        .await?;
    assert!(locked.is_locked("C02"));
    assert_eq!(locked.lock_version, created.lock_version + 1);

    // Locking twice is a no-op.
    let again = hall
        .api
        .lock_card(hall.house_id, created.session_seq, "C02".to_string())
        .await?;
    assert_eq!(again.lock_version, locked.lock_version);

    let err = hall
        .api
        .lock_card(hall.house_id, created.session_seq, "C09".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotRegistered(_)));
    Ok(())
}

#[tokio::test]
async fn shrink_that_drives_prize_negative_is_rolled_back() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::dynamic()).await?;
    let created = hall
        .api
        .create_or_update_session(hall.new_session(100, 5, 20))
        .await?;
    // 500 staked, 100 house earnings, 5% of the 400 prize skimmed.
    assert_eq!(hall.operator_balance().await?, 900);
    assert_eq!(hall.api.get_active_pool(hall.house_id).await?.amount, 20);

    let err = hall
        .api
        .create_or_update_session(hall.update_session(created.session_seq, 100, 0, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvariantViolation(_)), "{err:?}");

    assert_eq!(hall.operator_balance().await?, 900);
    assert_eq!(hall.api.get_active_pool(hall.house_id).await?.amount, 20);
    let stored = sessions::require_session(hall.db(), hall.house_id, created.session_seq).await?;
    assert_eq!(stored.player_count, 5);
    assert_eq!(stored.lock_version, created.lock_version);
    Ok(())
}
