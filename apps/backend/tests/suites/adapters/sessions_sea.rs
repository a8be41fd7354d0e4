use bingo_backend::adapters::sessions_sea::{self, SessionCreate, SessionRosterUpdate};
use bingo_backend::errors::domain::{ConflictKind, DomainError};
use bingo_backend::infra::db_errors::map_db_err;

use crate::support::hall_setup::{setup_hall, HallOptions};

fn insert_dto(house_id: i64, operator_id: i64, seq: i64) -> SessionCreate {
    SessionCreate {
        house_id,
        session_seq: seq,
        operator_account_id: operator_id,
        stake_per_player: 10,
        player_count: 2,
        total_stake: 20,
        house_cut_percent: 10,
        prize: 18,
        house_earnings: 2,
        bonus_deduction: 0,
        card_ids: r#"["C01","C02"]"#.to_string(),
    }
}

#[tokio::test]
async fn roster_update_bumps_lock_version() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created =
        sessions_sea::create_session(hall.db(), insert_dto(hall.house_id, hall.operator_id, 1))
            .await?;
    assert_eq!(created.lock_version, 1);
    assert_eq!(created.locked_card_ids, "[]");

    let updated = sessions_sea::update_roster(
        hall.db(),
        SessionRosterUpdate {
            id: created.id,
            expected_version: 1,
            player_count: 3,
            total_stake: 30,
            prize: 27,
            house_earnings: 3,
            bonus_deduction: 0,
            card_ids: r#"["C01","C02","C03"]"#.to_string(),
        },
    )
    .await?;
    assert_eq!(updated.lock_version, 2);
    assert_eq!(updated.player_count, 3);
    Ok(())
}

#[tokio::test]
async fn stale_version_is_an_optimistic_lock_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created =
        sessions_sea::create_session(hall.db(), insert_dto(hall.house_id, hall.operator_id, 1))
            .await?;
    sessions_sea::update_locked_cards(hall.db(), created.id, 1, r#"["C01"]"#.to_string()).await?;

    let err = sessions_sea::update_locked_cards(hall.db(), created.id, 1, r#"["C02"]"#.to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::OptimisticLock, _)
    ));
    Ok(())
}

#[tokio::test]
async fn duplicate_session_seq_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    sessions_sea::create_session(hall.db(), insert_dto(hall.house_id, hall.operator_id, 1)).await?;

    let err =
        sessions_sea::create_session(hall.db(), insert_dto(hall.house_id, hall.operator_id, 1))
            .await
            .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::SessionSeqTaken, _)
    ));
    Ok(())
}

#[tokio::test]
async fn mark_finished_only_once() -> Result<(), Box<dyn std::error::Error>> {
    let hall = setup_hall(HallOptions::default()).await?;
    let created =
        sessions_sea::create_session(hall.db(), insert_dto(hall.house_id, hall.operator_id, 1))
            .await?;

    assert_eq!(sessions_sea::mark_finished(hall.db(), created.id, "C01").await?, 1);
    assert_eq!(sessions_sea::mark_finished(hall.db(), created.id, "C02").await?, 0);

    let row = sessions_sea::find_by_id(hall.db(), created.id)
        .await?
        .expect("session row");
    assert!(row.finished);
    assert_eq!(row.winning_card_id.as_deref(), Some("C01"));

    // Finished rounds reject roster rewrites even at the current version.
    let err = sessions_sea::update_roster(
        hall.db(),
        SessionRosterUpdate {
            id: created.id,
            expected_version: row.lock_version,
            player_count: 1,
            total_stake: 10,
            prize: 9,
            house_earnings: 1,
            bonus_deduction: 0,
            card_ids: r#"["C01"]"#.to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(map_db_err(err), DomainError::Conflict(ConflictKind::OptimisticLock, _)));
    Ok(())
}
