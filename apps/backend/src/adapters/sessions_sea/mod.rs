//! SeaORM adapter for game sessions - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::game_sessions;
use crate::infra::db_errors::optimistic_lock_err;

pub mod dto;

pub use dto::{SessionCreate, SessionRosterUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Apply an update guarded by `lock_version`, then refetch.
///
/// Zero rows affected is reported as RecordNotFound when the row is gone
/// and as a structured optimistic-lock payload when the version moved.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i32,
    configure_update: F,
) -> Result<game_sessions::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(
        sea_orm::UpdateMany<game_sessions::Entity>,
    ) -> sea_orm::UpdateMany<game_sessions::Entity>,
{
    let result = configure_update(game_sessions::Entity::update_many())
        .col_expr(
            game_sessions::Column::LockVersion,
            Expr::col(game_sessions::Column::LockVersion).add(1),
        )
        .filter(game_sessions::Column::Id.eq(id))
        .filter(game_sessions::Column::LockVersion.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, id).await? {
            Some(_) => Err(optimistic_lock_err("game_session", id, expected_version)),
            None => Err(sea_orm::DbErr::RecordNotFound(format!("game_session {id}"))),
        };
    }

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("game_session {id}")))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_house_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    session_seq: i64,
) -> Result<Option<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find()
        .filter(game_sessions::Column::HouseId.eq(house_id))
        .filter(game_sessions::Column::SessionSeq.eq(session_seq))
        .one(conn)
        .await
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    game_sessions::ActiveModel {
        id: NotSet,
        house_id: Set(dto.house_id),
        session_seq: Set(dto.session_seq),
        operator_account_id: Set(dto.operator_account_id),
        stake_per_player: Set(dto.stake_per_player),
        player_count: Set(dto.player_count),
        total_stake: Set(dto.total_stake),
        house_cut_percent: Set(dto.house_cut_percent),
        prize: Set(dto.prize),
        house_earnings: Set(dto.house_earnings),
        bonus_deduction: Set(dto.bonus_deduction),
        card_ids: Set(dto.card_ids),
        locked_card_ids: Set("[]".to_string()),
        winning_card_id: Set(None),
        finished: Set(false),
        started_at: Set(time::OffsetDateTime::now_utc()),
        finished_at: Set(None),
        lock_version: Set(1),
    }
    .insert(conn)
    .await
}

/// Rewrite roster and money of an unfinished round.
pub async fn update_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionRosterUpdate,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |update| {
        update
            .col_expr(
                game_sessions::Column::PlayerCount,
                Expr::val(dto.player_count).into(),
            )
            .col_expr(
                game_sessions::Column::TotalStake,
                Expr::val(dto.total_stake).into(),
            )
            .col_expr(game_sessions::Column::Prize, Expr::val(dto.prize).into())
            .col_expr(
                game_sessions::Column::HouseEarnings,
                Expr::val(dto.house_earnings).into(),
            )
            .col_expr(
                game_sessions::Column::BonusDeduction,
                Expr::val(dto.bonus_deduction).into(),
            )
            .col_expr(game_sessions::Column::CardIds, Expr::val(dto.card_ids).into())
            .filter(game_sessions::Column::Finished.eq(false))
    })
    .await
}

pub async fn update_locked_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected_version: i32,
    locked_card_ids: String,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, id, expected_version, |update| {
        update.col_expr(
            game_sessions::Column::LockedCardIds,
            Expr::val(locked_card_ids).into(),
        )
    })
    .await
}

/// Compare-and-set `finished` false -> true. Returns rows affected; zero
/// means another claim already finished the round.
pub async fn mark_finished<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    winning_card_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = game_sessions::Entity::update_many()
        .col_expr(game_sessions::Column::Finished, Expr::val(true).into())
        .col_expr(
            game_sessions::Column::WinningCardId,
            Expr::val(Some(winning_card_id.to_string())).into(),
        )
        .col_expr(game_sessions::Column::FinishedAt, Expr::val(Some(now)).into())
        .col_expr(
            game_sessions::Column::LockVersion,
            Expr::col(game_sessions::Column::LockVersion).add(1),
        )
        .filter(game_sessions::Column::Id.eq(id))
        .filter(game_sessions::Column::Finished.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
