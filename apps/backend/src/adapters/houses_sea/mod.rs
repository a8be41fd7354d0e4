//! SeaORM adapter for houses - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, NotSet,
    QueryFilter, QuerySelect, Set,
};

use crate::entities::houses;

pub mod dto;

pub use dto::HouseCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<houses::Model>, sea_orm::DbErr> {
    houses::Entity::find_by_id(id).one(conn).await
}

/// Read the house row `FOR UPDATE` where the backend supports it, so one
/// house's settlement requests queue behind each other.
pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<houses::Model>, sea_orm::DbErr> {
    let query = houses::Entity::find_by_id(id);
    match conn.get_database_backend() {
        DatabaseBackend::Postgres => query.lock_exclusive().one(conn).await,
        _ => query.one(conn).await,
    }
}

pub async fn create_house<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: HouseCreate,
) -> Result<houses::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    houses::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        operator_account_id: Set(dto.operator_account_id),
        cashier_account_id: Set(dto.cashier_account_id),
        dynamic_bonus_enabled: Set(dto.dynamic_bonus_enabled),
        bad_bingo_enabled: Set(dto.bad_bingo_enabled),
        global_bonus_armed: Set(false),
        next_session_seq: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Bump the per-house counter and return the value it held before.
pub async fn take_next_session_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<i64, sea_orm::DbErr> {
    let result = houses::Entity::update_many()
        .col_expr(
            houses::Column::NextSessionSeq,
            Expr::col(houses::Column::NextSessionSeq).add(1),
        )
        .filter(houses::Column::Id.eq(id))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!("house {id}")));
    }
    let house = find_by_id(conn, id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("house {id}")))?;
    Ok(house.next_session_seq - 1)
}

/// Flip the global bonus flag from `!armed` to `armed`. Returns rows
/// affected; zero means it already had that value (or the house is missing).
pub async fn swap_global_bonus<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    armed: bool,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = houses::Entity::update_many()
        .col_expr(houses::Column::GlobalBonusArmed, Expr::val(armed).into())
        .col_expr(houses::Column::UpdatedAt, Expr::val(now).into())
        .filter(houses::Column::Id.eq(id))
        .filter(houses::Column::GlobalBonusArmed.eq(!armed))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
