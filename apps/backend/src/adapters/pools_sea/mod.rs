//! SeaORM adapter for bonus pools - generic over ConnectionTrait.
//!
//! Every status or amount change is a compare-and-set on the values the
//! caller last read, so a concurrent rotation surfaces as zero rows.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::bonus_pools::{self, PoolStatus};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<bonus_pools::Model>, sea_orm::DbErr> {
    bonus_pools::Entity::find_by_id(id).one(conn).await
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
) -> Result<Option<bonus_pools::Model>, sea_orm::DbErr> {
    bonus_pools::Entity::find()
        .filter(bonus_pools::Column::HouseId.eq(house_id))
        .filter(bonus_pools::Column::Status.eq(PoolStatus::Active))
        .one(conn)
        .await
}

pub async fn create_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    amount: i64,
) -> Result<bonus_pools::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    bonus_pools::ActiveModel {
        id: NotSet,
        house_id: Set(house_id),
        amount: Set(amount),
        status: Set(PoolStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Set the amount of an active pool still holding `expected_amount`.
pub async fn set_amount<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected_amount: i64,
    amount: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = bonus_pools::Entity::update_many()
        .col_expr(bonus_pools::Column::Amount, Expr::val(amount).into())
        .col_expr(bonus_pools::Column::UpdatedAt, Expr::val(now).into())
        .filter(bonus_pools::Column::Id.eq(id))
        .filter(bonus_pools::Column::Status.eq(PoolStatus::Active))
        .filter(bonus_pools::Column::Amount.eq(expected_amount))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Move an active pool to `status`. Returns rows affected; zero means it
/// was rotated by someone else first.
pub async fn close_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    status: PoolStatus,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = bonus_pools::Entity::update_many()
        .col_expr(bonus_pools::Column::Status, Expr::val(status).into())
        .col_expr(bonus_pools::Column::UpdatedAt, Expr::val(now).into())
        .filter(bonus_pools::Column::Id.eq(id))
        .filter(bonus_pools::Column::Status.eq(PoolStatus::Active))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
