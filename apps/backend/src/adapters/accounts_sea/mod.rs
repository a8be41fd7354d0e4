//! SeaORM adapter for prepaid accounts - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::accounts::{self, AccountRole};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find_by_id(id).one(conn).await
}

pub async fn create_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role: AccountRole,
    balance: i64,
) -> Result<accounts::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    accounts::ActiveModel {
        id: NotSet,
        role: Set(role),
        balance: Set(balance),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Subtract `amount` only if the balance covers it. Returns rows affected;
/// zero means the account is missing or short.
pub async fn debit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    amount: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).sub(amount),
        )
        .col_expr(accounts::Column::UpdatedAt, Expr::val(now).into())
        .filter(accounts::Column::Id.eq(id))
        .filter(accounts::Column::Balance.gte(amount))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn credit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    amount: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).add(amount),
        )
        .col_expr(accounts::Column::UpdatedAt, Expr::val(now).into())
        .filter(accounts::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn set_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    balance: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = accounts::Entity::update_many()
        .col_expr(accounts::Column::Balance, Expr::val(balance).into())
        .col_expr(accounts::Column::UpdatedAt, Expr::val(now).into())
        .filter(accounts::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
