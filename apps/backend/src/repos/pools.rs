//! Bonus pool repository.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::pools_sea as pools_adapter;
use crate::entities::bonus_pools::{self, PoolStatus};
use crate::errors::domain::{ConflictKind, DomainError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusPool {
    pub id: i64,
    pub house_id: i64,
    pub amount: i64,
    pub status: PoolStatus,
}

impl From<bonus_pools::Model> for BonusPool {
    fn from(m: bonus_pools::Model) -> Self {
        Self {
            id: m.id,
            house_id: m.house_id,
            amount: m.amount,
            status: m.status,
        }
    }
}

fn rotated(pool_id: i64) -> DomainError {
    DomainError::conflict(
        ConflictKind::PoolAlreadyRotated,
        format!("pool {pool_id} is no longer active"),
    )
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
) -> Result<Option<BonusPool>, DomainError> {
    Ok(pools_adapter::find_active(conn, house_id)
        .await?
        .map(BonusPool::from))
}

pub async fn create_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    amount: i64,
) -> Result<BonusPool, DomainError> {
    Ok(BonusPool::from(
        pools_adapter::create_active(conn, house_id, amount).await?,
    ))
}

/// Set the amount of `pool`, which must still be active with the amount it was read with.
pub async fn set_amount<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pool: &BonusPool,
    amount: i64,
) -> Result<BonusPool, DomainError> {
    if pools_adapter::set_amount(conn, pool.id, pool.amount, amount).await? == 0 {
        return Err(rotated(pool.id));
    }
    Ok(BonusPool {
        amount,
        ..pool.clone()
    })
}

/// Close `pool` with `status`; it must still be active.
pub async fn close<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pool: &BonusPool,
    status: PoolStatus,
) -> Result<BonusPool, DomainError> {
    if pools_adapter::close_active(conn, pool.id, status).await? == 0 {
        return Err(rotated(pool.id));
    }
    Ok(BonusPool {
        status,
        ..pool.clone()
    })
}
