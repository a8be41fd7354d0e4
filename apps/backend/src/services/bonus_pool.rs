//! Bonus Pool Coordinator: per-house rotating pool, `active -> taken|inactive`
//! with a fresh `active(0)` created in the same transaction.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::{info, warn};

use crate::entities::bonus_pools::PoolStatus;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::houses;
use crate::repos::pools::{self, BonusPool};

/// Result of closing the active pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolRotation {
    pub closed: BonusPool,
    pub fresh: BonusPool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BonusPoolService;

impl BonusPoolService {
    pub fn new() -> Self {
        Self
    }

    /// Add a signed amount to the active pool, creating it if needed.
    /// Decrements that would go below zero are clamped.
    pub async fn accumulate(
        &self,
        txn: &DatabaseTransaction,
        house_id: i64,
        delta: i64,
    ) -> Result<BonusPool, DomainError> {
        let Some(pool) = pools::find_active(txn, house_id).await? else {
            if delta < 0 {
                warn!(house_id, delta, "no active pool to decrement; starting at zero");
            }
            return pools::create_active(txn, house_id, delta.max(0)).await;
        };

        let target = pool.amount + delta;
        if target < 0 {
            warn!(
                house_id,
                pool_id = pool.id,
                amount = pool.amount,
                delta,
                "pool decrement clamped at zero"
            );
        }
        let updated = pools::set_amount(txn, &pool, target.max(0)).await?;
        info!(house_id, pool_id = updated.id, delta, amount = updated.amount, "bonus pool adjusted");
        Ok(updated)
    }

    /// Active pool holding a positive amount, if any.
    pub async fn find_payable<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        house_id: i64,
    ) -> Result<Option<BonusPool>, DomainError> {
        Ok(pools::find_active(conn, house_id)
            .await?
            .filter(|p| p.amount > 0))
    }

    /// Close the active pool with `status` and open `active(0)`.
    /// `NotFound` unless the active pool holds a positive amount.
    pub async fn rotate(
        &self,
        txn: &DatabaseTransaction,
        house_id: i64,
        status: PoolStatus,
    ) -> Result<PoolRotation, DomainError> {
        let pool = self.find_payable(txn, house_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Pool,
                format!("house {house_id} has no active bonus pool with a positive amount"),
            )
        })?;

        // Close first: the one-active-pool index rejects the new row otherwise.
        let closed = pools::close(txn, &pool, status).await?;
        let fresh = pools::create_active(txn, house_id, 0).await?;
        info!(
            house_id,
            closed_pool_id = closed.id,
            amount = closed.amount,
            status = ?status,
            fresh_pool_id = fresh.id,
            "bonus pool rotated"
        );
        Ok(PoolRotation { closed, fresh })
    }

    /// Cashier forfeits the pool without paying it.
    pub async fn mark_inactive(
        &self,
        txn: &DatabaseTransaction,
        house_id: i64,
    ) -> Result<PoolRotation, DomainError> {
        houses::lock_house(txn, house_id).await?;
        self.rotate(txn, house_id, PoolStatus::Inactive).await
    }

    pub async fn get_active<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        house_id: i64,
    ) -> Result<BonusPool, DomainError> {
        pools::find_active(conn, house_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Pool,
                format!("house {house_id} has no active bonus pool"),
            )
        })
    }

    /// Arm the house's one-shot global bonus. Idempotent.
    pub async fn arm_global_bonus(
        &self,
        txn: &DatabaseTransaction,
        house_id: i64,
    ) -> Result<(), DomainError> {
        houses::lock_house(txn, house_id).await?;
        if houses::arm_global_bonus(txn, house_id).await? {
            info!(house_id, "global bonus armed");
        }
        Ok(())
    }
}
