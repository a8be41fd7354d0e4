//! Cashier-initiated bonus awards.

use sea_orm::DatabaseTransaction;
use serde::Deserialize;
use tracing::info;

use crate::entities::bonus_awards::BonusKind;
use crate::entities::bonus_pools::PoolStatus;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::awards::{self, AwardCreate, BonusAward};
use crate::repos::{houses, sessions};
use crate::services::bonus_pool::BonusPoolService;

#[derive(Debug, Clone, Deserialize)]
pub struct AwardRequest {
    pub house_id: i64,
    pub operator_id: i64,
    pub session_seq: i64,
    /// Required when the house does not run the dynamic bonus.
    pub manual_amount: Option<i64>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BonusAwardService;

impl BonusAwardService {
    pub fn new() -> Self {
        Self
    }

    /// Pay the round's single bonus. Dynamic houses pay the whole active
    /// pool; others pay the manual amount.
    ///
    /// The round need not be won yet. Whichever bonus lands first owns the
    /// round: an award made before the win suppresses the winner's automatic
    /// bonus, and `card_id` stays empty.
    pub async fn award_bonus(
        &self,
        txn: &DatabaseTransaction,
        req: AwardRequest,
    ) -> Result<BonusAward, DomainError> {
        let house = houses::lock_house(txn, req.house_id).await?;
        if !house.is_staff(req.operator_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Operator,
                format!("account {} does not operate house {}", req.operator_id, house.id),
            ));
        }
        let session = sessions::require_session(txn, house.id, req.session_seq).await?;

        // The unique index is the real guard; this just gives a clean error.
        if awards::find_by_house_seq(txn, house.id, session.session_seq)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateAward,
                format!("session {} already has a bonus award", session.session_seq),
            ));
        }

        let (amount, kind, pool_id) = if house.dynamic_bonus_enabled {
            let rotation = BonusPoolService::new()
                .rotate(txn, house.id, PoolStatus::Taken)
                .await?;
            (rotation.closed.amount, BonusKind::Dynamic, Some(rotation.closed.id))
        } else {
            let amount = req.manual_amount.filter(|a| *a > 0).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidBonusAmount,
                    "a positive bonus amount is required",
                )
            })?;
            (amount, BonusKind::Manual, None)
        };

        let award = awards::create_award(
            txn,
            AwardCreate {
                house_id: house.id,
                session_seq: session.session_seq,
                operator_account_id: req.operator_id,
                card_id: session.winning_card_id.clone(),
                amount,
                kind,
                pool_id,
                call_count: None,
            },
        )
        .await?;
        info!(
            house_id = house.id,
            session_seq = session.session_seq,
            amount,
            kind = ?kind,
            "bonus awarded"
        );
        Ok(award)
    }
}
