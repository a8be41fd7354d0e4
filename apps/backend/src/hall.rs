//! Caller-facing settlement API. Every call runs in its own transaction:
//! all of its writes commit together or none do.

use crate::db::txn::with_txn;
use crate::errors::domain::DomainError;
use crate::repos::awards::BonusAward;
use crate::repos::pools::BonusPool;
use crate::repos::sessions::GameSession;
use crate::services::{
    AwardRequest, BonusAwardService, BonusPoolService, ClaimRequest, ClaimResult, PoolRotation,
    SessionRequest, SessionService, WinCheckService,
};
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct HallApi {
    state: AppState,
}

impl HallApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn create_or_update_session(
        &self,
        req: SessionRequest,
    ) -> Result<GameSession, DomainError> {
        let cfg = self.state.settlement.clone();
        with_txn(&self.state, move |txn| {
            Box::pin(async move { SessionService::new().create_or_update(txn, &cfg, req).await })
        })
        .await
    }

    pub async fn check_winner(&self, req: ClaimRequest) -> Result<ClaimResult, DomainError> {
        let cfg = self.state.settlement.clone();
        with_txn(&self.state, move |txn| {
            Box::pin(async move { WinCheckService::new().check_winner(txn, &cfg, req).await })
        })
        .await
    }

    pub async fn award_bonus(&self, req: AwardRequest) -> Result<BonusAward, DomainError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move { BonusAwardService::new().award_bonus(txn, req).await })
        })
        .await
    }

    /// Forfeit the active pool; returns the closed pool and its `active(0)` successor.
    pub async fn mark_pool_inactive(&self, house_id: i64) -> Result<PoolRotation, DomainError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move { BonusPoolService::new().mark_inactive(txn, house_id).await })
        })
        .await
    }

    pub async fn get_active_pool(&self, house_id: i64) -> Result<BonusPool, DomainError> {
        BonusPoolService::new()
            .get_active(&self.state.db, house_id)
            .await
    }

    pub async fn lock_card(
        &self,
        house_id: i64,
        session_seq: i64,
        card_id: String,
    ) -> Result<GameSession, DomainError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                SessionService::new()
                    .lock_card(txn, house_id, session_seq, &card_id)
                    .await
            })
        })
        .await
    }

    pub async fn arm_global_bonus(&self, house_id: i64) -> Result<(), DomainError> {
        with_txn(&self.state, move |txn| {
            Box::pin(async move { BonusPoolService::new().arm_global_bonus(txn, house_id).await })
        })
        .await
    }
}
