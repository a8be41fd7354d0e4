//! Win/Bonus Evaluator: validates a claim, runs the pattern engine, declares
//! the winner once and pays whatever bonus the win qualifies for.

use sea_orm::DatabaseTransaction;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::settlement::SettlementConfig;
use crate::domain::card::CalledNumbers;
use crate::domain::claims::{evaluate_claim, plan_bonus, BonusPlan, ClaimOutcome, WinCondition};
use crate::domain::patterns::PatternName;
use crate::entities::bonus_awards::BonusKind;
use crate::entities::bonus_pools::PoolStatus;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::awards::{self, AwardCreate, BonusAward};
use crate::repos::cards;
use crate::repos::houses::{self, House};
use crate::repos::sessions::{self, GameSession};
use crate::services::bonus_pool::BonusPoolService;

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRequest {
    pub house_id: i64,
    pub session_seq: i64,
    pub card_id: String,
    pub condition: WinCondition,
    pub called_numbers: Vec<u8>,
}

/// What the caller learns about a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimResult {
    pub won: bool,
    pub matched_patterns: Vec<PatternName>,
    pub bad_bingo: bool,
    /// Marked cells equal the winning shape (bonus eligible).
    pub exact: bool,
    pub bonus: Option<BonusAward>,
    /// True when the round was already won by this card and nothing was written.
    pub replayed: bool,
    /// True when a losing claim put the card on the lock-list.
    pub card_locked: bool,
}

impl ClaimResult {
    fn from_outcome(outcome: &ClaimOutcome) -> Self {
        Self {
            won: outcome.won,
            matched_patterns: outcome.matched_patterns(),
            bad_bingo: outcome.bad_bingo,
            exact: outcome.exact,
            bonus: None,
            replayed: false,
            card_locked: false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WinCheckService;

impl WinCheckService {
    pub fn new() -> Self {
        Self
    }

    pub async fn check_winner(
        &self,
        txn: &DatabaseTransaction,
        cfg: &SettlementConfig,
        req: ClaimRequest,
    ) -> Result<ClaimResult, DomainError> {
        let house = houses::lock_house(txn, req.house_id).await?;
        let session = sessions::require_session(txn, house.id, req.session_seq).await?;
        let card_id = req.card_id.trim();

        if session.is_locked(card_id) {
            return Err(DomainError::locked(format!(
                "card {card_id} is locked for session {}",
                session.session_seq
            )));
        }
        if !session.cards.contains(card_id) {
            return Err(DomainError::not_registered(format!(
                "card {card_id} is not registered for session {}",
                session.session_seq
            )));
        }
        let called = CalledNumbers::new(&req.called_numbers)?;

        if session.finished {
            return self.replay(txn, cfg, &house, &session, card_id, &req.condition, &called).await;
        }

        let card = cards::require_card(txn, house.id, card_id).await?;
        let bad_bingo_calls = house.bad_bingo_enabled.then_some(cfg.bad_bingo_calls);
        let outcome = evaluate_claim(&card, &called, &req.condition, bad_bingo_calls);
        let mut result = ClaimResult::from_outcome(&outcome);

        if !outcome.won {
            warn!(
                house_id = house.id,
                session_seq = session.session_seq,
                card_id,
                calls = called.len(),
                "claim rejected: no winning pattern"
            );
            if cfg.lock_false_claims {
                sessions::lock_card(txn, &session, card_id).await?;
                result.card_locked = true;
            }
            return Ok(result);
        }

        sessions::declare_winner(txn, &session, card_id).await?;
        info!(
            house_id = house.id,
            session_seq = session.session_seq,
            card_id,
            calls = called.len(),
            patterns = ?result.matched_patterns,
            exact = outcome.exact,
            bad_bingo = outcome.bad_bingo,
            "winner declared"
        );

        let plan = plan_bonus(
            &outcome,
            called.len(),
            house.dynamic_bonus_enabled,
            cfg.dynamic_trigger_calls,
            &cfg.fixed_tiers,
        );
        result.bonus = self
            .pay_bonus(txn, &house, &session, card_id, called.len(), plan)
            .await?;
        Ok(result)
    }

    /// Re-evaluate for the card that already won; writes nothing.
    #[allow(clippy::too_many_arguments)]
    async fn replay(
        &self,
        txn: &DatabaseTransaction,
        cfg: &SettlementConfig,
        house: &House,
        session: &GameSession,
        card_id: &str,
        condition: &WinCondition,
        called: &CalledNumbers,
    ) -> Result<ClaimResult, DomainError> {
        if session.winning_card_id.as_deref() != Some(card_id) {
            return Err(DomainError::conflict(
                ConflictKind::RoundFinished,
                format!(
                    "session {} was already won by another card",
                    session.session_seq
                ),
            ));
        }
        let card = cards::require_card(txn, house.id, card_id).await?;
        let bad_bingo_calls = house.bad_bingo_enabled.then_some(cfg.bad_bingo_calls);
        let outcome = evaluate_claim(&card, called, condition, bad_bingo_calls);

        let mut result = ClaimResult::from_outcome(&outcome);
        result.won = true;
        result.replayed = true;
        result.bonus = awards::find_by_house_seq(txn, house.id, session.session_seq).await?;
        Ok(result)
    }

    async fn pay_bonus(
        &self,
        txn: &DatabaseTransaction,
        house: &House,
        session: &GameSession,
        card_id: &str,
        calls: usize,
        plan: BonusPlan,
    ) -> Result<Option<BonusAward>, DomainError> {
        if plan == BonusPlan::None {
            return Ok(None);
        }
        if awards::find_by_house_seq(txn, house.id, session.session_seq)
            .await?
            .is_some()
        {
            warn!(
                house_id = house.id,
                session_seq = session.session_seq,
                "round already has a bonus award; skipping automatic payout"
            );
            return Ok(None);
        }

        let pools = BonusPoolService::new();
        let (amount, kind, pool_id) = match plan {
            BonusPlan::None => return Ok(None),
            BonusPlan::Fixed { amount } => (amount, BonusKind::Fixed, None),
            BonusPlan::Pool | BonusPlan::PoolIfGlobalArmed => {
                if pools.find_payable(txn, house.id).await?.is_none() {
                    return Ok(None);
                }
                if plan == BonusPlan::PoolIfGlobalArmed
                    && !houses::consume_global_bonus(txn, house.id).await?
                {
                    return Ok(None);
                }
                let rotation = pools.rotate(txn, house.id, PoolStatus::Taken).await?;
                (rotation.closed.amount, BonusKind::Dynamic, Some(rotation.closed.id))
            }
        };

        let award = awards::create_award(
            txn,
            AwardCreate {
                house_id: house.id,
                session_seq: session.session_seq,
                operator_account_id: session.operator_account_id,
                card_id: Some(card_id.to_string()),
                amount,
                kind,
                pool_id,
                call_count: i32::try_from(calls).ok(),
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
        Ok(Some(award))
    }
}
