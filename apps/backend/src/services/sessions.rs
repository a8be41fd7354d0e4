//! Game Session Manager: round creation, incremental roster updates and the
//! balance movements they imply.

use sea_orm::DatabaseTransaction;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::settlement::SettlementConfig;
use crate::domain::economics::{validate_percent, RoundEconomics};
use crate::domain::roster::CardRoster;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::accounts::{self, Account};
use crate::repos::houses::{self, House};
use crate::repos::sessions::{self, GameSession, NewSession};
use crate::services::bonus_pool::BonusPoolService;

/// Create a round, or update the roster of an unfinished one when
/// `existing_session_seq` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub house_id: i64,
    pub operator_id: i64,
    pub stake_per_player: i64,
    pub card_ids: Vec<String>,
    pub cut_percent: i32,
    pub existing_session_seq: Option<i64>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_or_update(
        &self,
        txn: &DatabaseTransaction,
        cfg: &SettlementConfig,
        req: SessionRequest,
    ) -> Result<GameSession, DomainError> {
        validate_percent("cut", req.cut_percent)?;
        let roster = CardRoster::new(req.card_ids.iter().map(String::as_str))?;

        let house = houses::lock_house(txn, req.house_id).await?;
        if !house.is_staff(req.operator_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Operator,
                format!("account {} does not operate house {}", req.operator_id, house.id),
            ));
        }

        match req.existing_session_seq {
            None => self.create(txn, cfg, &house, &req, roster).await,
            Some(seq) => self.update(txn, cfg, &house, &req, seq, roster).await,
        }
    }

    async fn create(
        &self,
        txn: &DatabaseTransaction,
        cfg: &SettlementConfig,
        house: &House,
        req: &SessionRequest,
        roster: CardRoster,
    ) -> Result<GameSession, DomainError> {
        let skim = if house.dynamic_bonus_enabled {
            cfg.creation_skim_percent
        } else {
            0
        };
        let economics = RoundEconomics::compute(
            req.stake_per_player,
            roster.len() as i64,
            req.cut_percent,
            skim,
        )?;
        debug!(house_id = house.id, ?economics, "round economics computed");

        let operator = accounts::debit(txn, house.operator_account_id, economics.house_earnings).await?;
        mirror_cashier(txn, house, &operator).await?;

        let session_seq = houses::next_session_seq(txn, house.id).await?;
        let session = sessions::create_session(
            txn,
            NewSession {
                house_id: house.id,
                session_seq,
                operator_account_id: req.operator_id,
                stake_per_player: req.stake_per_player,
                house_cut_percent: req.cut_percent,
                economics,
                cards: roster,
            },
        )
        .await?;
        session.check_invariants()?;

        if economics.bonus_deduction > 0 {
            BonusPoolService::new()
                .accumulate(txn, house.id, economics.bonus_deduction)
                .await?;
        }

        info!(
            house_id = house.id,
            session_seq,
            players = session.player_count,
            total_stake = economics.total_stake,
            house_earnings = economics.house_earnings,
            prize = economics.prize,
            bonus_deduction = economics.bonus_deduction,
            balance = operator.balance,
            "session created"
        );
        Ok(session)
    }

    async fn update(
        &self,
        txn: &DatabaseTransaction,
        cfg: &SettlementConfig,
        house: &House,
        req: &SessionRequest,
        session_seq: i64,
        roster: CardRoster,
    ) -> Result<GameSession, DomainError> {
        let session = sessions::require_session(txn, house.id, session_seq).await?;
        if session.finished {
            return Err(DomainError::not_found(
                NotFoundKind::Session,
                format!("session {session_seq} is finished"),
            ));
        }
        if session.stake_per_player != req.stake_per_player
            || session.house_cut_percent != req.cut_percent
        {
            return Err(DomainError::validation(
                ValidationKind::StakeMismatch,
                format!(
                    "session {session_seq} runs at stake {} and cut {}%",
                    session.stake_per_player, session.house_cut_percent
                ),
            ));
        }

        let delta = session.cards.delta_to(&roster);
        let skim = if house.dynamic_bonus_enabled {
            cfg.adjustment_skim_percent
        } else {
            0
        };
        let step = RoundEconomics::compute(
            session.stake_per_player,
            delta.player_delta.abs(),
            session.house_cut_percent,
            skim,
        )?;
        let economics = match delta.player_delta.signum() {
            1 => session.economics.plus(step),
            -1 => session.economics.minus(step),
            _ => session.economics,
        };

        let candidate = GameSession {
            player_count: i32::try_from(roster.len()).map_err(|_| {
                DomainError::invariant(format!("{} players overflow", roster.len()))
            })?,
            economics,
            cards: roster.clone(),
            ..session.clone()
        };
        candidate.check_invariants()?;

        debug!(
            house_id = house.id,
            session_seq,
            player_delta = delta.player_delta,
            added = ?delta.added,
            removed = ?delta.removed,
            ?step,
            "roster delta"
        );

        match delta.player_delta.signum() {
            1 => {
                let operator =
                    accounts::debit(txn, house.operator_account_id, step.house_earnings).await?;
                mirror_cashier(txn, house, &operator).await?;
                if step.bonus_deduction > 0 {
                    BonusPoolService::new()
                        .accumulate(txn, house.id, step.bonus_deduction)
                        .await?;
                }
            }
            // Refund mirrors the charge: the removed players' house earnings.
            -1 => {
                let operator =
                    accounts::credit(txn, house.operator_account_id, step.house_earnings).await?;
                mirror_cashier(txn, house, &operator).await?;
                if step.bonus_deduction > 0 {
                    BonusPoolService::new()
                        .accumulate(txn, house.id, -step.bonus_deduction)
                        .await?;
                }
            }
            _ => {}
        }

        let updated = sessions::update_roster(txn, &session, &roster, economics).await?;
        info!(
            house_id = house.id,
            session_seq,
            player_delta = delta.player_delta,
            players = updated.player_count,
            prize = updated.economics.prize,
            house_earnings = updated.economics.house_earnings,
            "session updated"
        );
        Ok(updated)
    }

    /// Put a registered card on the round's lock-list (cashier kick).
    pub async fn lock_card(
        &self,
        txn: &DatabaseTransaction,
        house_id: i64,
        session_seq: i64,
        card_id: &str,
    ) -> Result<GameSession, DomainError> {
        houses::lock_house(txn, house_id).await?;
        let session = sessions::require_session(txn, house_id, session_seq).await?;
        let card_id = card_id.trim();
        if session.finished {
            return Err(DomainError::conflict(
                ConflictKind::RoundFinished,
                format!("session {session_seq} is finished"),
            ));
        }
        if !session.cards.contains(card_id) {
            return Err(DomainError::not_registered(format!(
                "card {card_id} is not registered for session {session_seq}"
            )));
        }
        let updated = sessions::lock_card(txn, &session, card_id).await?;
        info!(house_id, session_seq, card_id, "card locked");
        Ok(updated)
    }
}

/// Cashiers share the house package: copy the operator balance over.
async fn mirror_cashier(
    txn: &DatabaseTransaction,
    house: &House,
    operator: &Account,
) -> Result<(), DomainError> {
    if let Some(cashier_id) = house.cashier_account_id {
        accounts::mirror_balance(txn, operator, cashier_id).await?;
        debug!(house_id = house.id, cashier_id, balance = operator.balance, "cashier balance mirrored");
    }
    Ok(())
}
