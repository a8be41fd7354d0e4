//! Game session repository: the round record and its money invariants.

use std::collections::BTreeSet;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::sessions_sea as sessions_adapter;
use crate::domain::economics::RoundEconomics;
use crate::domain::roster::CardRoster;
use crate::entities::game_sessions;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// A round as the settlement services see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSession {
    pub id: i64,
    pub house_id: i64,
    pub session_seq: i64,
    pub operator_account_id: i64,
    pub stake_per_player: i64,
    pub player_count: i32,
    pub house_cut_percent: i32,
    pub economics: RoundEconomics,
    pub cards: CardRoster,
    pub locked_cards: BTreeSet<String>,
    pub winning_card_id: Option<String>,
    pub finished: bool,
    pub started_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
    pub lock_version: i32,
}

impl GameSession {
    /// Stake, player and money invariants of a committed round.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let expected_total = self.stake_per_player * i64::from(self.player_count);
        if self.economics.total_stake != expected_total {
            return Err(DomainError::invariant(format!(
                "session {}: total stake {} != {} x {}",
                self.session_seq, self.economics.total_stake, self.stake_per_player, self.player_count
            )));
        }
        if !self.economics.is_balanced() {
            return Err(DomainError::invariant(format!(
                "session {}: prize {} + earnings {} + bonus {} does not make stake {}",
                self.session_seq,
                self.economics.prize,
                self.economics.house_earnings,
                self.economics.bonus_deduction,
                self.economics.total_stake
            )));
        }
        if self.cards.len() != self.player_count as usize {
            return Err(DomainError::invariant(format!(
                "session {}: {} cards registered for {} players",
                self.session_seq,
                self.cards.len(),
                self.player_count
            )));
        }
        Ok(())
    }

    pub fn is_locked(&self, card_id: &str) -> bool {
        self.locked_cards.contains(card_id)
    }
}

impl TryFrom<game_sessions::Model> for GameSession {
    type Error = DomainError;

    fn try_from(m: game_sessions::Model) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, e: serde_json::Error| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("session {} {what}: {e}", m.id),
            )
        };
        let cards: CardRoster =
            serde_json::from_str(&m.card_ids).map_err(|e| corrupt("card_ids", e))?;
        let locked_cards: BTreeSet<String> =
            serde_json::from_str(&m.locked_card_ids).map_err(|e| corrupt("locked_card_ids", e))?;

        Ok(Self {
            id: m.id,
            house_id: m.house_id,
            session_seq: m.session_seq,
            operator_account_id: m.operator_account_id,
            stake_per_player: m.stake_per_player,
            player_count: m.player_count,
            house_cut_percent: m.house_cut_percent,
            economics: RoundEconomics {
                total_stake: m.total_stake,
                house_earnings: m.house_earnings,
                prize: m.prize,
                bonus_deduction: m.bonus_deduction,
            },
            cards,
            locked_cards,
            winning_card_id: m.winning_card_id,
            finished: m.finished,
            started_at: m.started_at,
            finished_at: m.finished_at,
            lock_version: m.lock_version,
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value)
        .map_err(|e| DomainError::infra(InfraErrorKind::Other("Json".into()), e.to_string()))
}

fn player_count(roster: &CardRoster) -> Result<i32, DomainError> {
    i32::try_from(roster.len())
        .map_err(|_| DomainError::invariant(format!("{} players overflow", roster.len())))
}

pub async fn find_by_house_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    session_seq: i64,
) -> Result<Option<GameSession>, DomainError> {
    sessions_adapter::find_by_house_seq(conn, house_id, session_seq)
        .await?
        .map(GameSession::try_from)
        .transpose()
}

pub async fn require_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    session_seq: i64,
) -> Result<GameSession, DomainError> {
    find_by_house_seq(conn, house_id, session_seq)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Session,
                format!("session {session_seq} in house {house_id}"),
            )
        })
}

/// Field values for a round about to be inserted.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub house_id: i64,
    pub session_seq: i64,
    pub operator_account_id: i64,
    pub stake_per_player: i64,
    pub house_cut_percent: i32,
    pub economics: RoundEconomics,
    pub cards: CardRoster,
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewSession,
) -> Result<GameSession, DomainError> {
    let dto = sessions_adapter::SessionCreate {
        house_id: new.house_id,
        session_seq: new.session_seq,
        operator_account_id: new.operator_account_id,
        stake_per_player: new.stake_per_player,
        player_count: player_count(&new.cards)?,
        total_stake: new.economics.total_stake,
        house_cut_percent: new.house_cut_percent,
        prize: new.economics.prize,
        house_earnings: new.economics.house_earnings,
        bonus_deduction: new.economics.bonus_deduction,
        card_ids: to_json(&new.cards)?,
    };
    GameSession::try_from(sessions_adapter::create_session(conn, dto).await?)
}

/// Persist a new roster and its economics, guarded by `session.lock_version`.
pub async fn update_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session: &GameSession,
    cards: &CardRoster,
    economics: RoundEconomics,
) -> Result<GameSession, DomainError> {
    let dto = sessions_adapter::SessionRosterUpdate {
        id: session.id,
        expected_version: session.lock_version,
        player_count: player_count(cards)?,
        total_stake: economics.total_stake,
        prize: economics.prize,
        house_earnings: economics.house_earnings,
        bonus_deduction: economics.bonus_deduction,
        card_ids: to_json(cards)?,
    };
    GameSession::try_from(sessions_adapter::update_roster(conn, dto).await?)
}

pub async fn lock_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session: &GameSession,
    card_id: &str,
) -> Result<GameSession, DomainError> {
    let mut locked = session.locked_cards.clone();
    if !locked.insert(card_id.to_string()) {
        return Ok(session.clone());
    }
    let model = sessions_adapter::update_locked_cards(
        conn,
        session.id,
        session.lock_version,
        to_json(&locked)?,
    )
    .await?;
    GameSession::try_from(model)
}

/// The single authoritative "declare winner" write of a round.
pub async fn declare_winner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session: &GameSession,
    card_id: &str,
) -> Result<GameSession, DomainError> {
    if sessions_adapter::mark_finished(conn, session.id, card_id).await? == 0 {
        return Err(DomainError::conflict(
            ConflictKind::RoundFinished,
            format!("session {} already has a winner", session.session_seq),
        ));
    }
    require_session(conn, session.house_id, session.session_seq).await
}
