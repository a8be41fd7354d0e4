//! Seeds a house with staff accounts and registered cards on a fresh
//! in-memory database.

use backend_test_support::unique_helpers::unique_str;
use bingo_backend::config::settlement::SettlementConfig;
use bingo_backend::domain::card::Card;
use bingo_backend::domain::claims::WinCondition;
use bingo_backend::domain::fixtures::sample_card_cells;
use bingo_backend::domain::patterns::PatternName;
use bingo_backend::entities::accounts::AccountRole;
use bingo_backend::errors::domain::DomainError;
use bingo_backend::infra::state::build_state;
use bingo_backend::repos::houses::{self, HouseCreate};
use bingo_backend::repos::{accounts, cards};
use bingo_backend::services::{AwardRequest, ClaimRequest, SessionRequest};
use bingo_backend::HallApi;
use sea_orm::DatabaseConnection;

pub struct HallOptions {
    pub operator_balance: i64,
    pub with_cashier: bool,
    pub dynamic_bonus: bool,
    pub bad_bingo: bool,
    pub cards: usize,
    pub settlement: SettlementConfig,
}

impl Default for HallOptions {
    fn default() -> Self {
        Self {
            operator_balance: 1_000,
            with_cashier: true,
            dynamic_bonus: false,
            bad_bingo: false,
            cards: 10,
            settlement: SettlementConfig::default(),
        }
    }
}

impl HallOptions {
    pub fn dynamic() -> Self {
        Self {
            dynamic_bonus: true,
            ..Self::default()
        }
    }
}

pub struct HallSetup {
    pub api: HallApi,
    pub house_id: i64,
    pub operator_id: i64,
    pub cashier_id: Option<i64>,
}

/// Card numbers `C01`, `C02`, ... as registered by [`setup_hall`].
pub fn card_ids(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("C{i:02}")).collect()
}

pub async fn setup_hall(opts: HallOptions) -> Result<HallSetup, Box<dyn std::error::Error>> {
    let state = build_state()
        .with_settlement(opts.settlement)
        .build()
        .await?;
    let db = state.db();

    let operator = accounts::create_account(db, AccountRole::Operator, opts.operator_balance).await?;
    let cashier = if opts.with_cashier {
        Some(accounts::create_account(db, AccountRole::Cashier, opts.operator_balance).await?)
    } else {
        None
    };

    let mut create = HouseCreate::new(unique_str("house"), operator.id)
        .with_dynamic_bonus(opts.dynamic_bonus)
        .with_bad_bingo(opts.bad_bingo);
    if let Some(c) = &cashier {
        create = create.with_cashier(c.id);
    }
    let house = houses::create_house(db, create).await?;

    let card = Card::from_cells(&sample_card_cells())?;
    for card_no in card_ids(opts.cards) {
        cards::create_card(db, house.id, &card_no, &card).await?;
    }

    Ok(HallSetup {
        api: HallApi::new(state),
        house_id: house.id,
        operator_id: operator.id,
        cashier_id: cashier.map(|c| c.id),
    })
}

impl HallSetup {
    pub fn db(&self) -> &DatabaseConnection {
        self.api.state().db()
    }

    pub async fn operator_balance(&self) -> Result<i64, DomainError> {
        Ok(accounts::require_account(self.db(), self.operator_id).await?.balance)
    }

    pub async fn cashier_balance(&self) -> Result<Option<i64>, DomainError> {
        match self.cashier_id {
            Some(id) => Ok(Some(accounts::require_account(self.db(), id).await?.balance)),
            None => Ok(None),
        }
    }

    pub fn new_session(&self, stake: i64, players: usize, cut: i32) -> SessionRequest {
        SessionRequest {
            house_id: self.house_id,
            operator_id: self.operator_id,
            stake_per_player: stake,
            card_ids: card_ids(players),
            cut_percent: cut,
            existing_session_seq: None,
        }
    }

    pub fn update_session(&self, seq: i64, stake: i64, players: usize, cut: i32) -> SessionRequest {
        SessionRequest {
            existing_session_seq: Some(seq),
            ..self.new_session(stake, players, cut)
        }
    }

    pub fn row_claim(&self, seq: i64, card_id: &str, called: Vec<u8>) -> ClaimRequest {
        ClaimRequest {
            house_id: self.house_id,
            session_seq: seq,
            card_id: card_id.to_string(),
            condition: WinCondition::single(PatternName::Row),
            called_numbers: called,
        }
    }

    pub fn award(&self, seq: i64, manual_amount: Option<i64>) -> AwardRequest {
        AwardRequest {
            house_id: self.house_id,
            operator_id: self.operator_id,
            session_seq: seq,
            manual_amount,
        }
    }
}
