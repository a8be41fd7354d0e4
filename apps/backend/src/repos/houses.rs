//! Houses and their settlement flags.

use sea_orm::ConnectionTrait;

use crate::adapters::houses_sea as houses_adapter;
use crate::entities::houses;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use houses_adapter::HouseCreate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    pub id: i64,
    pub name: String,
    pub operator_account_id: i64,
    pub cashier_account_id: Option<i64>,
    pub dynamic_bonus_enabled: bool,
    pub bad_bingo_enabled: bool,
    pub global_bonus_armed: bool,
}

impl House {
    /// Whether `account_id` may act for this house.
    pub fn is_staff(&self, account_id: i64) -> bool {
        self.operator_account_id == account_id || self.cashier_account_id == Some(account_id)
    }
}

impl From<houses::Model> for House {
    fn from(m: houses::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            operator_account_id: m.operator_account_id,
            cashier_account_id: m.cashier_account_id,
            dynamic_bonus_enabled: m.dynamic_bonus_enabled,
            bad_bingo_enabled: m.bad_bingo_enabled,
            global_bonus_armed: m.global_bonus_armed,
        }
    }
}

fn missing(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::House, format!("house {id}"))
}

pub async fn require_house<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<House, DomainError> {
    houses_adapter::find_by_id(conn, id)
        .await?
        .map(House::from)
        .ok_or_else(|| missing(id))
}

/// Load the house and hold its row for the rest of the transaction.
pub async fn lock_house<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<House, DomainError> {
    houses_adapter::find_by_id_for_update(conn, id)
        .await?
        .map(House::from)
        .ok_or_else(|| missing(id))
}

pub async fn create_house<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: HouseCreate,
) -> Result<House, DomainError> {
    Ok(House::from(houses_adapter::create_house(conn, dto).await?))
}

pub async fn next_session_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
) -> Result<i64, DomainError> {
    Ok(houses_adapter::take_next_session_seq(conn, house_id).await?)
}

/// Consume the one-shot global bonus flag. True when this call disarmed it.
pub async fn consume_global_bonus<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
) -> Result<bool, DomainError> {
    Ok(houses_adapter::swap_global_bonus(conn, house_id, false).await? == 1)
}

/// Arm the flag. False when it was already armed.
pub async fn arm_global_bonus<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
) -> Result<bool, DomainError> {
    Ok(houses_adapter::swap_global_bonus(conn, house_id, true).await? == 1)
}
