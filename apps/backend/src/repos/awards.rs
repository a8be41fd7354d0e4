//! Bonus award repository. One row per `(house_id, session_seq)`.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::awards_sea as awards_adapter;
use crate::entities::bonus_awards::{self, BonusKind};
use crate::errors::domain::DomainError;

pub use awards_adapter::AwardCreate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BonusAward {
    pub id: i64,
    pub house_id: i64,
    pub session_seq: i64,
    pub operator_account_id: i64,
    pub card_id: Option<String>,
    pub amount: i64,
    pub kind: BonusKind,
    pub pool_id: Option<i64>,
    pub call_count: Option<i32>,
    pub issued_at: OffsetDateTime,
}

impl From<bonus_awards::Model> for BonusAward {
    fn from(m: bonus_awards::Model) -> Self {
        Self {
            id: m.id,
            house_id: m.house_id,
            session_seq: m.session_seq,
            operator_account_id: m.operator_account_id,
            card_id: m.card_id,
            amount: m.amount,
            kind: m.kind,
            pool_id: m.pool_id,
            call_count: m.call_count,
            issued_at: m.issued_at,
        }
    }
}

pub async fn find_by_house_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    session_seq: i64,
) -> Result<Option<BonusAward>, DomainError> {
    Ok(awards_adapter::find_by_house_seq(conn, house_id, session_seq)
        .await?
        .map(BonusAward::from))
}

/// Insert the award. A second award for the round fails on the unique
/// index and comes back as `Conflict(DuplicateAward)`.
pub async fn create_award<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AwardCreate,
) -> Result<BonusAward, DomainError> {
    Ok(BonusAward::from(awards_adapter::create_award(conn, dto).await?))
}
