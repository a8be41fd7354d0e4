//! Stored player cards, decoded into domain [`Card`]s.

use sea_orm::ConnectionTrait;

use crate::adapters::cards_sea as cards_adapter;
use crate::domain::card::Card;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

pub async fn require_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    card_no: &str,
) -> Result<Card, DomainError> {
    let model = cards_adapter::find_by_card_no(conn, house_id, card_no)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Card,
                format!("card {card_no} in house {house_id}"),
            )
        })?;
    let cells: Vec<u8> = serde_json::from_str(&model.numbers).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("card {card_no} numbers are not a JSON array: {e}"),
        )
    })?;
    Card::from_cells(&cells)
}

pub async fn create_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    card_no: &str,
    card: &Card,
) -> Result<(), DomainError> {
    let json = serde_json::to_string(card.cells())
        .map_err(|e| DomainError::infra(InfraErrorKind::Other("Json".into()), e.to_string()))?;
    cards_adapter::create_card(conn, house_id, card_no, json).await?;
    Ok(())
}
