//! SeaORM adapter for stored player cards (read mostly).

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::cards;

pub async fn find_by_card_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    card_no: &str,
) -> Result<Option<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find()
        .filter(cards::Column::HouseId.eq(house_id))
        .filter(cards::Column::CardNo.eq(card_no))
        .one(conn)
        .await
}

pub async fn create_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    card_no: &str,
    numbers_json: String,
) -> Result<cards::Model, sea_orm::DbErr> {
    cards::ActiveModel {
        id: NotSet,
        house_id: Set(house_id),
        card_no: Set(card_no.to_string()),
        numbers: Set(numbers_json),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}
