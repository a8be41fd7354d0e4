//! SeaORM adapter for bonus awards.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::bonus_awards::{self, BonusKind};

/// DTO for recording a payout; `(house_id, session_seq)` is unique.
#[derive(Debug, Clone)]
pub struct AwardCreate {
    pub house_id: i64,
    pub session_seq: i64,
    pub operator_account_id: i64,
    pub card_id: Option<String>,
    pub amount: i64,
    pub kind: BonusKind,
    pub pool_id: Option<i64>,
    pub call_count: Option<i32>,
}

pub async fn find_by_house_seq<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    house_id: i64,
    session_seq: i64,
) -> Result<Option<bonus_awards::Model>, sea_orm::DbErr> {
    bonus_awards::Entity::find()
        .filter(bonus_awards::Column::HouseId.eq(house_id))
        .filter(bonus_awards::Column::SessionSeq.eq(session_seq))
        .one(conn)
        .await
}

pub async fn create_award<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AwardCreate,
) -> Result<bonus_awards::Model, sea_orm::DbErr> {
    bonus_awards::ActiveModel {
        id: NotSet,
        house_id: Set(dto.house_id),
        session_seq: Set(dto.session_seq),
        operator_account_id: Set(dto.operator_account_id),
        card_id: Set(dto.card_id),
        amount: Set(dto.amount),
        kind: Set(dto.kind),
        pool_id: Set(dto.pool_id),
        call_count: Set(dto.call_count),
        issued_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}
