use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BonusKind {
    /// Amount chosen by the cashier.
    #[sea_orm(string_value = "MANUAL")]
    Manual,
    /// Whole active pool paid out.
    #[sea_orm(string_value = "DYNAMIC")]
    Dynamic,
    /// Call-count tier when the dynamic bonus is off.
    #[sea_orm(string_value = "FIXED")]
    Fixed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bonus_awards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "house_id")]
    pub house_id: i64,
    #[sea_orm(column_name = "session_seq")]
    pub session_seq: i64,
    #[sea_orm(column_name = "operator_account_id")]
    pub operator_account_id: i64,
    #[sea_orm(column_name = "card_id")]
    pub card_id: Option<String>,
    pub amount: i64,
    pub kind: BonusKind,
    #[sea_orm(column_name = "pool_id")]
    pub pool_id: Option<i64>,
    #[sea_orm(column_name = "call_count")]
    pub call_count: Option<i32>,
    #[sea_orm(column_name = "issued_at")]
    pub issued_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::houses::Entity",
        from = "Column::HouseId",
        to = "super::houses::Column::Id"
    )]
    House,
    #[sea_orm(
        belongs_to = "super::bonus_pools::Entity",
        from = "Column::PoolId",
        to = "super::bonus_pools::Column::Id"
    )]
    BonusPool,
}

impl Related<super::houses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::House.def()
    }
}

impl Related<super::bonus_pools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BonusPool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
