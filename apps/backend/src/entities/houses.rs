use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "houses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_name = "operator_account_id")]
    pub operator_account_id: i64,
    #[sea_orm(column_name = "cashier_account_id")]
    pub cashier_account_id: Option<i64>,
    #[sea_orm(column_name = "dynamic_bonus_enabled")]
    pub dynamic_bonus_enabled: bool,
    #[sea_orm(column_name = "bad_bingo_enabled")]
    pub bad_bingo_enabled: bool,
    #[sea_orm(column_name = "global_bonus_armed")]
    pub global_bonus_armed: bool,
    #[sea_orm(column_name = "next_session_seq")]
    pub next_session_seq: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::OperatorAccountId",
        to = "super::accounts::Column::Id"
    )]
    Operator,
    #[sea_orm(has_many = "super::game_sessions::Entity")]
    GameSessions,
    #[sea_orm(has_many = "super::bonus_pools::Entity")]
    BonusPools,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl Related<super::game_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameSessions.def()
    }
}

impl Related<super::bonus_pools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BonusPools.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
