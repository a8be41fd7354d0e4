use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "house_id")]
    pub house_id: i64,
    #[sea_orm(column_name = "session_seq")]
    pub session_seq: i64,
    #[sea_orm(column_name = "operator_account_id")]
    pub operator_account_id: i64,
    #[sea_orm(column_name = "stake_per_player")]
    pub stake_per_player: i64,
    #[sea_orm(column_name = "player_count")]
    pub player_count: i32,
    #[sea_orm(column_name = "total_stake")]
    pub total_stake: i64,
    #[sea_orm(column_name = "house_cut_percent")]
    pub house_cut_percent: i32,
    pub prize: i64,
    #[sea_orm(column_name = "house_earnings")]
    pub house_earnings: i64,
    #[sea_orm(column_name = "bonus_deduction")]
    pub bonus_deduction: i64,
    /// JSON array of registered card ids.
    #[sea_orm(column_name = "card_ids", column_type = "Text")]
    pub card_ids: String,
    /// JSON array of card ids barred from claiming.
    #[sea_orm(column_name = "locked_card_ids", column_type = "Text")]
    pub locked_card_ids: String,
    #[sea_orm(column_name = "winning_card_id")]
    pub winning_card_id: Option<String>,
    pub finished: bool,
    #[sea_orm(column_name = "started_at")]
    pub started_at: OffsetDateTime,
    #[sea_orm(column_name = "finished_at")]
    pub finished_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::houses::Entity",
        from = "Column::HouseId",
        to = "super::houses::Column::Id"
    )]
    House,
}

impl Related<super::houses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::House.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
