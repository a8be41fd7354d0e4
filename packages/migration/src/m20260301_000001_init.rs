use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Role,
    Balance,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Houses {
    Table,
    Id,
    Name,
    OperatorAccountId,
    CashierAccountId,
    DynamicBonusEnabled,
    BadBingoEnabled,
    GlobalBonusArmed,
    NextSessionSeq,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    HouseId,
    CardNo,
    Numbers,
    CreatedAt,
}

#[derive(Iden)]
enum GameSessions {
    Table,
    Id,
    HouseId,
    SessionSeq,
    OperatorAccountId,
    StakePerPlayer,
    PlayerCount,
    TotalStake,
    HouseCutPercent,
    Prize,
    HouseEarnings,
    BonusDeduction,
    CardIds,
    LockedCardIds,
    WinningCardId,
    Finished,
    StartedAt,
    FinishedAt,
    LockVersion,
}

#[derive(Iden)]
enum BonusPools {
    Table,
    Id,
    HouseId,
    Amount,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BonusAwards {
    Table,
    Id,
    HouseId,
    SessionSeq,
    OperatorAccountId,
    CardId,
    Amount,
    Kind,
    PoolId,
    CallCount,
    IssuedAt,
}

/// At most one ACTIVE pool per house. sea-query has no partial index builder.
const ACTIVE_POOL_INDEX: &str = "ux_bonus_pools_one_active";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // accounts
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Accounts::Role).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Accounts::Balance)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Accounts::Balance).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // houses
        manager
            .create_table(
                Table::create()
                    .table(Houses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Houses::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Houses::Name).text().not_null())
                    .col(
                        ColumnDef::new(Houses::OperatorAccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Houses::CashierAccountId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Houses::DynamicBonusEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Houses::BadBingoEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Houses::GlobalBonusArmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Houses::NextSessionSeq)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Houses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Houses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_houses_operator_account_id")
                            .from(Houses::Table, Houses::OperatorAccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_houses_cashier_account_id")
                            .from(Houses::Table, Houses::CashierAccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // cards
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cards::HouseId).big_integer().not_null())
                    .col(ColumnDef::new(Cards::CardNo).string_len(64).not_null())
                    .col(ColumnDef::new(Cards::Numbers).text().not_null())
                    .col(
                        ColumnDef::new(Cards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_house_id")
                            .from(Cards::Table, Cards::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_cards_house_card_no")
                    .table(Cards::Table)
                    .col(Cards::HouseId)
                    .col(Cards::CardNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_sessions
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSessions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GameSessions::HouseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameSessions::SessionSeq)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::OperatorAccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::StakePerPlayer)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameSessions::PlayerCount).integer().not_null())
                    .col(ColumnDef::new(GameSessions::TotalStake).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameSessions::HouseCutPercent)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameSessions::Prize).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameSessions::HouseEarnings)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::BonusDeduction)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::CardIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(GameSessions::LockedCardIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(GameSessions::WinningCardId).text().null())
                    .col(
                        ColumnDef::new(GameSessions::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameSessions::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_sessions_house_id")
                            .from(GameSessions::Table, GameSessions::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_sessions_house_seq")
                    .table(GameSessions::Table)
                    .col(GameSessions::HouseId)
                    .col(GameSessions::SessionSeq)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // bonus_pools
        manager
            .create_table(
                Table::create()
                    .table(BonusPools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BonusPools::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(BonusPools::HouseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BonusPools::Amount)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(BonusPools::Amount).gte(0)),
                    )
                    .col(
                        ColumnDef::new(BonusPools::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(BonusPools::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BonusPools::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bonus_pools_house_id")
                            .from(BonusPools::Table, BonusPools::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_bonus_pools_house_id")
                    .table(BonusPools::Table)
                    .col(BonusPools::HouseId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {ACTIVE_POOL_INDEX} \
                 ON bonus_pools (house_id) WHERE status = 'ACTIVE'"
            ))
            .await?;

        // bonus_awards
        manager
            .create_table(
                Table::create()
                    .table(BonusAwards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BonusAwards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(BonusAwards::HouseId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BonusAwards::SessionSeq)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BonusAwards::OperatorAccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BonusAwards::CardId).text().null())
                    .col(ColumnDef::new(BonusAwards::Amount).big_integer().not_null())
                    .col(ColumnDef::new(BonusAwards::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(BonusAwards::PoolId).big_integer().null())
                    .col(ColumnDef::new(BonusAwards::CallCount).integer().null())
                    .col(
                        ColumnDef::new(BonusAwards::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bonus_awards_house_id")
                            .from(BonusAwards::Table, BonusAwards::HouseId)
                            .to(Houses::Table, Houses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bonus_awards_pool_id")
                            .from(BonusAwards::Table, BonusAwards::PoolId)
                            .to(BonusPools::Table, BonusPools::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_bonus_awards_house_seq")
                    .table(BonusAwards::Table)
                    .col(BonusAwards::HouseId)
                    .col(BonusAwards::SessionSeq)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_bonus_awards_house_seq")
                    .table(BonusAwards::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(BonusAwards::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(ACTIVE_POOL_INDEX)
                    .table(BonusPools::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ix_bonus_pools_house_id")
                    .table(BonusPools::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(BonusPools::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_game_sessions_house_seq")
                    .table(GameSessions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(GameSessions::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_cards_house_card_no")
                    .table(Cards::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Houses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}
