//! Schema migrations for the hall settlement database.
//!
//! The same migrator runs on Postgres and SQLite; backend-specific DDL is
//! kept to plain SQL both engines accept.

pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

mod m20260301_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260301_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run a migration command against an open connection.
/// Shared by the CLI and the backend bootstrap.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = DbDiagnostics::collect(db).await?;
    tracing::info!(
        ?command,
        backend = %before.backend,
        database = %before.name,
        defined = before.defined,
        applied = before.applied,
        "migration starting"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                let after = DbDiagnostics::collect(db).await?;
                tracing::info!(?command, applied = after.applied, "migration finished");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(?command, backend = %before.backend, error = %e, "migration failed");
            Err(e)
        }
    }
}

#[derive(Debug)]
struct DbDiagnostics {
    backend: String,
    name: String,
    applied: usize,
    defined: usize,
}

impl DbDiagnostics {
    async fn collect(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let backend = db.get_database_backend();
        let sql = match backend {
            DatabaseBackend::Postgres => Some("select current_database() as name"),
            DatabaseBackend::Sqlite => {
                Some("SELECT file AS name FROM pragma_database_list WHERE name = 'main'")
            }
            _ => None,
        };

        let name = match sql {
            Some(sql) => match db
                .query_one(Statement::from_string(backend, sql.to_owned()))
                .await?
            {
                Some(row) => match row.try_get::<String>("", "name") {
                    Ok(file) if file.is_empty() => ":memory:".to_string(),
                    Ok(name) => name,
                    Err(_) => "<unknown>".to_string(),
                },
                None => "<unknown>".to_string(),
            },
            None => "<unsupported>".to_string(),
        };

        Ok(Self {
            backend: format!("{backend:?}"),
            name,
            applied: count_applied_migrations(db).await.unwrap_or(0),
            defined: Migrator::migrations().len(),
        })
    }
}

/// Number of applied migrations; 0 when the bookkeeping table is missing.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
