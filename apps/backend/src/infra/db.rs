use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Open a connection pool for the profile. Does NOT run migrations.
pub async fn connect_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10));

    match profile {
        // Every pooled in-memory connection would get its own empty database.
        DbProfile::InMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbProfile::SqliteFile { .. } => {
            opts.max_connections(1);
        }
        DbProfile::Prod => {
            opts.max_connections(16).min_connections(1);
        }
    }

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}
