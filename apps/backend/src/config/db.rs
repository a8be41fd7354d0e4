use std::env;

use crate::error::AppError;

/// Where the settlement database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// Postgres built from `POSTGRES_*`, `HALL_DB` and `APP_DB_*`
    Prod,
    /// Private SQLite in-memory database; one connection so every
    /// transaction sees the same schema
    InMemory,
    /// SQLite file; `None` reads `HALL_SQLITE_FILE`
    SqliteFile { file: Option<String> },
}

impl DbProfile {
    pub fn is_sqlite(&self) -> bool {
        !matches!(self, DbProfile::Prod)
    }
}

/// Builds a database URL from environment variables for the given profile
pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => {
            let host = host();
            let port = port();
            let db_name = must_var("HALL_DB")?;
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile { file } => {
            let file = match file {
                Some(f) => f.clone(),
                None => must_var("HALL_SQLITE_FILE")?,
            };
            Ok(format!("sqlite://{file}?mode=rwc"))
        }
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
