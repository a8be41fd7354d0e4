//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here so the raw
//! database message is logged but never handed to the caller.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Prefix of the structured payload adapters emit when a `lock_version`
/// compare-and-set touches zero rows.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract the table from SQLite "UNIQUE constraint failed: table.col[, table.col]".
fn extract_sqlite_table(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..].split('.').next().map(str::trim)
}

fn conflict_for_table(table: &str) -> Option<(ConflictKind, &'static str)> {
    match table {
        "bonus_awards" => Some((
            ConflictKind::DuplicateAward,
            "A bonus was already awarded for this round",
        )),
        "bonus_pools" => Some((
            ConflictKind::ActivePoolExists,
            "House already has an active bonus pool",
        )),
        "game_sessions" => Some((
            ConflictKind::SessionSeqTaken,
            "Session sequence already used for this house",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_bonus_awards_house_seq") {
        return conflict_for_table("bonus_awards");
    }
    if error_msg.contains("ux_bonus_pools_one_active") {
        return conflict_for_table("bonus_pools");
    }
    if error_msg.contains("ux_game_sessions_house_seq") {
        return conflict_for_table("game_sessions");
    }
    None
}

#[derive(serde::Deserialize)]
struct LockInfo {
    entity: String,
    id: i64,
    expected: i32,
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                format!("Record not found: {what}"),
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            let payload = &msg[OPTIMISTIC_LOCK_PREFIX.len()..];
            if let Ok(info) = serde_json::from_str::<LockInfo>(payload) {
                warn!(
                    entity = %info.entity,
                    id = info.id,
                    expected = info.expected,
                    "Optimistic lock conflict detected"
                );
                return DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "{} {} was modified concurrently (expected version {}); re-read and retry",
                        info.entity, info.id, info.expected
                    ),
                );
            }
            warn!("Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Row was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");

        if let Some((kind, detail)) = extract_sqlite_table(&error_msg).and_then(conflict_for_table)
        {
            return DomainError::conflict(kind, detail);
        }
        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %error_msg, "Check constraint violation");
        if error_msg.contains("balance") {
            return DomainError::insufficient_balance("Account balance would go negative");
        }
        return DomainError::invariant("Check constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::not_found(
            NotFoundKind::Other("Reference".into()),
            "Referenced record does not exist",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

/// Build the structured payload `map_db_err` turns into `Conflict(OptimisticLock)`.
pub fn optimistic_lock_err(entity: &str, id: i64, expected: i32) -> sea_orm::DbErr {
    let payload = serde_json::json!({ "entity": entity, "id": id, "expected": expected });
    sea_orm::DbErr::Custom(format!("{OPTIMISTIC_LOCK_PREFIX}{payload}"))
}
