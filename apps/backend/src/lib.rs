#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod hall;
pub mod infra;
pub mod repos;
pub mod services;
pub mod state;
pub mod telemetry;


// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use config::settlement::SettlementConfig;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use errors::ErrorCode;
pub use hall::HallApi;
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
