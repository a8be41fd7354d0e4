use sea_orm::DatabaseConnection;

use crate::config::settlement::SettlementConfig;

/// Shared resources handed to every settlement call
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settlement: SettlementConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, settlement: SettlementConfig) -> Self {
        Self { db, settlement }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn settlement(&self) -> &SettlementConfig {
        &self.settlement
    }
}
