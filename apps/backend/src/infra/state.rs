use crate::config::db::DbProfile;
use crate::config::settlement::SettlementConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and binaries)
pub struct StateBuilder {
    settlement: Option<SettlementConfig>,
    db_profile: DbProfile,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            settlement: None,
            db_profile: DbProfile::InMemory,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_settlement(mut self, settlement: SettlementConfig) -> Self {
        self.settlement = Some(settlement);
        self
    }

    /// Connect, migrate and resolve settlement config (explicit or from env).
    pub async fn build(self) -> Result<AppState, AppError> {
        let settlement = match self.settlement {
            Some(cfg) => {
                cfg.validate()?;
                cfg
            }
            None => SettlementConfig::from_env()?,
        };
        let conn = bootstrap_db(&self.db_profile).await?;
        Ok(AppState::new(conn, settlement))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
