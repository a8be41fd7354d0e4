//! Settlement services. Each method takes the caller's transaction and
//! leaves commit or rollback to `db::txn::with_txn`.

pub mod bonus_awards;
pub mod bonus_pool;
pub mod sessions;
pub mod win_check;

pub use bonus_awards::{AwardRequest, BonusAwardService};
pub use bonus_pool::{BonusPoolService, PoolRotation};
pub use sessions::{SessionRequest, SessionService};
pub use win_check::{ClaimRequest, ClaimResult, WinCheckService};
