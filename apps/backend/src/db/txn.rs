use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use super::txn_policy::{self, TxnPolicy};
use crate::errors::domain::DomainError;
use crate::state::app_state::AppState;

/// Boxed future borrowed from the transaction it runs in.
pub type TxnFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, DomainError>> + Send + 'a>>;

/// Execute `f` within a database transaction.
///
/// Commits on `Ok` (or rolls back under [`TxnPolicy::RollbackOnOk`]) and
/// rolls back on `Err`, returning the closure's original error. A
/// transaction dropped mid-flight is rolled back by the driver.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, DomainError>
where
    R: Send,
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxnFuture<'a, R> + Send,
{
    let txn = state.db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                TxnPolicy::CommitOnOk => txn.commit().await?,
                TxnPolicy::RollbackOnOk => {
                    debug!("rolling back successful transaction per policy");
                    txn.rollback().await?
                }
            }
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failure did not complete");
            }
            Err(err)
        }
    }
}
