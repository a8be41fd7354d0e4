//! Transaction coordinator: every multi-entity write runs inside one
//! `DatabaseTransaction` that either commits as a whole or rolls back.

pub mod txn;
pub mod txn_policy;

pub use txn::{with_txn, TxnFuture};
