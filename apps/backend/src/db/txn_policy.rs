use std::sync::OnceLock;

/// What `with_txn` does with a transaction whose closure succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit (default)
    CommitOnOk,
    /// Roll back anyway; lets tests run real writes without keeping them
    RollbackOnOk,
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current process-wide policy; `CommitOnOk` until something sets it.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the policy for the process. Only the first call has any effect;
/// returns whether this call won.
pub fn set_txn_policy(policy: TxnPolicy) -> bool {
    POLICY.set(policy).is_ok()
}
