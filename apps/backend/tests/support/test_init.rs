/// Test initialization that sets the transaction policy to rollback on success.
///
/// Runs once per integration test binary that includes this file; binaries
/// without it keep the default commit behavior.
#[ctor::ctor]
fn init_test_txn_policy() {
    bingo_backend::db::txn_policy::set_txn_policy(
        bingo_backend::db::txn_policy::TxnPolicy::RollbackOnOk,
    );
}
