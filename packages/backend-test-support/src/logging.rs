//! Unified test logging initialization

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Default filter when neither variable is set: quiet, except that the
/// settlement services still report warnings (clamped pools, false claims).
const DEFAULT_FILTER: &str = "warn,sqlx=error,sea_orm_migration=error";

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The filter comes from `TEST_LOG`, then
/// `RUST_LOG`, then [`DEFAULT_FILTER`]. Output goes through the test writer
/// so cargo and nextest capture it per test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
