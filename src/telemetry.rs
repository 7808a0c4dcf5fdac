//! Tracing subscriber setup for hosts embedding the engine

use tracing_subscriber::EnvFilter;

/// Env var holding the log filter, e.g. `SHADOW_LEDGER_LOG=shadow_ledger=debug`
pub const LOG_ENV: &str = "SHADOW_LEDGER_LOG";

/// Install a fmt subscriber filtered by `SHADOW_LEDGER_LOG`, falling back to
/// `default_level`. Fails if a global subscriber is already set.
pub fn init(default_level: &str) -> crate::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
