//! Tracing subscriber setup for hosts embedding the bridge.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

/// Install a fmt subscriber filtered by `SENSOR_BRIDGE_LOG` (default
/// `info`). Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
