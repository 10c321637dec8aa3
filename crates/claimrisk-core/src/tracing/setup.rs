//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "CLAIMRISK_LOG";

/// Directives used when `CLAIMRISK_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "claimrisk=info";

/// Filter from `CLAIMRISK_LOG`, or `DEFAULT_FILTER` when the variable is
/// unset or does not parse.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the claimrisk tracing/logging system.
///
/// Reads `CLAIMRISK_LOG` for per-module log levels, e.g.
/// `CLAIMRISK_LOG=claimrisk_analysis::quality=debug,claimrisk_analysis::scoring=info`.
///
/// Only the first call installs a subscriber; later calls do nothing.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(env_filter())
            .try_init();
    });
}
