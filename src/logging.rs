//! Diagnostic logging setup
//!
//! The services log through `tracing`. The binary installs a stderr
//! subscriber filtered by `MEALPLAN_LOG` (same syntax as `RUST_LOG`),
//! defaulting to warnings only so normal output stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "MEALPLAN_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from the environment, or the default
pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber; `verbose` raises the default to debug
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = if verbose && std::env::var_os(LOG_ENV).is_none() {
        EnvFilter::new("mealplan=debug")
    } else {
        filter_from_env()
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
