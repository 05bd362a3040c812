//! Harness status logging.
//!
//! Status messages go to stderr through `tracing`. Unit output never does: it
//! is captured per unit and only appears inside the reports.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "DUALLOG_LOG";

const DEFAULT_FILTER: &str = "duallog=info,warn";

/// Installs the stderr subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            if verbose {
                EnvFilter::new("duallog=debug,warn")
            } else {
                EnvFilter::new(DEFAULT_FILTER)
            }
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
