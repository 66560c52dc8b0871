//! ui
//!
//! User-facing output and log setup.
//!
//! # Modules
//!
//! - [`output`] - Verbosity, stderr messages and run summaries
//!
//! # Logging
//!
//! Logs are written to stderr through `tracing-subscriber`. `FIXNOTES_LOG`
//! takes an `EnvFilter` directive and overrides the verbosity flags.

pub mod output;

pub use output::Verbosity;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "FIXNOTES_LOG";

/// Install the global tracing subscriber.
///
/// A second call is a no-op, so tests and embedders can call it freely.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbosity == Verbosity::Debug)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
