//! Diagnostic output for registry bootstrap and resolution.
//!
//! Registration, rejected candidates and failing predicates are reported
//! through `tracing`. Output goes to stderr so that rendered pages and JSON
//! reports on stdout stay machine-readable.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{Error, Result};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Build the filter: `RUST_LOG` when set, `fallback` otherwise.
pub fn filter(fallback: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails when `fallback` is not a valid filter or a subscriber is
/// already installed.
pub fn init(fallback: &str) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter(fallback)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
