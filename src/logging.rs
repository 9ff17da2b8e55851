//! Tracing setup for the binary
//!
//! `RUST_LOG` takes precedence; otherwise `rescuelog=info`, or
//! `rescuelog=debug` when verbose. Output goes to stderr so stdout carries
//! only the report.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("rescuelog=debug")
    } else {
        EnvFilter::new("rescuelog=info")
    }
}

/// Initialise the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact(),
    );

    // Already set by an earlier call
    let _ = tracing::subscriber::set_global_default(subscriber);
}
