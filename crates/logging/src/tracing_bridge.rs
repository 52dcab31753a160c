//! crates/logging/src/tracing_bridge.rs
//! Installs a `tracing` subscriber driven by [`VerbosityConfig`].
//!
//! The subscriber writes human-readable events to stderr so that stdout stays
//! free for patch data. When the `SEQDELTA_LOG` environment variable is set it
//! takes precedence over the verbosity flags, using the usual `EnvFilter`
//! directive syntax.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "seqdelta::diff", "computing diff");
//! ```

use tracing_subscriber::EnvFilter;

use super::config::VerbosityConfig;

/// Environment variable that overrides the verbosity flags.
pub const LOG_ENV: &str = "SEQDELTA_LOG";

/// Builds the event filter for `config`.
///
/// A valid `SEQDELTA_LOG` value wins; an invalid or empty one is ignored.
pub fn build_filter(config: &VerbosityConfig) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(config.filter_directives()))
}

/// Initialize tracing for the process.
///
/// Installs a stderr `fmt` subscriber filtered by [`build_filter`]. Only the
/// first call installs anything; later calls, or a subscriber installed by
/// someone else, leave the existing one in place. Returns `true` when this
/// call installed the subscriber.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .try_init()
        .is_ok()
}
