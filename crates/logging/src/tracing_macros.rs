//! crates/logging/src/tracing_macros.rs
//! Convenience macros for seqdelta tracing.
//!
//! These macros wrap the standard tracing macros with the workspace targets,
//! so filters configured through [`VerbosityConfig`](crate::VerbosityConfig)
//! apply to them.

/// Emit a diff trace.
///
/// # Example
/// ```ignore
/// trace_diff!("diffed {} tokens", count);
/// ```
#[macro_export]
macro_rules! trace_diff {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "seqdelta::diff", $($arg)*);
    };
}

/// Emit a patch application trace.
///
/// # Example
/// ```ignore
/// trace_patch!("applied {} operations", count);
/// ```
#[macro_export]
macro_rules! trace_patch {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "seqdelta::patch", $($arg)*);
    };
}

/// Emit a codec trace.
///
/// # Example
/// ```ignore
/// trace_codec!("decoded {} operations", count);
/// ```
#[macro_export]
macro_rules! trace_codec {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "seqdelta::codec", $($arg)*);
    };
}

/// Emit a command-line driver trace.
///
/// # Example
/// ```ignore
/// trace_cli!("reading {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_cli {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "seqdelta::cli", $($arg)*);
    };
}
