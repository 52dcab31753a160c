#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` maps the seqdelta verbosity flags onto `tracing` filters. Library
//! crates emit events under fixed targets (`seqdelta::diff`, `seqdelta::sync`,
//! `seqdelta::patch`, `seqdelta::codec`, `seqdelta::cli`); this crate decides
//! which of them reach stderr.
//!
//! # Design
//!
//! - [`VerbosityConfig`] holds one level per [`Subsystem`]. It is built from
//!   the number of `-v` flags and refined with `--debug` tokens such as
//!   `sync3`.
//! - [`VerbosityConfig::filter_directives`] renders the configuration as
//!   `EnvFilter` directives.
//! - With the `tracing` feature, [`init_tracing`] installs a stderr subscriber
//!   once per process and the `trace_*!` macros emit events under the
//!   workspace targets.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_flags("sync3").expect("known flag");
//! assert_eq!(config.levels.get(Subsystem::Sync), 3);
//! assert!(config.filter_directives().contains("seqdelta::sync=trace"));
//! ```

mod config;
mod levels;
#[cfg(feature = "tracing")]
mod tracing_bridge;
#[cfg(feature = "tracing")]
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{Subsystem, SubsystemLevels, level_directive};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{LOG_ENV, build_filter, init_tracing};
