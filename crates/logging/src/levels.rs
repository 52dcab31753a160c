//! crates/logging/src/levels.rs
//! Subsystem enum and per-subsystem verbosity levels.

use std::fmt;

/// Diagnostic categories, one per tracing target in the workspace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Subsystem {
    /// Diff strategy progress and summaries.
    Diff,
    /// Individual synchronization points.
    Sync,
    /// Patch application.
    Patch,
    /// Script encoding and decoding.
    Codec,
    /// Command-line driver.
    Cli,
}

impl Subsystem {
    /// Every subsystem.
    pub const ALL: [Self; 5] = [Self::Diff, Self::Sync, Self::Patch, Self::Codec, Self::Cli];

    /// Returns the flag name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Diff => "diff",
            Self::Sync => "sync",
            Self::Patch => "patch",
            Self::Codec => "codec",
            Self::Cli => "cli",
        }
    }

    /// Returns the tracing target events of this subsystem are emitted under.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Diff => "seqdelta::diff",
            Self::Sync => "seqdelta::sync",
            Self::Patch => "seqdelta::patch",
            Self::Codec => "seqdelta::codec",
            Self::Cli => "seqdelta::cli",
        }
    }

    /// Looks up a subsystem by flag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subsystem| subsystem.name() == name)
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verbosity level for every subsystem.
///
/// `0` shows warnings only, `1` info, `2` debug, and `3` or more trace.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsystemLevels {
    /// Diff strategies.
    pub diff: u8,
    /// Synchronization search.
    pub sync: u8,
    /// Patch application.
    pub patch: u8,
    /// Script codec.
    pub codec: u8,
    /// Command-line driver.
    pub cli: u8,
}

impl SubsystemLevels {
    /// Returns every subsystem set to `level`.
    #[must_use]
    pub const fn uniform(level: u8) -> Self {
        Self {
            diff: level,
            sync: level,
            patch: level,
            codec: level,
            cli: level,
        }
    }

    /// Returns the level of `subsystem`.
    #[must_use]
    pub const fn get(&self, subsystem: Subsystem) -> u8 {
        match subsystem {
            Subsystem::Diff => self.diff,
            Subsystem::Sync => self.sync,
            Subsystem::Patch => self.patch,
            Subsystem::Codec => self.codec,
            Subsystem::Cli => self.cli,
        }
    }

    /// Sets the level of `subsystem`.
    pub fn set(&mut self, subsystem: Subsystem, level: u8) {
        match subsystem {
            Subsystem::Diff => self.diff = level,
            Subsystem::Sync => self.sync = level,
            Subsystem::Patch => self.patch = level,
            Subsystem::Codec => self.codec = level,
            Subsystem::Cli => self.cli = level,
        }
    }
}

/// Maps a numeric verbosity level to a tracing level directive.
#[must_use]
pub const fn level_directive(level: u8) -> &'static str {
    match level {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
