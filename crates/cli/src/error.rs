use std::io;
use std::path::PathBuf;

use engine::{PatchError, Strategy};
use protocol::{DecodeError, EncodeError};
use thiserror::Error;

/// Exit code for successful runs.
pub const EXIT_OK: i32 = 0;
/// Exit code for invalid command-line usage.
pub const EXIT_USAGE: i32 = 1;
/// Exit code for unreadable inputs or unwritable outputs.
pub const EXIT_IO: i32 = 2;
/// Exit code for patches that cannot be decoded or applied.
pub const EXIT_PATCH: i32 = 3;
/// Exit code for a patch that does not reproduce the new revision.
pub const EXIT_MISMATCH: i32 = 4;

/// Failures surfaced by the `seqdelta` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Output could not be written.
    #[error("failed to write {target}: {source}")]
    Write {
        /// File path, or `stdout`.
        target: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The script could not be encoded.
    #[error("failed to encode patch: {0}")]
    Encode(#[from] EncodeError),
    /// The patch file is malformed.
    #[error("failed to decode patch {}: {source}", path.display())]
    Decode {
        /// Patch file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: DecodeError,
    },
    /// The patch does not fit the original revision.
    #[error("patch does not apply to {}: {source}", path.display())]
    Patch {
        /// Original revision the patch was applied to.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: PatchError,
    },
    /// Applying the computed patch did not reproduce the new revision.
    #[error(
        "{strategy} patch did not reproduce the new revision \
         ({actual} token(s), {expected} expected)"
    )]
    Mismatch {
        /// Strategy that produced the patch.
        strategy: Strategy,
        /// Token count of the new revision.
        expected: usize,
        /// Token count after applying the patch.
        actual: usize,
    },
}

impl CliError {
    /// Process exit code reported for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Read { .. } | Self::Write { .. } => EXIT_IO,
            Self::Encode(_) | Self::Decode { .. } | Self::Patch { .. } => EXIT_PATCH,
            Self::Mismatch { .. } => EXIT_MISMATCH,
        }
    }

    pub(crate) fn write_to(target: impl Into<String>, source: io::Error) -> Self {
        Self::Write {
            target: target.into(),
            source,
        }
    }
}
