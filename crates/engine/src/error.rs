//! Error types for the engine crate.

use thiserror::Error;

/// Result type for patch application.
pub type PatchResult<T> = Result<T, PatchError>;

/// Reasons an [`EditScript`](crate::EditScript) cannot be applied to a sequence.
///
/// Scripts produced by the diff strategies never trigger these errors. They
/// guard hand-built or decoded scripts whose coordinates do not fit the
/// original sequence.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PatchError {
    /// The deleted range of an operation extends past the original sequence.
    #[error(
        "operation {position} deletes {delete_count} tokens at index {index}, \
         past the end of a sequence of length {len}"
    )]
    OutOfBounds {
        /// Position of the offending operation within the script.
        position: usize,
        /// Start index of the operation.
        index: usize,
        /// Number of tokens the operation deletes.
        delete_count: usize,
        /// Length of the original sequence.
        len: usize,
    },
    /// An operation starts before the previous operation's deleted range ends.
    #[error(
        "operation {position} at index {index} overlaps or precedes the previous \
         operation ending at {previous_end}"
    )]
    Overlapping {
        /// Position of the offending operation within the script.
        position: usize,
        /// Start index of the operation.
        index: usize,
        /// End of the previous operation's deleted range.
        previous_end: usize,
    },
}
