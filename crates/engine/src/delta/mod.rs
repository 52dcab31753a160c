#![allow(clippy::module_name_repetitions)]

//! # Overview
//!
//! The `delta` module hosts the diff and patch pipeline. A diff walks two
//! token sequences in lockstep, copies matching runs implicitly, and records
//! every divergence as an [`Operation`] expressed in the coordinates of the
//! original sequence. The resulting [`EditScript`] is later replayed by
//! [`apply_patch`] to rebuild the target sequence.
//!
//! # Design
//!
//! Three strategies share one contract through [`DiffStrategy`]:
//!
//! - [`PreciseDiff`] trims the common prefix and suffix, then resolves every
//!   divergence with a bounded [`SyncSearch`] scan.
//! - [`IndexedDiff`] follows the same control flow but probes only offsets at
//!   which the old token actually occurs in the new sequence, using a
//!   [`TokenIndex`].
//! - [`FastDiff`] stops after trimming and replaces the whole residual middle
//!   with a single operation.
//!
//! [`Strategy`] selects one of them at runtime so callers can trade patch
//! compactness for speed without naming concrete types.
//!
//! # Invariants
//!
//! - Operations are ascending by index and their deleted ranges never
//!   overlap.
//! - Coordinates always refer to the untouched original sequence, never to an
//!   intermediate state.
//! - Strategies never emit an operation that neither deletes nor inserts.
//! - The search horizon caps the work spent on any single divergence, keeping
//!   the total cost close to linear even for adversarial inputs.
//!
//! # Errors
//!
//! Diffing never fails. [`apply_patch`] returns a
//! [`PatchError`](crate::PatchError) when a script does not fit the original
//! sequence, before any output is produced.
//!
//! # Examples
//!
//! ```
//! use engine::delta::{DiffStrategy, Strategy, apply_patch};
//!
//! let old: Vec<&str> = "the quick brown fox".split(' ').collect();
//! let new: Vec<&str> = "the slow brown fox jumps".split(' ').collect();
//!
//! for strategy in Strategy::ALL {
//!     let script = strategy.diff(&old, &new);
//!     assert_eq!(apply_patch(&old, &script).expect("apply"), new);
//! }
//! ```
//!
//! # See also
//!
//! - [`crate::delta::sync`] for the synchronization heuristics.
//! - [`crate::delta::apply`] for the reverse-order application rule.

/// Patch application.
pub mod apply;
/// Value-to-positions index for accelerated synchronization search.
pub mod index;
/// Operation and edit script representation.
pub mod script;
/// Diff strategies sharing the [`DiffStrategy`] contract.
pub mod strategy;
/// Synchronization point search.
pub mod sync;

mod trace;

pub use apply::apply_patch;
pub use index::TokenIndex;
pub use script::{EditScript, Operation};
pub use strategy::{
    DiffStrategy, FastDiff, IndexedDiff, ParseStrategyError, PreciseDiff, Strategy, diff,
    diff_indexed, fast_diff,
};
pub use sync::{
    DEFAULT_HORIZON, MAX_HORIZON, SyncPoint, SyncSearch, is_good_sync_point, sequences_equal,
};
