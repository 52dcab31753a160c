#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` computes and applies edit scripts between two ordered token
//! sequences. A token is anything comparable for equality: the lines,
//! sentences, or words of a document revision. The crate is the algorithmic
//! core of the seqdelta workspace; tokenizing text, wire encoding, and file
//! handling live in the `cli` and `protocol` crates.
//!
//! # Design
//!
//! - [`delta::sync`] locates the point where two sequences realign after a
//!   divergence with a bounded-horizon scan.
//! - [`delta::strategy`] hosts the three interchangeable diff strategies
//!   behind the [`DiffStrategy`] trait.
//! - [`delta::apply`] rebuilds the target sequence from the original plus an
//!   [`EditScript`].
//!
//! Every entry point is a pure function of its inputs. Nothing is shared
//! across calls, so independent diffs can run on separate threads without
//! coordination.
//!
//! # Examples
//!
//! ```
//! use engine::{apply_patch, diff};
//!
//! let old = ["a", "b", "c", "d", "e"];
//! let new = ["a", "x", "c", "y", "e"];
//!
//! let script = diff(&old, &new);
//! assert_eq!(script.len(), 2);
//!
//! let patched = apply_patch(&old, &script).expect("script fits the original");
//! assert_eq!(patched, new);
//! ```

pub mod delta;
pub mod error;

pub use delta::{
    DEFAULT_HORIZON, DiffStrategy, EditScript, FastDiff, IndexedDiff, MAX_HORIZON, Operation,
    ParseStrategyError, PreciseDiff, Strategy, SyncPoint, SyncSearch, TokenIndex, apply_patch,
    diff, diff_indexed, fast_diff, is_good_sync_point, sequences_equal,
};
pub use error::{PatchError, PatchResult};
