use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use thiserror::Error;

use crate::delta::index::TokenIndex;
use crate::delta::script::{EditScript, Operation};
use crate::delta::sync::{SyncPoint, SyncSearch, sequences_equal};
use crate::delta::trace;

/// Computes an [`EditScript`] that turns `old` into `new`.
///
/// Every implementation must produce a script for which
/// [`apply_patch`](crate::apply_patch) rebuilds `new` exactly. Implementations
/// differ only in how compact the script is and how long it takes to build.
pub trait DiffStrategy<T> {
    /// Diffs `old` against `new`.
    fn diff(&self, old: &[T], new: &[T]) -> EditScript<T>;
}

/// Prefix/suffix trim followed by iterative bounded synchronization search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PreciseDiff {
    search: SyncSearch,
}

impl PreciseDiff {
    /// Creates the strategy with the default horizon.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search: SyncSearch::new(),
        }
    }

    /// Overrides the synchronization horizon.
    #[must_use]
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.search = self.search.with_horizon(horizon);
        self
    }

    /// Returns the synchronization search in use.
    #[must_use]
    pub const fn search(&self) -> SyncSearch {
        self.search
    }
}

impl<T: Eq + Clone> DiffStrategy<T> for PreciseDiff {
    fn diff(&self, old: &[T], new: &[T]) -> EditScript<T> {
        diff_windows(Strategy::Precise, old, new, |old_window, new_window| {
            scan_divergences(old_window, new_window, |old_pos, new_pos| {
                self.search.find(old_window, new_window, old_pos, new_pos)
            })
        })
    }
}

/// [`PreciseDiff`] control flow with a [`TokenIndex`]-accelerated search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IndexedDiff {
    search: SyncSearch,
}

impl IndexedDiff {
    /// Creates the strategy with the default horizon.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search: SyncSearch::new(),
        }
    }

    /// Overrides the synchronization horizon.
    #[must_use]
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.search = self.search.with_horizon(horizon);
        self
    }

    /// Returns the synchronization search in use.
    #[must_use]
    pub const fn search(&self) -> SyncSearch {
        self.search
    }
}

impl<T: Eq + Hash + Clone> DiffStrategy<T> for IndexedDiff {
    fn diff(&self, old: &[T], new: &[T]) -> EditScript<T> {
        diff_windows(Strategy::Indexed, old, new, |old_window, new_window| {
            let index = TokenIndex::new(new_window);
            scan_divergences(old_window, new_window, |old_pos, new_pos| {
                self.search
                    .find_indexed(old_window, new_window, &index, old_pos, new_pos)
            })
        })
    }
}

/// Prefix/suffix trim only; the residual middle becomes one replace operation.
///
/// Always linear and single pass, at the cost of coarser scripts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FastDiff;

impl<T: Eq + Clone> DiffStrategy<T> for FastDiff {
    fn diff(&self, old: &[T], new: &[T]) -> EditScript<T> {
        diff_windows(Strategy::Fast, old, new, |old_window, new_window| {
            vec![Operation::replace(0, old_window.len(), new_window.to_vec())]
        })
    }
}

/// Runtime selection among the available diff strategies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// See [`PreciseDiff`].
    #[default]
    Precise,
    /// See [`IndexedDiff`].
    Indexed,
    /// See [`FastDiff`].
    Fast,
}

impl Strategy {
    /// Every strategy, from most compact to fastest.
    pub const ALL: [Self; 3] = [Self::Precise, Self::Indexed, Self::Fast];

    /// Returns the lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Precise => "precise",
            Self::Indexed => "indexed",
            Self::Fast => "fast",
        }
    }

    /// Diffs with the given synchronization search; [`Strategy::Fast`] ignores it.
    #[must_use]
    pub fn diff_with_search<T: Eq + Hash + Clone>(
        self,
        search: SyncSearch,
        old: &[T],
        new: &[T],
    ) -> EditScript<T> {
        match self {
            Self::Precise => PreciseDiff { search }.diff(old, new),
            Self::Indexed => IndexedDiff { search }.diff(old, new),
            Self::Fast => FastDiff.diff(old, new),
        }
    }
}

impl<T: Eq + Hash + Clone> DiffStrategy<T> for Strategy {
    fn diff(&self, old: &[T], new: &[T]) -> EditScript<T> {
        self.diff_with_search(SyncSearch::new(), old, new)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown diff strategy '{name}' (expected precise, indexed, or fast)")]
pub struct ParseStrategyError {
    name: String,
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseStrategyError {
                name: value.to_owned(),
            })
    }
}

/// Diffs with [`PreciseDiff`] and the default horizon.
#[must_use]
pub fn diff<T: Eq + Clone>(old: &[T], new: &[T]) -> EditScript<T> {
    PreciseDiff::new().diff(old, new)
}

/// Diffs with [`IndexedDiff`] and the default horizon.
#[must_use]
pub fn diff_indexed<T: Eq + Hash + Clone>(old: &[T], new: &[T]) -> EditScript<T> {
    IndexedDiff::new().diff(old, new)
}

/// Diffs with [`FastDiff`].
#[must_use]
pub fn fast_diff<T: Eq + Clone>(old: &[T], new: &[T]) -> EditScript<T> {
    FastDiff.diff(old, new)
}

/// Length of the common prefix and of the common suffix that does not
/// overlap it.
fn common_affixes<T: Eq>(old: &[T], new: &[T]) -> (usize, usize) {
    let prefix = old
        .iter()
        .zip(new)
        .take_while(|(left, right)| left == right)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(left, right)| left == right)
        .count();
    (prefix, suffix)
}

/// Shared preprocessing for every strategy.
///
/// Trims the common prefix and suffix, resolves the trivial shapes directly
/// and hands the two residual windows to `body`, whose window-relative
/// operations are shifted back into original coordinates.
fn diff_windows<T, F>(strategy: Strategy, old: &[T], new: &[T], body: F) -> EditScript<T>
where
    T: Eq + Clone,
    F: FnOnce(&[T], &[T]) -> Vec<Operation<T>>,
{
    if sequences_equal(old, new) {
        let script = EditScript::empty();
        trace::trace_diff_complete(strategy, &script);
        return script;
    }

    let (prefix, suffix) = common_affixes(old, new);
    let old_window = &old[prefix..old.len() - suffix];
    let new_window = &new[prefix..new.len() - suffix];
    trace::trace_diff_start(strategy, old.len(), new.len(), prefix, suffix);

    let operations = if old_window.is_empty() {
        vec![Operation::insert(prefix, new_window.to_vec())]
    } else if new_window.is_empty() {
        vec![Operation::delete(prefix, old_window.len())]
    } else {
        body(old_window, new_window)
            .into_iter()
            .map(|operation| {
                let (index, delete_count, insertions) = operation.into_parts();
                Operation::new(prefix + index, delete_count, insertions)
            })
            .collect()
    };

    let script = EditScript::new(operations);
    trace::trace_diff_complete(strategy, &script);
    script
}

/// Walks both windows, copying matching runs and emitting one operation per
/// divergence bounded by the sync point `find` reports.
fn scan_divergences<T, F>(old: &[T], new: &[T], mut find: F) -> Vec<Operation<T>>
where
    T: Eq + Clone,
    F: FnMut(usize, usize) -> SyncPoint,
{
    let mut operations = Vec::new();
    let mut old_pos = 0;
    let mut new_pos = 0;

    loop {
        while old_pos < old.len() && new_pos < new.len() && old[old_pos] == new[new_pos] {
            old_pos += 1;
            new_pos += 1;
        }
        if old_pos == old.len() && new_pos == new.len() {
            break;
        }

        let sync = find(old_pos, new_pos);
        trace::trace_sync_point(old_pos, new_pos, sync);
        operations.push(Operation::new(
            old_pos,
            sync.old - old_pos,
            new[new_pos..sync.new].to_vec(),
        ));
        old_pos = sync.old;
        new_pos = sync.new;
    }

    operations
}
