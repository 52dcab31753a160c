use std::hash::Hash;

use crate::delta::index::TokenIndex;

/// Default number of combined offsets scanned when resolving a divergence.
pub const DEFAULT_HORIZON: usize = 50;
/// Largest horizon accepted by [`SyncSearch::with_horizon`].
pub const MAX_HORIZON: usize = 1024;
/// Consecutive matches required for a strong synchronization point.
const MIN_MATCH_RUN: usize = 2;

/// Position pair at which two sequences realign after a divergence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct SyncPoint {
    /// Position in the old sequence.
    pub old: usize,
    /// Position in the new sequence.
    pub new: usize,
}

impl SyncPoint {
    /// Returns the sync point located at the end of both sequences.
    #[must_use]
    pub const fn end_of<T>(old: &[T], new: &[T]) -> Self {
        Self {
            old: old.len(),
            new: new.len(),
        }
    }
}

/// Bounded-horizon search for the next synchronization point.
///
/// Candidate pairs are visited by increasing combined offset
/// `old_offset + new_offset`, ties broken by ascending old offset. The first
/// candidate that passes [`is_good_sync_point`] wins. When no candidate passes
/// within the horizon, the first plain single-token match seen in the same
/// order is used, and failing that the end of both sequences.
///
/// The tie-break is arbitrary but reproducible; it does not minimise the size
/// of the resulting script.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SyncSearch {
    horizon: usize,
}

impl SyncSearch {
    /// Creates a search using [`DEFAULT_HORIZON`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
        }
    }

    /// Overrides the horizon, clamped to `1..=MAX_HORIZON`.
    #[must_use]
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon.clamp(1, MAX_HORIZON);
        self
    }

    /// Returns the configured horizon.
    #[must_use]
    pub const fn horizon(self) -> usize {
        self.horizon
    }

    /// Finds the next synchronization point after a mismatch at
    /// `(old_pos, new_pos)` by testing every candidate pair within the horizon.
    ///
    /// The returned point is never before the cursors and, unless both
    /// cursors already sit at the end, differs from them.
    #[must_use]
    pub fn find<T: Eq>(
        &self,
        old: &[T],
        new: &[T],
        old_pos: usize,
        new_pos: usize,
    ) -> SyncPoint {
        let Some(window) = Window::new(old, new, old_pos, new_pos, self.horizon) else {
            return SyncPoint::end_of(old, new);
        };

        let mut weak = None;
        for offset in 1..=window.max_offset {
            let first = offset.saturating_sub(window.new_rest - 1);
            let last = offset.min(window.old_rest - 1);
            for old_offset in first..=last {
                let candidate = SyncPoint {
                    old: old_pos + old_offset,
                    new: new_pos + offset - old_offset,
                };
                if old[candidate.old] != new[candidate.new] {
                    continue;
                }
                if is_good_sync_point(old, new, candidate.old, candidate.new) {
                    return candidate;
                }
                weak.get_or_insert(candidate);
            }
        }

        weak.unwrap_or_else(|| SyncPoint::end_of(old, new))
    }

    /// Same contract as [`Self::find`], probing only the new-sequence
    /// positions at which the old token actually occurs.
    ///
    /// `index` must have been built over `new`. The result is identical to
    /// [`Self::find`] for the same inputs.
    #[must_use]
    pub fn find_indexed<T: Eq + Hash>(
        &self,
        old: &[T],
        new: &[T],
        index: &TokenIndex<'_, T>,
        old_pos: usize,
        new_pos: usize,
    ) -> SyncPoint {
        debug_assert_eq!(index.indexed_len(), new.len());
        let Some(window) = Window::new(old, new, old_pos, new_pos, self.horizon) else {
            return SyncPoint::end_of(old, new);
        };

        let mut strong: Option<(usize, SyncPoint)> = None;
        let mut weak: Option<(usize, SyncPoint)> = None;
        let last_old_offset = window.max_offset.min(window.old_rest - 1);

        for old_offset in 0..=last_old_offset {
            // Every remaining candidate has a combined offset of at least `old_offset`.
            if strong.is_some_and(|(best, _)| old_offset >= best) {
                break;
            }

            let old_index = old_pos + old_offset;
            let first_new = new_pos + usize::from(old_offset == 0);
            let last_new = new_pos + (window.max_offset - old_offset);

            for &new_index in index.positions_from(&old[old_index], first_new) {
                if new_index > last_new {
                    break;
                }
                let offset = old_offset + (new_index - new_pos);
                let candidate = SyncPoint {
                    old: old_index,
                    new: new_index,
                };
                if is_good_sync_point(old, new, old_index, new_index) {
                    if strong.is_none_or(|(best, _)| offset < best) {
                        strong = Some((offset, candidate));
                    }
                    break;
                }
                if weak.is_none_or(|(best, _)| offset < best) {
                    weak = Some((offset, candidate));
                }
            }
        }

        strong
            .or(weak)
            .map_or_else(|| SyncPoint::end_of(old, new), |(_, point)| point)
    }
}

impl Default for SyncSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaining lengths and scan limit for one search.
struct Window {
    old_rest: usize,
    new_rest: usize,
    max_offset: usize,
}

impl Window {
    /// Returns `None` when either cursor has no token left to match.
    fn new<T>(
        old: &[T],
        new: &[T],
        old_pos: usize,
        new_pos: usize,
        horizon: usize,
    ) -> Option<Self> {
        let old_rest = old.len().checked_sub(old_pos).filter(|rest| *rest > 0)?;
        let new_rest = new.len().checked_sub(new_pos).filter(|rest| *rest > 0)?;
        Some(Self {
            old_rest,
            new_rest,
            max_offset: horizon.min(old_rest - 1 + new_rest - 1),
        })
    }
}

/// Returns `true` when `(old_idx, new_idx)` is a safe place to resume copying.
///
/// A point qualifies when at least two consecutive tokens match from it, or
/// when the matching run reaches the end of both sequences at once. A point
/// past the end of either sequence qualifies only if it is past the end of
/// both.
#[must_use]
pub fn is_good_sync_point<T: Eq>(old: &[T], new: &[T], old_idx: usize, new_idx: usize) -> bool {
    if old_idx >= old.len() || new_idx >= new.len() {
        return old_idx >= old.len() && new_idx >= new.len();
    }

    let matches = old[old_idx..]
        .iter()
        .zip(&new[new_idx..])
        .take(MIN_MATCH_RUN)
        .take_while(|(left, right)| left == right)
        .count();

    let reaches_both_ends = old_idx + matches == old.len() && new_idx + matches == new.len();
    matches >= MIN_MATCH_RUN || reaches_both_ends
}

/// Returns `true` when both sequences hold the same tokens in the same order.
#[must_use]
pub fn sequences_equal<T: Eq>(old: &[T], new: &[T]) -> bool {
    old.len() == new.len() && old.iter().zip(new).all(|(left, right)| left == right)
}
