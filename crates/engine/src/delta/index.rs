use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Maps every distinct token of a sequence to the ascending positions it occupies.
///
/// The index borrows the tokens it was built from, so building it never clones
/// token values. [`SyncSearch::find_indexed`](crate::SyncSearch::find_indexed)
/// uses it to skip offsets at which a token cannot possibly match.
#[derive(Clone, Debug)]
pub struct TokenIndex<'a, T> {
    positions: FxHashMap<&'a T, Vec<usize>>,
    len: usize,
}

impl<'a, T: Eq + Hash> TokenIndex<'a, T> {
    /// Builds an index over `tokens`.
    #[must_use]
    pub fn new(tokens: &'a [T]) -> Self {
        let mut positions: FxHashMap<&'a T, Vec<usize>> = FxHashMap::default();
        for (position, token) in tokens.iter().enumerate() {
            positions.entry(token).or_default().push(position);
        }
        Self {
            positions,
            len: tokens.len(),
        }
    }

    /// Returns every position holding `token`, ascending.
    #[must_use]
    pub fn positions(&self, token: &T) -> &[usize] {
        self.positions.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the positions holding `token` that are at or after `start`.
    #[must_use]
    pub fn positions_from(&self, token: &T, start: usize) -> &[usize] {
        let positions = self.positions(token);
        &positions[positions.partition_point(|&position| position < start)..]
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn distinct_tokens(&self) -> usize {
        self.positions.len()
    }

    /// Returns the length of the indexed sequence.
    #[must_use]
    pub const fn indexed_len(&self) -> usize {
        self.len
    }
}
