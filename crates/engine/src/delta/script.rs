use std::ops::Range;

use crate::error::{PatchError, PatchResult};

/// Single edit expressed in the coordinates of the original sequence.
///
/// An operation removes `delete_count` tokens starting at `index` and puts
/// `insertions` in their place. Pure inserts delete nothing, pure deletes
/// insert nothing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Operation<T> {
    index: usize,
    delete_count: usize,
    insertions: Vec<T>,
}

impl<T> Operation<T> {
    /// Creates an operation from its raw parts.
    #[must_use]
    pub const fn new(index: usize, delete_count: usize, insertions: Vec<T>) -> Self {
        Self {
            index,
            delete_count,
            insertions,
        }
    }

    /// Creates an operation that inserts `tokens` before `index`.
    #[must_use]
    pub const fn insert(index: usize, tokens: Vec<T>) -> Self {
        Self::new(index, 0, tokens)
    }

    /// Creates an operation that removes `count` tokens starting at `index`.
    #[must_use]
    pub const fn delete(index: usize, count: usize) -> Self {
        Self::new(index, count, Vec::new())
    }

    /// Creates an operation that replaces `count` tokens at `index` with `tokens`.
    #[must_use]
    pub const fn replace(index: usize, count: usize, tokens: Vec<T>) -> Self {
        Self::new(index, count, tokens)
    }

    /// Returns the start index in the original sequence.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of original tokens removed.
    #[must_use]
    pub const fn delete_count(&self) -> usize {
        self.delete_count
    }

    /// Returns the tokens inserted at [`Self::index`].
    #[must_use]
    pub fn insertions(&self) -> &[T] {
        &self.insertions
    }

    /// Consumes the operation and returns `(index, delete_count, insertions)`.
    #[must_use]
    pub fn into_parts(self) -> (usize, usize, Vec<T>) {
        (self.index, self.delete_count, self.insertions)
    }

    /// Returns the first original index after the deleted range.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.index.saturating_add(self.delete_count)
    }

    /// Returns the deleted range in original coordinates.
    #[must_use]
    pub const fn deleted_range(&self) -> Range<usize> {
        self.index..self.end()
    }

    /// Returns `true` when the operation neither deletes nor inserts.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.delete_count == 0 && self.insertions.is_empty()
    }

    /// Returns `true` when the operation only inserts tokens.
    #[must_use]
    pub fn is_pure_insert(&self) -> bool {
        self.delete_count == 0 && !self.insertions.is_empty()
    }

    /// Returns `true` when the operation only removes tokens.
    #[must_use]
    pub fn is_pure_delete(&self) -> bool {
        self.delete_count > 0 && self.insertions.is_empty()
    }
}

/// Ordered list of [`Operation`] values that rebuild a target sequence.
///
/// Operations are ascending by index with non-overlapping deleted ranges, all
/// in the coordinate space of the original sequence. [`EditScript::new`] does
/// not enforce this so hand-built and decoded scripts can be represented;
/// [`EditScript::validate`] checks it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EditScript<T> {
    operations: Vec<Operation<T>>,
}

impl<T> EditScript<T> {
    /// Creates a script from the provided operations.
    #[must_use]
    pub const fn new(operations: Vec<Operation<T>>) -> Self {
        Self { operations }
    }

    /// Creates a script without operations.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the operations in application order.
    #[must_use]
    pub fn operations(&self) -> &[Operation<T>] {
        &self.operations
    }

    /// Consumes the script and returns its operations.
    #[must_use]
    pub fn into_operations(self) -> Vec<Operation<T>> {
        self.operations
    }

    /// Returns an iterator over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation<T>> {
        self.operations.iter()
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` when the script leaves the original untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns the total number of original tokens removed.
    #[must_use]
    pub fn deleted_tokens(&self) -> usize {
        self.operations.iter().map(Operation::delete_count).sum()
    }

    /// Returns the total number of tokens inserted.
    #[must_use]
    pub fn inserted_tokens(&self) -> usize {
        self.operations
            .iter()
            .map(|operation| operation.insertions.len())
            .sum()
    }

    /// Returns how much the script grows (positive) or shrinks the sequence.
    #[must_use]
    pub fn net_len_change(&self) -> isize {
        self.inserted_tokens() as isize - self.deleted_tokens() as isize
    }

    /// Returns the length of the sequence produced from an original of
    /// `original_len` tokens, or `None` when the script deletes more than exists.
    #[must_use]
    pub fn target_len(&self, original_len: usize) -> Option<usize> {
        original_len
            .checked_sub(self.deleted_tokens())
            .map(|kept| kept + self.inserted_tokens())
    }

    /// Checks that every operation fits an original sequence of
    /// `original_len` tokens and that operations are ascending and disjoint.
    pub fn validate(&self, original_len: usize) -> PatchResult<()> {
        self.check(Some(original_len))
    }

    /// Checks ordering only: operations ascending with disjoint deleted ranges.
    ///
    /// Used where the original length is unknown, such as after decoding.
    pub fn check_ordering(&self) -> PatchResult<()> {
        self.check(None)
    }

    fn check(&self, original_len: Option<usize>) -> PatchResult<()> {
        let mut previous_end = 0usize;
        for (position, operation) in self.operations.iter().enumerate() {
            let end = operation.index.checked_add(operation.delete_count);
            let end = match (end, original_len) {
                (Some(end), Some(len)) if end <= len => end,
                (Some(end), None) => end,
                _ => {
                    return Err(PatchError::OutOfBounds {
                        position,
                        index: operation.index,
                        delete_count: operation.delete_count,
                        len: original_len.unwrap_or(usize::MAX),
                    });
                }
            };

            if operation.index < previous_end {
                return Err(PatchError::Overlapping {
                    position,
                    index: operation.index,
                    previous_end,
                });
            }
            previous_end = end;
        }
        Ok(())
    }
}

impl<T> Default for EditScript<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<Operation<T>>> for EditScript<T> {
    fn from(operations: Vec<Operation<T>>) -> Self {
        Self::new(operations)
    }
}

impl<T> FromIterator<Operation<T>> for EditScript<T> {
    fn from_iter<I: IntoIterator<Item = Operation<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for EditScript<T> {
    type Item = Operation<T>;
    type IntoIter = std::vec::IntoIter<Operation<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EditScript<T> {
    type Item = &'a Operation<T>;
    type IntoIter = std::slice::Iter<'a, Operation<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
    use serde::ser::SerializeTuple;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Operation;

    impl<T: Serialize> Serialize for Operation<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut triple = serializer.serialize_tuple(3)?;
            triple.serialize_element(&self.index)?;
            triple.serialize_element(&self.delete_count)?;
            triple.serialize_element(&self.insertions)?;
            triple.end()
        }
    }

    impl<'de, T: Deserialize<'de>> Deserialize<'de> for Operation<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_tuple(3, OperationVisitor(PhantomData))
        }
    }

    struct OperationVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OperationVisitor<T> {
        type Value = Operation<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("an [index, deleteCount, insertions] triple")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let index = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
            let delete_count = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;
            let insertions = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(2, &self))?;
            if seq.next_element::<IgnoredAny>()?.is_some() {
                return Err(de::Error::invalid_length(4, &self));
            }
            Ok(Operation::new(index, delete_count, insertions))
        }
    }
}
