use crate::delta::script::EditScript;
use crate::delta::trace;
use crate::error::PatchResult;

/// Applies `script` to `original` and returns the rebuilt sequence.
///
/// The script is validated against `original` before any work is done, so a
/// failing call never produces partial output. Operations are applied from the
/// last to the first: each one then only shifts positions after its own index,
/// which keeps every earlier index valid in original coordinates.
///
/// # Errors
///
/// Returns [`PatchError`](crate::PatchError) when an operation reaches past
/// the end of `original` or when operations are out of order or overlap.
///
/// # Examples
///
/// ```
/// use engine::{EditScript, Operation, apply_patch};
///
/// let original = ["a", "b", "c", "d", "e"];
/// let script = EditScript::new(vec![
///     Operation::replace(1, 1, vec!["x"]),
///     Operation::replace(3, 1, vec!["y"]),
/// ]);
/// assert_eq!(apply_patch(&original, &script)?, ["a", "x", "c", "y", "e"]);
/// # Ok::<(), engine::PatchError>(())
/// ```
pub fn apply_patch<T: Clone>(original: &[T], script: &EditScript<T>) -> PatchResult<Vec<T>> {
    script.validate(original.len())?;

    let result = match script.operations() {
        [] => original.to_vec(),
        [operation] => {
            let capacity =
                original.len() - operation.delete_count() + operation.insertions().len();
            let mut result = Vec::with_capacity(capacity);
            result.extend_from_slice(&original[..operation.index()]);
            result.extend_from_slice(operation.insertions());
            result.extend_from_slice(&original[operation.end()..]);
            result
        }
        operations => {
            let mut result = original.to_vec();
            for operation in operations.iter().rev() {
                result.splice(
                    operation.deleted_range(),
                    operation.insertions().iter().cloned(),
                );
            }
            result
        }
    };

    trace::trace_patch_applied(script.len(), original.len(), result.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::script::Operation;
    use crate::error::PatchError;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    /// Applies operations one at a time, shifting later indices by hand.
    fn apply_sequentially(original: &[char], script: &EditScript<char>) -> Vec<char> {
        let mut result = original.to_vec();
        let mut shift = 0isize;
        for operation in script {
            let start = (operation.index() as isize + shift) as usize;
            result.splice(
                start..start + operation.delete_count(),
                operation.insertions().iter().copied(),
            );
            shift += operation.insertions().len() as isize - operation.delete_count() as isize;
        }
        result
    }

    #[test]
    fn empty_script_returns_copy() {
        let original = chars("abc");
        assert_eq!(apply_patch(&original, &EditScript::empty()), Ok(original));
    }

    #[test]
    fn single_operation_replaces_in_place() {
        let original = chars("abcde");
        let script = EditScript::new(vec![Operation::replace(1, 3, chars("xy"))]);
        assert_eq!(apply_patch(&original, &script), Ok(chars("axye")));
    }

    #[test]
    fn multiple_operations_use_original_coordinates() {
        let original = chars("abcdefgh");
        let script = EditScript::new(vec![
            Operation::insert(0, chars("12")),
            Operation::replace(2, 1, chars("XYZ")),
            Operation::delete(4, 2),
            Operation::insert(8, chars("!")),
        ]);

        let expected = apply_sequentially(&original, &script);
        assert_eq!(expected, chars("12abXYZdgh!"));
        assert_eq!(apply_patch(&original, &script), Ok(expected));
    }

    #[test]
    fn insert_and_delete_at_same_index() {
        let original = chars("abc");
        let script = EditScript::new(vec![
            Operation::insert(1, chars("x")),
            Operation::delete(1, 1),
        ]);
        assert_eq!(apply_patch(&original, &script), Ok(chars("axc")));
    }

    #[test]
    fn noop_operations_are_tolerated() {
        let original = chars("abc");
        let script = EditScript::new(vec![
            Operation::new(1, 0, Vec::new()),
            Operation::replace(2, 1, chars("z")),
        ]);
        assert_eq!(apply_patch(&original, &script), Ok(chars("abz")));
    }

    #[test]
    fn out_of_bounds_script_is_rejected() {
        let original = chars("abc");
        let script = EditScript::new(vec![Operation::delete(2, 2)]);
        assert_eq!(
            apply_patch(&original, &script),
            Err(PatchError::OutOfBounds {
                position: 0,
                index: 2,
                delete_count: 2,
                len: 3,
            })
        );
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let original = chars("abc");
        let script = EditScript::new(vec![Operation::insert(4, chars("x"))]);
        assert!(matches!(
            apply_patch(&original, &script),
            Err(PatchError::OutOfBounds { index: 4, .. })
        ));
    }

    #[test]
    fn overlapping_script_is_rejected() {
        let original = chars("abcdef");
        let script = EditScript::new(vec![
            Operation::delete(0, 3),
            Operation::replace(2, 1, chars("x")),
        ]);
        assert!(matches!(
            apply_patch(&original, &script),
            Err(PatchError::Overlapping { position: 1, .. })
        ));
    }
}
