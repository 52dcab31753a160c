//! # Overview
//!
//! Encodes an [`EditScript`] into a self-describing byte form and back. Two
//! [`WireFormat`]s are supported: JSON triples compatible with the original
//! interchange form, and a compact binary layout for storage.
//!
//! # Invariants
//!
//! - Decoding never panics and never allocates more than the input size
//!   justifies.
//! - A successfully decoded script is ascending with disjoint deleted ranges.
//!   Whether it fits a particular original sequence is checked when the
//!   script is applied.
//!
//! # Examples
//!
//! ```
//! use engine::diff;
//! use protocol::{WireFormat, decode_script, encode_script};
//!
//! let old: Vec<String> = ["a", "b", "c"].map(String::from).to_vec();
//! let new: Vec<String> = ["a", "x", "c"].map(String::from).to_vec();
//! let script = diff(&old, &new);
//!
//! for format in WireFormat::ALL {
//!     let bytes = encode_script(&script, format).expect("encode");
//!     let decoded = decode_script::<String>(&bytes, format).expect("decode");
//!     assert_eq!(decoded, script);
//! }
//! ```

mod binary;
mod format;
mod json;
mod token;

pub use binary::{MAGIC, VERSION};
pub use format::{ParseWireFormatError, WireFormat};
pub use token::WireToken;

use engine::EditScript;

use crate::error::{DecodeError, EncodeError};

/// Encodes `script` in `format`.
///
/// # Errors
///
/// Only the JSON form can fail, when a token's `Serialize` implementation
/// does.
pub fn encode_script<T: WireToken>(
    script: &EditScript<T>,
    format: WireFormat,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = match format {
        WireFormat::Json => json::encode(script)?,
        WireFormat::Binary => binary::encode(script),
    };
    #[cfg(feature = "tracing")]
    logging::trace_codec!(
        format = %format,
        operations = script.len(),
        bytes = bytes.len(),
        "script encoded"
    );
    Ok(bytes)
}

/// Decodes a script previously produced by [`encode_script`] with the same
/// `format`.
///
/// # Errors
///
/// Returns [`DecodeError`] when the input is malformed, has trailing data,
/// carries tokens invalid for `T`, or lists operations out of order.
pub fn decode_script<T: WireToken>(
    bytes: &[u8],
    format: WireFormat,
) -> Result<EditScript<T>, DecodeError> {
    let script = match format {
        WireFormat::Json => json::decode(bytes)?,
        WireFormat::Binary => binary::decode(bytes)?,
    };
    script.check_ordering()?;
    #[cfg(feature = "tracing")]
    logging::trace_codec!(
        format = %format,
        operations = script.len(),
        bytes = bytes.len(),
        "script decoded"
    );
    Ok(script)
}

/// Guesses the format of an encoded script from its first bytes.
///
/// Returns [`WireFormat::Binary`] when the input starts with [`MAGIC`] and
/// [`WireFormat::Json`] otherwise.
#[must_use]
pub fn detect_format(bytes: &[u8]) -> WireFormat {
    if bytes.starts_with(&MAGIC) {
        WireFormat::Binary
    } else {
        WireFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{DiffStrategy, Operation, PatchError, Strategy};
    use proptest::prelude::*;

    fn owned(text: &str) -> Vec<String> {
        text.split(' ').map(str::to_owned).collect()
    }

    #[test]
    fn both_formats_round_trip_real_diffs() {
        let old = owned("the quick brown fox jumps over the lazy dog");
        let new = owned("the quick red fox walks over the very lazy dog");
        for strategy in Strategy::ALL {
            let script = strategy.diff(&old, &new);
            for format in WireFormat::ALL {
                let bytes = encode_script(&script, format).expect("encode");
                assert_eq!(detect_format(&bytes), format);
                assert_eq!(decode_script::<String>(&bytes, format), Ok(script.clone()));
            }
        }
    }

    #[test]
    fn decode_rejects_disordered_operations() {
        let script = EditScript::new(vec![
            Operation::insert(4, owned("a")),
            Operation::delete(1, 1),
        ]);
        for format in WireFormat::ALL {
            let bytes = encode_script(&script, format).expect("encode");
            assert_eq!(
                decode_script::<String>(&bytes, format),
                Err(DecodeError::InvalidScript(PatchError::Overlapping {
                    position: 1,
                    index: 1,
                    previous_end: 4,
                }))
            );
        }
    }

    #[test]
    fn decode_keeps_noop_operations() {
        let script = EditScript::new(vec![Operation::<String>::new(2, 0, Vec::new())]);
        for format in WireFormat::ALL {
            let bytes = encode_script(&script, format).expect("encode");
            assert_eq!(decode_script::<String>(&bytes, format), Ok(script.clone()));
        }
    }

    #[test]
    fn byte_tokens_round_trip() {
        let script = EditScript::new(vec![Operation::replace(0, 1, vec![vec![0u8, 159, 255]])]);
        for format in WireFormat::ALL {
            let bytes = encode_script(&script, format).expect("encode");
            assert_eq!(decode_script::<Vec<u8>>(&bytes, format), Ok(script.clone()));
        }
    }

    #[test]
    fn binary_is_smaller_than_json_for_typical_scripts() {
        let old = owned("a b c d e f g h i j k l m n o p");
        let new = owned("a B c d E f g h I j k L m n o P");
        let script = engine::diff(&old, &new);
        let json = encode_script(&script, WireFormat::Json).expect("json");
        let binary = encode_script(&script, WireFormat::Binary).expect("binary");
        assert!(binary.len() < json.len());
    }

    #[test]
    fn full_width_varint_counts_decode() {
        let mut bytes = MAGIC.to_vec();
        bytes.push(VERSION);
        bytes.extend_from_slice(&[0xFE, 0, 0, 0, 0, 0, 0, 0]);
        let script = decode_script::<String>(&bytes, WireFormat::Binary).expect("empty script");
        assert!(script.is_empty());

        bytes.truncate(MAGIC.len() + 1);
        bytes.extend_from_slice(&[0xFE, 0, 0, 0, 0, 0, 0, 1]);
        assert!(matches!(
            decode_script::<String>(&bytes, WireFormat::Binary),
            Err(DecodeError::LengthOverflow { offset: 5, .. })
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn wide_coordinates_round_trip() {
        let script = EditScript::new(vec![Operation::insert(1 << 50, vec!["x".to_owned()])]);
        let bytes = encode_script(&script, WireFormat::Binary).expect("encode");
        let decoded = decode_script::<String>(&bytes, WireFormat::Binary).expect("decode");
        assert_eq!(decoded, script);
    }

    proptest! {
        #[test]
        fn arbitrary_scripts_round_trip(
            operations in prop::collection::vec(
                (0usize..5, 0usize..5, prop::collection::vec(".{0,6}", 0..4)),
                0..12,
            )
        ) {
            let mut index = 0;
            let script: EditScript<String> = operations
                .into_iter()
                .map(|(gap, delete_count, insertions)| {
                    index += gap;
                    let operation = Operation::new(index, delete_count, insertions);
                    index += delete_count;
                    operation
                })
                .collect();
            for format in WireFormat::ALL {
                let bytes = encode_script(&script, format).expect("encode");
                prop_assert_eq!(decode_script::<String>(&bytes, format), Ok(script.clone()));
            }
        }

        #[test]
        fn garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            for format in WireFormat::ALL {
                let _ = decode_script::<String>(&bytes, format);
            }
        }

        #[test]
        fn garbage_after_binary_header_never_panics(
            body in prop::collection::vec(any::<u8>(), 0..64)
        ) {
            let mut bytes = MAGIC.to_vec();
            bytes.push(VERSION);
            bytes.extend_from_slice(&body);
            let _ = decode_script::<String>(&bytes, WireFormat::Binary);
            let _ = decode_script::<Vec<u8>>(&bytes, WireFormat::Binary);
        }
    }
}
