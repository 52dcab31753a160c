#![allow(clippy::module_name_repetitions)]

//! # Overview
//!
//! Variable-length unsigned integers used by the binary script format for
//! operation counts, indices, and token lengths. Small values dominate real
//! scripts, so the encoding spends one byte on anything below 128.
//!
//! # Design
//!
//! The leading byte announces how many extra bytes follow through its run of
//! high one bits:
//!
//! | Leading byte | Extra bytes | Value bits |
//! |--------------|-------------|------------|
//! | `0xxx_xxxx`  | 0           | 7          |
//! | `10xx_xxxx`  | 1           | 14         |
//! | `110x_xxxx`  | 2           | 21         |
//! | ...          | ...         | ...        |
//! | `1111_1110`  | 7           | 56         |
//! | `1111_1111`  | 8           | 64         |
//!
//! Extra bytes are little-endian; the data bits left in the leading byte hold
//! the most significant part of the value.
//!
//! # Examples
//!
//! ```
//! use protocol::{decode_varint, encode_varint_to_vec};
//!
//! let mut encoded = Vec::new();
//! encode_varint_to_vec(300, &mut encoded);
//! assert_eq!(encoded.len(), 2);
//! let (value, remainder) = decode_varint(&encoded).expect("varint decoding succeeds");
//! assert_eq!(value, 300);
//! assert!(remainder.is_empty());
//! ```

use crate::error::DecodeError;

/// Longest possible encoding: one tag byte plus eight value bytes.
pub const MAX_VARINT_LEN: usize = 9;

/// Encodes `value` into a stack buffer.
///
/// Returns (byte_count, bytes_array) where bytes_array[0..byte_count] is the
/// encoded data.
fn encode_bytes(value: u64) -> (usize, [u8; MAX_VARINT_LEN]) {
    let mut bytes = [0u8; MAX_VARINT_LEN];
    // Little-endian value at bytes[1..9], bytes[0] reserved for the tag
    bytes[1..].copy_from_slice(&value.to_le_bytes());

    // Number of significant bytes, at least one
    let mut count = 8usize;
    while count > 1 && bytes[count] == 0 {
        count -= 1;
    }

    // Data bits still free in the tag byte when `count - 1` extra bytes follow
    let bit = 1u8 << (8 - count);
    let current = bytes[count];

    if current >= bit {
        // Top byte does not fit beside the tag: move it out, tag is all ones
        count += 1;
        bytes[0] = !(bit - 1);
    } else if count > 1 {
        bytes[0] = current | !((bit << 1).wrapping_sub(1));
    } else {
        bytes[0] = bytes[1];
    }

    (count, bytes)
}

/// Appends the encoding of `value` to `out`.
pub fn encode_varint_to_vec(value: u64, out: &mut Vec<u8>) {
    let (len, bytes) = encode_bytes(value);
    out.extend_from_slice(&bytes[..len]);
}

/// Returns how many bytes [`encode_varint_to_vec`] emits for `value`.
#[must_use]
pub fn encoded_len(value: u64) -> usize {
    encode_bytes(value).0
}

/// Decodes one value from the front of `bytes`, returning it with the
/// unconsumed remainder.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] when `bytes` ends before the value does.
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, &[u8]), DecodeError> {
    let (&first, rest) = bytes
        .split_first()
        .ok_or(DecodeError::Truncated { needed: 1 })?;

    let extra = first.leading_ones() as usize;
    if rest.len() < extra {
        return Err(DecodeError::Truncated {
            needed: extra - rest.len(),
        });
    }

    let mut buf = [0u8; 8];
    buf[..extra].copy_from_slice(&rest[..extra]);
    // A `1111_1110` tag has no data bits; `1111_1111` has no top byte at all.
    if extra < 7 {
        // Strip the tag bits; the remaining low bits are the top value byte
        buf[extra] = first & (u8::MAX >> (extra + 1));
    }

    Ok((u64::from_le_bytes(buf), &rest[extra..]))
}
