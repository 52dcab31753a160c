//! Length-prefixed binary script layout.
//!
//! ```text
//! "SQDS" version:u8 count:varint
//!   { index:varint delete_count:varint inserted:varint { len:varint bytes } }*
//! ```

use engine::{EditScript, Operation};

use super::token::WireToken;
use crate::error::DecodeError;
use crate::varint::{decode_varint, encode_varint_to_vec, encoded_len};

/// Leading bytes of every binary script.
pub const MAGIC: [u8; 4] = *b"SQDS";
/// Binary layout version written by this build.
pub const VERSION: u8 = 1;

/// Smallest possible encoding of one operation: three one-byte varints.
const MIN_OPERATION_LEN: usize = 3;
/// Smallest possible encoding of one token: an empty length prefix.
const MIN_TOKEN_LEN: usize = 1;

pub(super) fn encode<T: WireToken>(script: &EditScript<T>) -> Vec<u8> {
    let body: usize = script
        .iter()
        .map(|operation| {
            encoded_len(operation.index() as u64)
                + encoded_len(operation.delete_count() as u64)
                + encoded_len(operation.insertions().len() as u64)
                + operation
                    .insertions()
                    .iter()
                    .map(|token| {
                        let bytes = token.as_wire_bytes();
                        encoded_len(bytes.len() as u64) + bytes.len()
                    })
                    .sum::<usize>()
        })
        .sum();

    let mut out = Vec::with_capacity(MAGIC.len() + 1 + encoded_len(script.len() as u64) + body);
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    encode_varint_to_vec(script.len() as u64, &mut out);

    for operation in script {
        encode_varint_to_vec(operation.index() as u64, &mut out);
        encode_varint_to_vec(operation.delete_count() as u64, &mut out);
        encode_varint_to_vec(operation.insertions().len() as u64, &mut out);
        for token in operation.insertions() {
            let bytes = token.as_wire_bytes();
            encode_varint_to_vec(bytes.len() as u64, &mut out);
            out.extend_from_slice(bytes);
        }
    }

    out
}

pub(super) fn decode<T: WireToken>(input: &[u8]) -> Result<EditScript<T>, DecodeError> {
    let mut reader = Reader::new(input);

    let magic = reader.take(MAGIC.len())?;
    if magic != MAGIC {
        let mut found = [0u8; 4];
        found.copy_from_slice(magic);
        return Err(DecodeError::BadMagic { found });
    }
    let version = reader.take(1)?[0];
    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let count = reader.length(MIN_OPERATION_LEN)?;
    let mut operations = Vec::with_capacity(count);
    for position in 0..count {
        let index = reader.coordinate()?;
        let delete_count = reader.coordinate()?;
        let inserted = reader.length(MIN_TOKEN_LEN)?;

        let mut insertions = Vec::with_capacity(inserted);
        for token in 0..inserted {
            let len = reader.length(1)?;
            let bytes = reader.take(len)?;
            let value = T::from_wire_bytes(bytes).ok_or(DecodeError::InvalidToken {
                operation: position,
                token,
                expected: T::TYPE_NAME,
            })?;
            insertions.push(value);
        }
        operations.push(Operation::new(index, delete_count, insertions));
    }

    if reader.remaining() > 0 {
        return Err(DecodeError::TrailingBytes(reader.remaining()));
    }
    Ok(EditScript::new(operations))
}

/// Cursor over the encoded bytes that tracks its offset for diagnostics.
struct Reader<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    const fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    const fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(DecodeError::Truncated {
                needed: len - remaining,
            });
        }
        let bytes = &self.input[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn varint(&mut self) -> Result<(u64, usize), DecodeError> {
        let start = self.offset;
        let (value, rest) = decode_varint(&self.input[start..])?;
        self.offset = self.input.len() - rest.len();
        Ok((value, start))
    }

    /// Reads an index or delete count; only the platform width bounds it.
    fn coordinate(&mut self) -> Result<usize, DecodeError> {
        let (value, offset) = self.varint()?;
        usize::try_from(value).map_err(|_| DecodeError::LengthOverflow { value, offset })
    }

    /// Reads a count of items that each occupy at least `min_item_len` bytes
    /// of the remaining input, so allocations stay bounded by the input size.
    fn length(&mut self, min_item_len: usize) -> Result<usize, DecodeError> {
        let (value, offset) = self.varint()?;
        let remaining = self.remaining();
        usize::try_from(value)
            .ok()
            .filter(|count| {
                count
                    .checked_mul(min_item_len)
                    .is_some_and(|bytes| bytes <= remaining)
            })
            .ok_or(DecodeError::LengthOverflow { value, offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| (*token).to_owned()).collect()
    }

    fn sample() -> EditScript<String> {
        EditScript::new(vec![
            Operation::replace(1, 1, strings(&["x"])),
            Operation::replace(3, 1, strings(&["y", ""])),
            Operation::delete(300, 2),
        ])
    }

    #[test]
    fn layout_starts_with_header() {
        let encoded = encode(&sample());
        assert_eq!(&encoded[..4], b"SQDS");
        assert_eq!(encoded[4], VERSION);
        assert_eq!(encoded[5], 3);
    }

    #[test]
    fn empty_script_is_header_and_zero_count() {
        let encoded = encode(&EditScript::<String>::empty());
        assert_eq!(encoded, b"SQDS\x01\x00");
        assert_eq!(decode::<String>(&encoded), Ok(EditScript::empty()));
    }

    #[test]
    fn encode_then_decode_preserves_script() {
        let script = sample();
        assert_eq!(decode::<String>(&encode(&script)), Ok(script));
    }

    #[test]
    fn rejects_bad_magic_and_version() {
        assert_eq!(
            decode::<String>(b"JUNK\x01\x00"),
            Err(DecodeError::BadMagic { found: *b"JUNK" })
        );
        assert_eq!(
            decode::<String>(b"SQDS\x02\x00"),
            Err(DecodeError::UnsupportedVersion(2))
        );
        assert_eq!(
            decode::<String>(b"SQ"),
            Err(DecodeError::Truncated { needed: 2 })
        );
    }

    #[test]
    fn rejects_every_truncation() {
        let encoded = encode(&sample());
        for len in 0..encoded.len() {
            let result = decode::<String>(&encoded[..len]);
            assert!(
                matches!(
                    result,
                    Err(DecodeError::Truncated { .. } | DecodeError::LengthOverflow { .. })
                ),
                "prefix of {len} bytes gave {result:?}"
            );
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut encoded = encode(&sample());
        encoded.extend_from_slice(&[0, 0]);
        assert_eq!(decode::<String>(&encoded), Err(DecodeError::TrailingBytes(2)));
    }

    #[test]
    fn rejects_oversized_counts_without_allocating() {
        let mut encoded = b"SQDS\x01".to_vec();
        encode_varint_to_vec(u64::MAX, &mut encoded);
        assert_eq!(
            decode::<String>(&encoded),
            Err(DecodeError::LengthOverflow {
                value: u64::MAX,
                offset: 5,
            })
        );
    }

    #[test]
    fn rejects_invalid_utf8_tokens() {
        let mut encoded = b"SQDS\x01\x01\x00\x00\x01".to_vec();
        encoded.extend_from_slice(&[2, 0xC3, 0x28]);
        assert_eq!(
            decode::<String>(&encoded),
            Err(DecodeError::InvalidToken {
                operation: 0,
                token: 0,
                expected: "UTF-8 string",
            })
        );
        let bytes = decode::<Vec<u8>>(&encoded).expect("raw bytes accepted");
        assert_eq!(bytes.operations()[0].insertions(), &[vec![0xC3, 0x28]]);
    }
}
