use engine::PatchError;
use thiserror::Error;

/// Reasons an encoded edit script cannot be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input ended inside a value.
    #[error("truncated script: {needed} more byte(s) expected")]
    Truncated {
        /// Lower bound on the number of missing bytes.
        needed: usize,
    },
    /// The binary header does not start with the script magic.
    #[error("not a binary edit script (magic {found:02x?})")]
    BadMagic {
        /// First bytes of the input.
        found: [u8; 4],
    },
    /// The binary header names a format version this build does not read.
    #[error("unsupported binary script version {0}")]
    UnsupportedVersion(u8),
    /// A decoded count or length does not fit the platform or the input.
    #[error("length {value} at byte {offset} exceeds the remaining input")]
    LengthOverflow {
        /// Offending value.
        value: u64,
        /// Byte offset of the value.
        offset: usize,
    },
    /// Token bytes are not valid for the requested token type.
    #[error("token {token} of operation {operation} is not a valid {expected}")]
    InvalidToken {
        /// Operation position within the script.
        operation: usize,
        /// Token position within the operation's insertions.
        token: usize,
        /// Human-readable token type.
        expected: &'static str,
    },
    /// Bytes remain after the last operation.
    #[error("{0} trailing byte(s) after the last operation")]
    TrailingBytes(usize),
    /// The JSON form is malformed or has the wrong shape.
    #[error("malformed JSON script: {0}")]
    Json(#[from] serde_json::Error),
    /// The operations are out of order or overlap.
    #[error("invalid script: {0}")]
    InvalidScript(#[from] PatchError),
}

impl PartialEq for DecodeError {
    /// JSON errors compare by message; everything else structurally.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Truncated { needed: a }, Self::Truncated { needed: b }) => a == b,
            (Self::BadMagic { found: a }, Self::BadMagic { found: b }) => a == b,
            (Self::UnsupportedVersion(a), Self::UnsupportedVersion(b)) => a == b,
            (
                Self::LengthOverflow {
                    value: a,
                    offset: x,
                },
                Self::LengthOverflow {
                    value: b,
                    offset: y,
                },
            ) => a == b && x == y,
            (
                Self::InvalidToken {
                    operation: a,
                    token: x,
                    expected: p,
                },
                Self::InvalidToken {
                    operation: b,
                    token: y,
                    expected: q,
                },
            ) => a == b && x == y && p == q,
            (Self::TrailingBytes(a), Self::TrailingBytes(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::InvalidScript(a), Self::InvalidScript(b)) => a == b,
            _ => false,
        }
    }
}

/// Reasons an edit script cannot be encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A token failed to serialize as JSON.
    #[error("failed to encode script as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let error = DecodeError::BadMagic {
            found: *b"JUNK",
        };
        assert!(error.to_string().contains("4a"));

        let error = DecodeError::InvalidToken {
            operation: 2,
            token: 0,
            expected: "UTF-8 string",
        };
        assert_eq!(
            error.to_string(),
            "token 0 of operation 2 is not a valid UTF-8 string"
        );
    }

    #[test]
    fn patch_errors_convert() {
        let error: DecodeError = PatchError::Overlapping {
            position: 1,
            index: 0,
            previous_end: 3,
        }
        .into();
        assert!(matches!(error, DecodeError::InvalidScript(_)));
    }
}
