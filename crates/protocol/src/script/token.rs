use serde::Serialize;
use serde::de::DeserializeOwned;

/// Token types the script codec can carry.
///
/// JSON goes through the token's serde implementation. The binary form
/// stores each token as a length-prefixed byte string, so a token type also
/// defines how it maps to and from raw bytes.
pub trait WireToken: Sized + Serialize + DeserializeOwned {
    /// Name used in decode errors.
    const TYPE_NAME: &'static str;

    /// Returns the bytes stored for this token.
    fn as_wire_bytes(&self) -> &[u8];

    /// Rebuilds a token from stored bytes, or `None` when they are invalid.
    fn from_wire_bytes(bytes: &[u8]) -> Option<Self>;
}

impl WireToken for String {
    const TYPE_NAME: &'static str = "UTF-8 string";

    fn as_wire_bytes(&self) -> &[u8] {
        self.as_bytes()
    }

    fn from_wire_bytes(bytes: &[u8]) -> Option<Self> {
        std::str::from_utf8(bytes).ok().map(str::to_owned)
    }
}

impl WireToken for Vec<u8> {
    const TYPE_NAME: &'static str = "byte string";

    fn as_wire_bytes(&self) -> &[u8] {
        self
    }

    fn from_wire_bytes(bytes: &[u8]) -> Option<Self> {
        Some(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_reject_invalid_utf8() {
        assert_eq!(String::from_wire_bytes(b"ok"), Some("ok".to_owned()));
        assert_eq!(String::from_wire_bytes(&[0xC3, 0x28]), None);
    }

    #[test]
    fn byte_strings_accept_anything() {
        let token = vec![0u8, 0xFF, 0x80];
        assert_eq!(<Vec<u8>>::from_wire_bytes(token.as_wire_bytes()), Some(token));
    }
}
