use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Interchange encodings for an [`EditScript`](engine::EditScript).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum WireFormat {
    /// Array of `[index, deleteCount, insertions]` triples.
    #[default]
    Json,
    /// Compact length-prefixed binary form.
    Binary,
}

impl WireFormat {
    /// Every supported format.
    pub const ALL: [Self; 2] = [Self::Json, Self::Binary];

    /// Returns the lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown script format '{name}' (expected json or binary)")]
pub struct ParseWireFormatError {
    name: String,
}

impl FromStr for WireFormat {
    type Err = ParseWireFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseWireFormatError {
                name: value.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for format in WireFormat::ALL {
            assert_eq!(format.to_string().parse::<WireFormat>(), Ok(format));
        }
        assert_eq!("BINARY".parse::<WireFormat>(), Ok(WireFormat::Binary));
        assert!("yaml".parse::<WireFormat>().is_err());
    }
}
