//! Splits document revisions into tokens and joins them back.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Token boundary used to split input files.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Delimiter {
    /// One token per line.
    #[default]
    Lines,
    /// One token per `.`-terminated sentence.
    Sentences,
    /// One token per space-separated word.
    Words,
}

impl Delimiter {
    /// Every delimiter, in help-text order.
    pub const ALL: [Self; 3] = [Self::Lines, Self::Sentences, Self::Words];

    /// Name accepted by `--split`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Sentences => "sentences",
            Self::Words => "words",
        }
    }

    /// Separator text between tokens.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "\n",
            Self::Sentences => ".",
            Self::Words => " ",
        }
    }

    /// Lines and sentences end with their delimiter; words are only
    /// separated by it.
    const fn terminates(self) -> bool {
        matches!(self, Self::Lines | Self::Sentences)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a delimiter name is not recognised.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown split '{name}' (expected lines, sentences, or words)")]
pub struct ParseDelimiterError {
    name: String,
}

impl FromStr for Delimiter {
    type Err = ParseDelimiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|delimiter| delimiter.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseDelimiterError {
                name: name.to_owned(),
            })
    }
}

/// Splits `text` into tokens, dropping empty and whitespace-only pieces.
#[must_use]
pub fn split(text: &str, delimiter: Delimiter) -> Vec<String> {
    text.split(delimiter.as_str())
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

/// Rebuilds text from `tokens`.
///
/// Line and sentence tokens each get their delimiter appended, so a file read
/// with [`split`] comes back with its trailing newline or full stop.
#[must_use]
pub fn join(tokens: &[String], delimiter: Delimiter) -> String {
    let separator = delimiter.as_str();
    if delimiter.terminates() {
        let len = tokens.iter().map(|token| token.len() + separator.len()).sum();
        let mut text = String::with_capacity(len);
        for token in tokens {
            text.push_str(token);
            text.push_str(separator);
        }
        text
    } else {
        tokens.join(separator)
    }
}
