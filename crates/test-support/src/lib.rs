//! Shared fixtures for seqdelta tests and benchmarks.
//!
//! Each [`FixturePair`] holds two revisions of a small markdown document. The
//! pairs are compiled into the crate, so tests never depend on the working
//! directory.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Two revisions of the same document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixturePair {
    /// Short identifier used in test and benchmark names.
    pub name: &'static str,
    /// Older revision.
    pub old: &'static str,
    /// Newer revision.
    pub new: &'static str,
}

/// Every bundled fixture pair.
pub const FIXTURES: &[FixturePair] = &[
    FixturePair {
        name: "revision1",
        old: include_str!("../fixtures/revision1_old.md"),
        new: include_str!("../fixtures/revision1_new.md"),
    },
    FixturePair {
        name: "revision2",
        old: include_str!("../fixtures/revision2_old.md"),
        new: include_str!("../fixtures/revision2_new.md"),
    },
    FixturePair {
        name: "revision3",
        old: include_str!("../fixtures/revision3_old.md"),
        new: include_str!("../fixtures/revision3_new.md"),
    },
];

/// Delimiters the fixtures are split by, with their names.
pub const SPLITS: &[(&str, &str)] = &[("lines", "\n"), ("sentences", "."), ("words", " ")];

/// Splits `text` on `delimiter`, dropping empty and whitespace-only pieces.
pub fn split_fixture(text: &str, delimiter: &str) -> Vec<String> {
    text.split(delimiter)
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

/// Returns every fixture split every supported way, as `(label, old, new)`.
pub fn split_cases() -> Vec<(String, Vec<String>, Vec<String>)> {
    FIXTURES
        .iter()
        .flat_map(|pair| {
            SPLITS.iter().map(move |(split, delimiter)| {
                (
                    format!("{}_{split}", pair.name),
                    split_fixture(pair.old, delimiter),
                    split_fixture(pair.new, delimiter),
                )
            })
        })
        .collect()
}

/// Temporary directory holding one fixture pair as `old.md` and `new.md`.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct FixtureDir {
    dir: TempDir,
    old: PathBuf,
    new: PathBuf,
}

impl FixtureDir {
    /// Writes `pair` into a fresh temporary directory.
    pub fn new(pair: &FixturePair) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let old = dir.path().join("old.md");
        let new = dir.path().join("new.md");
        std::fs::write(&old, pair.old)?;
        std::fs::write(&new, pair.new)?;
        Ok(Self { dir, old, new })
    }

    /// Path of the older revision.
    pub fn old(&self) -> &Path {
        &self.old
    }

    /// Path of the newer revision.
    pub fn new_revision(&self) -> &Path {
        &self.new
    }

    /// Returns a path inside the directory for command output.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
