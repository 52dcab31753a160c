//! Implementations of the `diff`, `apply`, `verify`, and `bench` commands.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use engine::{EditScript, Strategy, SyncSearch, apply_patch};
use protocol::{WireFormat, decode_script, detect_format, encode_script};

use crate::error::CliError;
use crate::tokenize::{Delimiter, join, split};

/// Options shared by every command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Diff strategy used to compute patches.
    pub strategy: Strategy,
    /// Token boundary for input and output files.
    pub delimiter: Delimiter,
    /// Wire format; `None` writes JSON and detects the format when reading.
    pub format: Option<WireFormat>,
    /// Synchronization search configuration.
    pub search: SyncSearch,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            delimiter: Delimiter::default(),
            format: None,
            search: SyncSearch::new(),
        }
    }
}

impl Settings {
    fn output_format(&self) -> WireFormat {
        self.format.unwrap_or_default()
    }

    fn diff(&self, old: &[String], new: &[String]) -> EditScript<String> {
        self.strategy.diff_with_search(self.search, old, new)
    }
}

/// Command selected on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Writes the patch turning `old` into `new`.
    Diff {
        /// Older revision.
        old: PathBuf,
        /// Newer revision.
        new: PathBuf,
        /// Patch destination; stdout when absent.
        output: Option<PathBuf>,
    },
    /// Writes `old` with `patch` applied.
    Apply {
        /// Revision the patch was computed against.
        old: PathBuf,
        /// Encoded patch.
        patch: PathBuf,
        /// Destination; stdout when absent.
        output: Option<PathBuf>,
    },
    /// Checks that the encoded patch reproduces `new`.
    Verify {
        /// Older revision.
        old: PathBuf,
        /// Newer revision.
        new: PathBuf,
    },
    /// Times every strategy on the pair.
    Bench {
        /// Older revision.
        old: PathBuf,
        /// Newer revision.
        new: PathBuf,
        /// Repetitions per strategy.
        iterations: u32,
    },
}

impl Action {
    /// Subcommand name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Diff { .. } => "diff",
            Self::Apply { .. } => "apply",
            Self::Verify { .. } => "verify",
            Self::Bench { .. } => "bench",
        }
    }
}

/// Runs `action`, writing results to `stdout`.
pub fn execute<Out: Write>(
    action: &Action,
    settings: &Settings,
    stdout: &mut Out,
) -> Result<(), CliError> {
    match action {
        Action::Diff { old, new, output } => {
            diff_files(settings, old, new, output.as_deref(), stdout)
        }
        Action::Apply { old, patch, output } => {
            apply_files(settings, old, patch, output.as_deref(), stdout)
        }
        Action::Verify { old, new } => verify_files(settings, old, new, stdout),
        Action::Bench {
            old,
            new,
            iterations,
        } => bench_files(settings, old, new, *iterations, stdout),
    }
}

fn read_tokens(path: &Path, delimiter: Delimiter) -> Result<Vec<String>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = split(&text, delimiter);
    logging::trace_cli!(
        path = %path.display(),
        split = %delimiter,
        tokens = tokens.len(),
        "tokenized input"
    );
    Ok(tokens)
}

fn write_output<Out: Write>(
    output: Option<&Path>,
    bytes: &[u8],
    stdout: &mut Out,
) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, bytes)
            .map_err(|source| CliError::write_to(path.display().to_string(), source)),
        None => stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .map_err(|source| CliError::write_to("stdout", source)),
    }
}

fn diff_files<Out: Write>(
    settings: &Settings,
    old: &Path,
    new: &Path,
    output: Option<&Path>,
    stdout: &mut Out,
) -> Result<(), CliError> {
    let old_tokens = read_tokens(old, settings.delimiter)?;
    let new_tokens = read_tokens(new, settings.delimiter)?;

    let script = settings.diff(&old_tokens, &new_tokens);
    logging::trace_diff!(
        strategy = %settings.strategy,
        operations = script.len(),
        "computed patch"
    );

    let bytes = encode_script(&script, settings.output_format())?;
    write_output(output, &bytes, stdout)
}

fn apply_files<Out: Write>(
    settings: &Settings,
    old: &Path,
    patch: &Path,
    output: Option<&Path>,
    stdout: &mut Out,
) -> Result<(), CliError> {
    let old_tokens = read_tokens(old, settings.delimiter)?;
    let bytes = fs::read(patch).map_err(|source| CliError::Read {
        path: patch.to_path_buf(),
        source,
    })?;

    let format = settings.format.unwrap_or_else(|| detect_format(&bytes));
    let script: EditScript<String> =
        decode_script(&bytes, format).map_err(|source| CliError::Decode {
            path: patch.to_path_buf(),
            source,
        })?;

    let patched = apply_patch(&old_tokens, &script).map_err(|source| CliError::Patch {
        path: old.to_path_buf(),
        source,
    })?;
    logging::trace_patch!(
        format = %format,
        operations = script.len(),
        tokens = patched.len(),
        "applied patch"
    );

    write_output(output, join(&patched, settings.delimiter).as_bytes(), stdout)
}

/// Diffs, encodes, decodes, and applies, returning the encoded size.
fn round_trip(
    settings: &Settings,
    strategy: Strategy,
    old: &[String],
    new: &[String],
) -> Result<(EditScript<String>, usize), CliError> {
    let format = settings.output_format();
    let script = strategy.diff_with_search(settings.search, old, new);
    let bytes = encode_script(&script, format)?;
    let decoded: EditScript<String> =
        decode_script(&bytes, format).map_err(|source| CliError::Decode {
            path: PathBuf::from("<encoded patch>"),
            source,
        })?;
    let patched = apply_patch(old, &decoded).map_err(|source| CliError::Patch {
        path: PathBuf::from("<old revision>"),
        source,
    })?;

    if patched != new {
        return Err(CliError::Mismatch {
            strategy,
            expected: new.len(),
            actual: patched.len(),
        });
    }
    Ok((script, bytes.len()))
}

fn verify_files<Out: Write>(
    settings: &Settings,
    old: &Path,
    new: &Path,
    stdout: &mut Out,
) -> Result<(), CliError> {
    let old_tokens = read_tokens(old, settings.delimiter)?;
    let new_tokens = read_tokens(new, settings.delimiter)?;

    let (script, size) = round_trip(settings, settings.strategy, &old_tokens, &new_tokens)?;
    writeln!(
        stdout,
        "ok: {} operation(s), {size} byte(s) {} patch ({} strategy, split by {})",
        script.len(),
        settings.output_format(),
        settings.strategy,
        settings.delimiter,
    )
    .map_err(|source| CliError::write_to("stdout", source))
}

fn bench_files<Out: Write>(
    settings: &Settings,
    old: &Path,
    new: &Path,
    iterations: u32,
    stdout: &mut Out,
) -> Result<(), CliError> {
    let old_tokens = read_tokens(old, settings.delimiter)?;
    let new_tokens = read_tokens(new, settings.delimiter)?;
    let iterations = iterations.max(1);

    let mut table = format!(
        "{:<10} {:>6} {:>8} {:>9} {:>9} {:>12} {:>12}\n",
        "strategy", "ops", "deleted", "inserted", "bytes", "diff (us)", "apply (us)"
    );
    for strategy in Strategy::ALL {
        let (script, size) = round_trip(settings, strategy, &old_tokens, &new_tokens)?;

        let diff_time = time(iterations, || {
            strategy.diff_with_search(settings.search, &old_tokens, &new_tokens)
        });
        let apply_time = time(iterations, || apply_patch(&old_tokens, &script));

        table.push_str(&format!(
            "{:<10} {:>6} {:>8} {:>9} {:>9} {:>12.1} {:>12.1}\n",
            strategy.name(),
            script.len(),
            script.deleted_tokens(),
            script.inserted_tokens(),
            size,
            micros(diff_time),
            micros(apply_time),
        ));
    }

    stdout
        .write_all(table.as_bytes())
        .map_err(|source| CliError::write_to("stdout", source))
}

/// Mean wall-clock time of `iterations` calls to `work`.
fn time<R>(iterations: u32, mut work: impl FnMut() -> R) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(work());
    }
    start.elapsed() / iterations
}

fn micros(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}
