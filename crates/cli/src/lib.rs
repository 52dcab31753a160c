#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `seqdelta` command-line front-end. It tokenizes two
//! revisions of a text file, computes an edit script with one of the
//! [`engine`] strategies, and stores it with the [`protocol`] codec. Four
//! commands are available: `diff`, `apply`, `verify`, and `bench`.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard output and
//! error, so tests drive it without spawning a process. A
//! [`clap`](https://docs.rs/clap/) builder command performs the parse;
//! [`parse_args`] turns the matches into a [`ParsedArgs`] value and
//! [`command::execute`] performs the work.
//!
//! # Invariants
//!
//! - `run` never panics; I/O and codec failures surface as exit codes.
//! - Patch data and reports go to stdout. Diagnostics and tracing output go
//!   to stderr.
//! - Without `--format`, patches are written as JSON and read back in
//!   whichever format their leading bytes announce.
//!
//! # Errors
//!
//! | Code | Meaning                                           |
//! |------|---------------------------------------------------|
//! | 0    | Success                                           |
//! | 1    | Invalid command-line usage                        |
//! | 2    | An input could not be read or an output written   |
//! | 3    | The patch could not be encoded, decoded, or applied |
//! | 4    | `verify` or `bench` found a patch that does not reproduce NEW |
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["seqdelta", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(!stdout.is_empty());
//! assert!(stderr.is_empty());
//! ```

pub mod command;
mod error;
mod tokenize;

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use engine::{MAX_HORIZON, Strategy, SyncSearch};
use logging::VerbosityConfig;
use protocol::WireFormat;

pub use command::{Action, Settings};
pub use error::{CliError, EXIT_IO, EXIT_MISMATCH, EXIT_OK, EXIT_PATCH, EXIT_USAGE};
pub use tokenize::{Delimiter, ParseDelimiterError, join, split};

/// Program name used when the argument list is empty.
const PROGRAM_NAME: &str = "seqdelta";

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Default repetitions for `bench`.
const DEFAULT_ITERATIONS: &str = "20";

const AFTER_HELP: &str = "\
Exit status:
  0  success
  1  invalid usage
  2  an input could not be read or an output written
  3  the patch could not be encoded, decoded, or applied
  4  the patch did not reproduce the new revision

Set SEQDELTA_LOG to a tracing filter (for example seqdelta::sync=trace) to
override -v and --debug.";

/// Result of parsing the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedArgs {
    /// Command to run.
    pub action: Action,
    /// Options shared by every command.
    pub settings: Settings,
    /// Log levels requested with `-v`, `-q`, and `--debug`.
    pub verbosity: VerbosityConfig,
}

fn path_arg(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name(value_name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
}

fn output_arg(help: &'static str) -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_name("FILE")
        .help(help)
        .value_parser(clap::value_parser!(PathBuf))
}

fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compute, apply, and check token-level patches between document revisions")
        .after_help(AFTER_HELP)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .short('s')
                .value_name("NAME")
                .help("Diff strategy: precise, indexed, or fast.")
                .global(true)
                .default_value("precise")
                .value_parser(clap::value_parser!(Strategy)),
        )
        .arg(
            Arg::new("split")
                .long("split")
                .value_name("UNIT")
                .help("Token boundary: lines, sentences, or words.")
                .global(true)
                .default_value("lines")
                .value_parser(clap::value_parser!(Delimiter)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_name("FORMAT")
                .help("Patch encoding: json or binary (default: json, detected on read).")
                .global(true)
                .value_parser(clap::value_parser!(WireFormat)),
        )
        .arg(
            Arg::new("horizon")
                .long("horizon")
                .value_name("N")
                .help("Offsets scanned when realigning after a change.")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..=MAX_HORIZON as u64)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity; repeat for more detail.")
                .global(true)
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Log errors only.")
                .global(true)
                .conflicts_with("verbose")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Per-subsystem log levels, e.g. sync3,codec2.")
                .global(true)
                .action(ArgAction::Append),
        )
        .subcommand(
            Command::new("diff")
                .about("Write the patch that turns OLD into NEW.")
                .arg(path_arg("old", "OLD", "Older revision."))
                .arg(path_arg("new", "NEW", "Newer revision."))
                .arg(output_arg("Write the patch to FILE instead of stdout.")),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply PATCH to OLD and write the result.")
                .arg(path_arg("old", "OLD", "Revision the patch was computed against."))
                .arg(path_arg("patch", "PATCH", "Encoded patch."))
                .arg(output_arg("Write the patched text to FILE instead of stdout.")),
        )
        .subcommand(
            Command::new("verify")
                .about("Check that the encoded patch from OLD reproduces NEW.")
                .arg(path_arg("old", "OLD", "Older revision."))
                .arg(path_arg("new", "NEW", "Newer revision.")),
        )
        .subcommand(
            Command::new("bench")
                .about("Time every strategy on OLD and NEW.")
                .arg(path_arg("old", "OLD", "Older revision."))
                .arg(path_arg("new", "NEW", "Newer revision."))
                .arg(
                    Arg::new("iterations")
                        .long("iterations")
                        .short('n')
                        .value_name("N")
                        .help("Repetitions per strategy.")
                        .default_value(DEFAULT_ITERATIONS)
                        .value_parser(clap::value_parser!(u32).range(1..)),
                ),
        )
}

fn path(matches: &ArgMatches, name: &str) -> PathBuf {
    matches.get_one::<PathBuf>(name).cloned().unwrap_or_default()
}

fn parse_action(name: &str, matches: &ArgMatches) -> Option<Action> {
    let action = match name {
        "diff" => Action::Diff {
            old: path(matches, "old"),
            new: path(matches, "new"),
            output: matches.get_one::<PathBuf>("output").cloned(),
        },
        "apply" => Action::Apply {
            old: path(matches, "old"),
            patch: path(matches, "patch"),
            output: matches.get_one::<PathBuf>("output").cloned(),
        },
        "verify" => Action::Verify {
            old: path(matches, "old"),
            new: path(matches, "new"),
        },
        "bench" => Action::Bench {
            old: path(matches, "old"),
            new: path(matches, "new"),
            iterations: matches.get_one::<u32>("iterations").copied().unwrap_or(1),
        },
        _ => return None,
    };
    Some(action)
}

fn parse_verbosity(matches: &ArgMatches) -> Result<VerbosityConfig, String> {
    let mut verbosity = if matches.get_flag("quiet") {
        VerbosityConfig::quiet()
    } else {
        VerbosityConfig::from_verbose_level(matches.get_count("verbose"))
    };
    if let Some(flags) = matches.get_many::<String>("debug") {
        for tokens in flags {
            verbosity.apply_flags(tokens)?;
        }
    }
    Ok(verbosity)
}

/// Parses `arguments` (program name first) into a [`ParsedArgs`].
///
/// Help and version requests come back as errors whose
/// [`use_stderr`](clap::Error::use_stderr) is `false`.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let matches = clap_command().try_get_matches_from(args)?;
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Err(clap_command().error(ErrorKind::MissingSubcommand, "a command is required"));
    };
    let action = parse_action(name, sub_matches).ok_or_else(|| {
        clap_command().error(
            ErrorKind::InvalidSubcommand,
            format!("unrecognized command '{name}'"),
        )
    })?;

    // Global arguments are propagated to the subcommand's matches.
    let search = sub_matches
        .get_one::<u64>("horizon")
        .map_or_else(SyncSearch::new, |&horizon| {
            SyncSearch::new().with_horizon(horizon as usize)
        });
    let settings = Settings {
        strategy: sub_matches
            .get_one::<Strategy>("strategy")
            .copied()
            .unwrap_or_default(),
        delimiter: sub_matches
            .get_one::<Delimiter>("split")
            .copied()
            .unwrap_or_default(),
        format: sub_matches.get_one::<WireFormat>("format").copied(),
        search,
    };

    let verbosity = parse_verbosity(sub_matches).map_err(|message| {
        clap_command().error(
            ErrorKind::InvalidValue,
            format!("invalid --debug flags: {message}"),
        )
    })?;

    Ok(ParsedArgs {
        action,
        settings,
        verbosity,
    })
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned; see the crate documentation for the
/// failure codes.
#[allow(clippy::module_name_repetitions)]
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return report_parse_error(&error, stdout, stderr),
    };

    logging::init_tracing(parsed.verbosity.clone());
    logging::trace_cli!(
        strategy = %parsed.settings.strategy,
        split = %parsed.settings.delimiter,
        horizon = parsed.settings.search.horizon(),
        "starting {}",
        parsed.action.name()
    );

    match command::execute(&parsed.action, &parsed.settings, stdout) {
        Ok(()) => EXIT_OK,
        Err(error) => {
            tracing::debug!(target: "seqdelta::cli", ?error, "command failed");
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            error.exit_code()
        }
    }
}

fn report_parse_error<Out: Write, Err: Write>(
    error: &clap::Error,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32 {
    let rendered = error.render().to_string();
    if error.use_stderr() {
        let _ = write!(stderr, "{rendered}");
        EXIT_USAGE
    } else {
        let _ = write!(stdout, "{rendered}");
        EXIT_OK
    }
}

/// Converts a status returned by [`run`] into an [`ExitCode`](std::process::ExitCode).
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
