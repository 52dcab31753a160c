use std::fs;

use assert_cmd::Command;
use cli::{Delimiter, join, split};
use predicates::prelude::*;
use test_support::{FIXTURES, FixtureDir};

fn seqdelta() -> Command {
    Command::new(env!("CARGO_BIN_EXE_seqdelta"))
}

#[test]
fn seqdelta_help_lists_usage() {
    seqdelta()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("seqdelta"));
}

#[test]
fn seqdelta_version_reports_package_version() {
    seqdelta()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn seqdelta_without_operands_shows_usage() {
    seqdelta()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn seqdelta_rejects_unknown_strategy() {
    seqdelta()
        .args(["--strategy", "optimal", "diff", "a", "b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("optimal"));
}

#[test]
fn missing_input_exits_with_io_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    let absent = dir.path().join("absent.md");
    seqdelta()
        .arg("verify")
        .arg(&absent)
        .arg(&absent)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn diff_and_apply_through_a_pipe() {
    for pair in FIXTURES {
        let dir = FixtureDir::new(pair).expect("fixture dir");
        let patch = seqdelta()
            .args(["--format", "binary", "diff"])
            .arg(dir.old())
            .arg(dir.new_revision())
            .output()
            .expect("run diff");
        assert!(patch.status.success(), "{}", pair.name);
        assert!(patch.stdout.starts_with(b"SQDS"));

        let patch_path = dir.path("changes.bin");
        fs::write(&patch_path, &patch.stdout).expect("write patch");

        seqdelta()
            .arg("apply")
            .arg(dir.old())
            .arg(&patch_path)
            .assert()
            .success()
            .stdout(predicate::str::diff(join(
                &split(pair.new, Delimiter::Lines),
                Delimiter::Lines,
            )));
    }
}

#[test]
fn corrupt_patch_exits_with_patch_status() {
    let dir = FixtureDir::new(&FIXTURES[0]).expect("fixture dir");
    let patch_path = dir.path("corrupt.bin");
    fs::write(&patch_path, b"SQDS\x01\x05\x00").expect("write patch");

    seqdelta()
        .arg("apply")
        .arg(dir.old())
        .arg(&patch_path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("corrupt.bin"));
}

#[test]
fn verify_and_bench_succeed_on_fixtures() {
    let dir = FixtureDir::new(&FIXTURES[2]).expect("fixture dir");

    seqdelta()
        .args(["--split", "words", "verify"])
        .arg(dir.old())
        .arg(dir.new_revision())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok: "));

    seqdelta()
        .arg("bench")
        .arg(dir.old())
        .arg(dir.new_revision())
        .args(["--iterations", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("precise"))
        .stdout(predicate::str::contains("indexed"))
        .stdout(predicate::str::contains("fast"));
}
