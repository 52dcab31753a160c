//! Integration tests running every strategy over the bundled document
//! revisions.
//!
//! ## Test Coverage
//!
//! - Round trip of `diff` then `apply_patch` for lines, sentences, and words
//! - Plain and indexed searches agreeing on real documents
//! - Structural invariants of every produced script
//! - Reverse direction (new to old) round trips

use engine::{DiffStrategy, PreciseDiff, Strategy, apply_patch, diff, diff_indexed, fast_diff};
use test_support::split_cases;

#[test]
fn every_strategy_round_trips_every_fixture() {
    for (label, old, new) in split_cases() {
        for strategy in Strategy::ALL {
            let script = strategy.diff(&old, &new);
            let patched = apply_patch(&old, &script)
                .unwrap_or_else(|error| panic!("{label}/{strategy}: {error}"));
            assert_eq!(patched, new, "{label}/{strategy}");
        }
    }
}

#[test]
fn reverse_direction_round_trips() {
    for (label, old, new) in split_cases() {
        for strategy in Strategy::ALL {
            let script = strategy.diff(&new, &old);
            assert_eq!(apply_patch(&new, &script).as_ref(), Ok(&old), "{label}/{strategy}");
        }
    }
}

#[test]
fn indexed_and_precise_produce_identical_scripts() {
    for (label, old, new) in split_cases() {
        assert_eq!(diff(&old, &new), diff_indexed(&old, &new), "{label}");
    }
}

#[test]
fn scripts_satisfy_structural_invariants() {
    for (label, old, new) in split_cases() {
        for strategy in Strategy::ALL {
            let script = strategy.diff(&old, &new);
            assert_eq!(script.validate(old.len()), Ok(()), "{label}/{strategy}");
            assert!(
                script.iter().all(|operation| !operation.is_noop()),
                "{label}/{strategy}"
            );
            assert_eq!(script.target_len(old.len()), Some(new.len()), "{label}/{strategy}");
        }
    }
}

#[test]
fn fast_emits_at_most_one_operation() {
    for (label, old, new) in split_cases() {
        assert!(fast_diff(&old, &new).len() <= 1, "{label}");
    }
}

#[test]
fn precise_is_never_coarser_than_fast_in_deletions() {
    for (label, old, new) in split_cases() {
        let precise = diff(&old, &new);
        let fast = fast_diff(&old, &new);
        assert!(
            precise.deleted_tokens() <= fast.deleted_tokens(),
            "{label}: precise deletes {} vs fast {}",
            precise.deleted_tokens(),
            fast.deleted_tokens()
        );
    }
}

#[test]
fn narrow_horizon_still_round_trips() {
    for (label, old, new) in split_cases() {
        let script = PreciseDiff::new().with_horizon(1).diff(&old, &new);
        assert_eq!(apply_patch(&old, &script).as_ref(), Ok(&new), "{label}");
    }
}
