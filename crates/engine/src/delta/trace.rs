//! Structured tracing for diff and patch operations.
//!
//! Every function is compiled behind the `tracing` feature flag and collapses
//! to an inline no-op when the feature is disabled, so the diff loops pay
//! nothing for instrumentation in default builds. Events describe progress
//! only; failures are reported through return values.

use crate::delta::script::EditScript;
use crate::delta::strategy::Strategy;
use crate::delta::sync::SyncPoint;

#[cfg(feature = "tracing")]
const DIFF_TARGET: &str = "seqdelta::diff";
#[cfg(feature = "tracing")]
const SYNC_TARGET: &str = "seqdelta::sync";
#[cfg(feature = "tracing")]
const PATCH_TARGET: &str = "seqdelta::patch";

/// Traces the residual windows a strategy is about to scan.
///
/// # Arguments
///
/// * `strategy` - Strategy producing the script
/// * `old_len` / `new_len` - Full sequence lengths
/// * `prefix` / `suffix` - Lengths of the trimmed common affixes
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_diff_start(
    strategy: Strategy,
    old_len: usize,
    new_len: usize,
    prefix: usize,
    suffix: usize,
) {
    tracing::debug!(
        target: DIFF_TARGET,
        strategy = %strategy,
        old_len,
        new_len,
        prefix,
        suffix,
        "diff: scanning residual windows"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_diff_start(
    _strategy: Strategy,
    _old_len: usize,
    _new_len: usize,
    _prefix: usize,
    _suffix: usize,
) {
}

/// Traces a resolved divergence.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_sync_point(old_pos: usize, new_pos: usize, sync: SyncPoint) {
    tracing::trace!(
        target: SYNC_TARGET,
        old_pos,
        new_pos,
        sync_old = sync.old,
        sync_new = sync.new,
        "sync: divergence resolved"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_sync_point(_old_pos: usize, _new_pos: usize, _sync: SyncPoint) {}

/// Traces the summary of a finished diff.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_diff_complete<T>(strategy: Strategy, script: &EditScript<T>) {
    tracing::debug!(
        target: DIFF_TARGET,
        strategy = %strategy,
        operations = script.len(),
        deleted = script.deleted_tokens(),
        inserted = script.inserted_tokens(),
        "diff: complete"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_diff_complete<T>(_strategy: Strategy, _script: &EditScript<T>) {}

/// Traces a successfully applied script.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_patch_applied(operations: usize, original_len: usize, result_len: usize) {
    tracing::debug!(
        target: PATCH_TARGET,
        operations,
        original_len,
        result_len,
        "patch: applied"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_patch_applied(_operations: usize, _original_len: usize, _result_len: usize) {}
