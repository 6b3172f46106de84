//! Diagnostic sink for acquisition failures.
//!
//! The contention log is the one observable side effect of a failed
//! acquisition besides filesystem state, so the sink is an injected
//! collaborator rather than a hidden global: callers (and tests) pass any
//! [`FailureSink`] implementation to [`crate::LockFile::acquire_with`].
//! The default is [`TracingSink`], which emits one `tracing` error record.

use crate::identity::HolderIdentity;
use std::path::Path;

/// Receives the single diagnostic record emitted when an acquisition fails.
pub trait FailureSink: Send + Sync {
    /// Called exactly once per failed acquisition.
    ///
    /// * `path` — the contested lock file path.
    /// * `content` — the *attempting* contender's own rendered content
    ///   (not the holder's), clipped to a bounded length.
    /// * `overflow` — `"..."` when `content` was clipped, empty otherwise;
    ///   appended directly after `content` in the rendered message.
    /// * `holder` — identity fields parsed best-effort from the existing
    ///   lock file; empty fields when the file was unreadable.
    fn lock_failed(&self, path: &Path, content: &str, overflow: &str, holder: &HolderIdentity);
}

/// Default sink: forwards the contention record to `tracing` at error
/// level, with the holder's parsed identity attached as structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl FailureSink for TracingSink {
    fn lock_failed(&self, path: &Path, content: &str, overflow: &str, holder: &HolderIdentity) {
        tracing::error!(
            holder_pid = holder.pid,
            holder_hostname = holder.hostname.as_deref(),
            "Error locking file {}; content: \"{}{}\"",
            path.display(),
            content,
            overflow,
        );
    }
}
