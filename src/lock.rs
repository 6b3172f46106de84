//! Lock file acquisition and release.
//!
//! A lock file is created using **create_new** semantics (exclusive
//! create) so that of any number of contenders racing for the same path,
//! exactly one succeeds; everyone else fails fast with a
//! [`LockError`]. There is no retrying, blocking, or queueing in here:
//! callers that want to wait write their own retry loop over failed
//! `Result`s.
//!
//! # File layout
//!
//! Byte offset 0 holds a reserved marker byte that is not part of the
//! identity text. The rendered content template follows from offset 1,
//! terminated by a newline. Diagnostic readers seek past offset 0 before
//! reading (see [`holder_content`]).
//!
//! # Release
//!
//! [`LockFile::close`] closes the descriptor and unlinks the file. The
//! descriptor stays open for the whole lifetime of the lock so the OS
//! keeps it alive even if the directory entry is manipulated externally.
//! An unreleased [`LockFile`] releases itself on drop; unlink failures are
//! logged, never raised.

use crate::error::{LockError, Result};
use crate::identity::{HolderIdentity, Identity};
use crate::sink::{FailureSink, TracingSink};
use crate::template::ContentTemplate;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Reserved byte written at offset 0; identity text starts at offset 1.
const MARKER_BYTE: u8 = b' ';

/// Rendered content longer than this is clipped in failure log records.
const LOGGED_CONTENT_MAX: usize = 256;

/// A held cross-process exclusive lock.
///
/// Created only by successful acquisition; holds the lock file's open
/// descriptor for its whole lifetime. Owned exclusively by the acquiring
/// call site: to share "lock is held" across units of work, pass the
/// handle itself rather than re-deriving it from the path.
#[derive(Debug)]
pub struct LockFile {
    /// Path of the lock file on disk.
    path: PathBuf,

    /// Open descriptor; `None` once released.
    file: Option<File>,
}

impl LockFile {
    /// Acquire the lock at `path` with no identity payload.
    ///
    /// Equivalent to [`LockFile::acquire_with_template`] with an empty
    /// template.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        Self::acquire_with(
            path,
            &ContentTemplate::default(),
            &Identity::current(),
            &TracingSink,
        )
    }

    /// Acquire the lock at `path`, stamping it with `template` rendered
    /// against the current process identity.
    ///
    /// Recognized fields are `{pid}` and `{hostname}`; see
    /// [`ContentTemplate`] for the unrecognized-field policy. Failure
    /// diagnostics go to the default [`TracingSink`].
    pub fn acquire_with_template(path: impl Into<PathBuf>, template: &str) -> Result<Self> {
        Self::acquire_with(
            path,
            &ContentTemplate::parse(template),
            &Identity::current(),
            &TracingSink,
        )
    }

    /// Acquire the lock at `path` with every collaborator supplied
    /// explicitly.
    ///
    /// The identity is rendered into the template once, here, at
    /// acquisition time. On failure of any kind the `sink` receives
    /// exactly one diagnostic record and the call returns a
    /// [`LockError`] carrying the path; no file is left behind that this
    /// call created.
    pub fn acquire_with(
        path: impl Into<PathBuf>,
        template: &ContentTemplate,
        identity: &Identity,
        sink: &dyn FailureSink,
    ) -> Result<Self> {
        let path = path.into();
        let content = template.render(identity);

        // The exclusive create is the single correctness-critical
        // operation: create-if-absent, fail-if-present, atomic at the OS
        // level. Never check-then-create.
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(source) => {
                report_failure(&path, &content, sink);
                return Err(LockError::new(path, source));
            }
        };

        let mut body = Vec::with_capacity(content.len() + 2);
        body.push(MARKER_BYTE);
        body.extend_from_slice(content.as_bytes());
        body.push(b'\n');

        if let Err(source) = file.write_all(&body).and_then(|()| file.sync_all()) {
            // No partial success: a lock file we created but could not
            // stamp must not stay behind to block other contenders.
            drop(file);
            let _ = std::fs::remove_file(&path);
            report_failure(&path, &content, sink);
            return Err(LockError::new(path, source));
        }

        Ok(Self {
            path,
            file: Some(file),
        })
    }

    /// Path of the lock file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock: close the descriptor and unlink the file, making
    /// the path available to the next contender.
    ///
    /// Never blocks and never fails the caller: cleanup errors (say, an
    /// external process raced the unlink) are logged at warn level and
    /// swallowed, since failing to tidy up must not mask the work already
    /// done under the lock.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(file) = self.file.take() {
            // Close before unlinking so the descriptor is gone by the
            // time the name is free for the next contender.
            drop(file);
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!(
                    "failed to remove lock file '{}': {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        self.release();
    }
}

/// Emit the one diagnostic record for a failed acquisition.
///
/// The record carries the attempting contender's own rendered content;
/// the current holder's stamp is only parsed, best-effort, into structured
/// identity fields.
fn report_failure(path: &Path, content: &str, sink: &dyn FailureSink) {
    let holder = HolderIdentity::parse(&holder_content(path));
    let (clipped, overflow) = clip(content);
    sink.lock_failed(path, clipped, overflow, &holder);
}

/// Read the identity text stamped into an existing lock file, best-effort.
///
/// Seeks past the reserved marker byte at offset 0 and trims the trailing
/// line terminator. Tolerates absent, partially written, or garbled files
/// by returning an empty string; never errors.
pub fn holder_content(path: &Path) -> String {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return String::new(),
    };
    if file.seek(SeekFrom::Start(1)).is_err() {
        return String::new();
    }
    let mut raw = Vec::new();
    if file.read_to_end(&mut raw).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&raw).trim().to_string()
}

fn clip(content: &str) -> (&str, &'static str) {
    if content.len() <= LOGGED_CONTENT_MAX {
        return (content, "");
    }
    let mut end = LOGGED_CONTENT_MAX;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    (&content[..end], "...")
}
