//! Error types for lock acquisition.
//!
//! Uses thiserror for derive macros. Acquisition is the only fallible
//! operation in this crate: release-time cleanup failures are logged and
//! swallowed rather than surfaced (see [`crate::LockFile::close`]).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A lock could not be acquired.
///
/// Raised synchronously from acquisition whenever the exclusive create
/// fails, whether the lock file is already present, the path is invalid,
/// or the OS denied the operation. Carries the contested path; the
/// underlying OS error is attached as the source.
#[derive(Error, Debug)]
#[error("couldn't lock '{}'", path.display())]
pub struct LockError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

impl LockError {
    pub(crate) fn new(path: PathBuf, source: std::io::Error) -> Self {
        Self { path, source }
    }

    /// The path of the lock file that could not be acquired.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the failure was contention (the lock file already existed)
    /// rather than some other OS-level denial.
    pub fn is_contended(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::AlreadyExists
    }
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;
