//! Cross-process exclusive lock files with holder identity stamping.
//!
//! A single named lock file is the mutual-exclusion primitive: acquisition
//! atomically creates it (create-if-absent, fail-if-present), stamps it
//! with the holder's identity, and keeps the descriptor open; release
//! closes and unlinks it. Contention never blocks, it fails fast with a
//! [`LockError`] — retry and backoff policy belongs entirely to the
//! caller.
//!
//! The lock is advisory: nothing stops a process from opening the guarded
//! resource directly, and no fairness or ordering among waiters is
//! promised. A lock file left behind by a crashed holder looks exactly
//! like a live hold; reclaiming stale locks is an operator concern, not
//! this crate's.
//!
//! # Example
//!
//! ```no_run
//! use exclusive_control::LockFile;
//! use std::time::Duration;
//!
//! // Fail-fast acquisition, retried by the caller:
//! let lock = loop {
//!     match LockFile::acquire_with_template("f.lock", "{pid}/{hostname}") {
//!         Ok(lock) => break lock,
//!         Err(_) => std::thread::sleep(Duration::from_millis(10)),
//!     }
//! };
//!
//! // ... work on the guarded resource ...
//!
//! lock.close();
//! ```

pub mod error;
pub mod identity;
pub mod lock;
pub mod sink;
pub mod template;

#[cfg(test)]
mod test_support;

pub use error::{LockError, Result};
pub use identity::{HolderIdentity, Identity};
pub use lock::{LockFile, holder_content};
pub use sink::{FailureSink, TracingSink};
pub use template::{ContentTemplate, Field};
