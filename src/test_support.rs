//! Shared helpers for unit tests.

use crate::identity::HolderIdentity;
use crate::sink::FailureSink;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One captured acquisition-failure record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FailureRecord {
    pub(crate) path: PathBuf,
    pub(crate) content: String,
    pub(crate) overflow: String,
    pub(crate) holder: HolderIdentity,
}

/// A [`FailureSink`] that records every diagnostic instead of logging it,
/// so tests can assert on exactly what was emitted.
#[derive(Debug, Default)]
pub(crate) struct CapturingSink {
    records: Mutex<Vec<FailureRecord>>,
}

impl CapturingSink {
    pub(crate) fn records(&self) -> Vec<FailureRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl FailureSink for CapturingSink {
    fn lock_failed(&self, path: &Path, content: &str, overflow: &str, holder: &HolderIdentity) {
        self.records
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(FailureRecord {
                path: path.to_path_buf(),
                content: content.to_string(),
                overflow: overflow.to_string(),
                holder: holder.clone(),
            });
    }
}
