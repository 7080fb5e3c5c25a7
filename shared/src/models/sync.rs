// shared/src/models/sync.rs
use serde::{Deserialize, Serialize};

/// Aggregate outcome of a sync run
///
/// `success` is true only when no record failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub success: bool,
    pub synced_count: u32,
    pub error_count: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl Default for SyncResult {
    fn default() -> Self {
        Self {
            success: true,
            synced_count: 0,
            error_count: 0,
            errors: Vec::new(),
        }
    }
}

impl SyncResult {
    /// Result of a run that aborted before processing any record
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            synced_count: 0,
            error_count: 1,
            errors: vec![message.into()],
        }
    }

    pub fn record_success(&mut self) {
        self.synced_count += 1;
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.error_count += 1;
        self.errors.push(message.into());
        self.success = false;
    }

    /// Fold another phase's counts and messages into this one
    pub fn merge(&mut self, other: SyncResult) {
        self.synced_count += other.synced_count;
        self.error_count += other.error_count;
        self.errors.extend(other.errors);
        self.success = self.success && other.success;
    }
}
