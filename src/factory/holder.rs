//! Holder metadata written into the coordination lock file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who currently holds the directory coordination lock.
///
/// Written into the lock file while the flock is held, purely so an
/// operator inspecting a contended directory can see which process is
/// allocating. Never read back for correctness; the flock itself is the
/// only source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolderInfo {
    /// Holder identity (`user@host`).
    pub owner: String,

    /// Process ID of the holder.
    pub pid: u32,

    /// When the flock was acquired (RFC3339).
    pub acquired_at: DateTime<Utc>,
}

impl HolderInfo {
    /// Describe the current process as the holder.
    pub fn current() -> Self {
        Self {
            owner: owner_string(),
            pid: std::process::id(),
            acquired_at: Utc::now(),
        }
    }

    /// Serialize to the JSON form stored in the lock file.
    pub fn to_json(&self) -> String {
        // A struct of two strings and an integer does not fail to serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// `user@host` identity for holder metadata.
fn owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
