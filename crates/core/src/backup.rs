//! Backup document - progress and settings bundled for export.

use serde::{Deserialize, Serialize};
use crate::progress::UserProgress;
use crate::settings::AppSettings;
use crate::Time;

/// Format version written into new backups.
pub const BACKUP_VERSION: &str = "1.0";

/// A full backup as written to a user-chosen file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    /// Backup format version
    pub version: String,

    /// When the backup was taken
    pub timestamp: Time,

    /// Progress at backup time
    pub progress: UserProgress,

    /// Settings at backup time
    pub settings: AppSettings,
}

impl BackupDocument {
    /// Bundle progress and settings taken at `timestamp`.
    pub fn new(progress: UserProgress, settings: AppSettings, timestamp: Time) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            timestamp,
            progress,
            settings,
        }
    }
}
