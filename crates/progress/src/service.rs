//! Storage-backed progress service.
//!
//! Threads [`ProgressTracker`] transitions through a [`Storage`]: each action
//! takes the current progress, computes the next value, and persists it once.
//! Failures are returned to the caller without retrying.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use wordwise_core::{AppSettings, StudySession, UserProgress};
use wordwise_storage::{Document, FilePicker, Storage, StorageError};
use crate::backup::{create_backup, restore_backup, Restored};
use crate::migrate::RawProgress;
use crate::tracker::ProgressTracker;
use crate::Result;

/// Suggested file name for progress exports.
pub const PROGRESS_EXPORT_NAME: &str = "wordwise-progress.json";

/// Progress operations persisted through a storage backend.
pub struct ProgressService<S: Storage> {
    storage: S,
    tracker: ProgressTracker,
}

impl<S: Storage> ProgressService<S> {
    /// Create a service with a default tracker.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tracker: ProgressTracker::new(),
        }
    }

    /// Use a specific tracker.
    pub fn with_tracker(mut self, tracker: ProgressTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// The tracker in use.
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    // === Progress document ===

    /// Load stored progress, migrating older documents.
    ///
    /// Falls back to a fresh record when nothing is stored or the stored file
    /// is not valid JSON. I/O failures are returned.
    pub async fn load_progress(&self) -> Result<UserProgress> {
        match self.storage.load_document(Document::Progress).await {
            Ok(Some(value)) => Ok(self.tracker.migrate_progress_data(RawProgress::from_value(value))),
            Ok(None) => {
                debug!("no stored progress, starting fresh");
                Ok(self.tracker.create_default())
            }
            Err(StorageError::Json(e)) => {
                warn!(error = %e, "stored progress unreadable, starting fresh");
                Ok(self.tracker.create_default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist a progress record.
    pub async fn save_progress(&mut self, progress: &UserProgress) -> Result<()> {
        let value = serde_json::to_value(progress)?;
        self.storage.save_document(Document::Progress, &value).await?;
        Ok(())
    }

    /// Record a study session and save the result.
    pub async fn record_session(&mut self, progress: &UserProgress, session: &StudySession) -> Result<UserProgress> {
        let updated = self.tracker.record_study_session(progress, session);
        self.save_progress(&updated).await?;
        Ok(updated)
    }

    /// Mark a word as mastered and save the result.
    pub async fn master_word(&mut self, progress: &UserProgress, word_id: &str) -> Result<UserProgress> {
        let updated = self.tracker.add_mastered_word(progress, word_id);
        self.save_progress(&updated).await?;
        Ok(updated)
    }

    /// Flag a word for review and save the result.
    pub async fn mark_weak(&mut self, progress: &UserProgress, word_id: &str) -> Result<UserProgress> {
        let updated = self.tracker.add_weak_word(progress, word_id);
        self.save_progress(&updated).await?;
        Ok(updated)
    }

    /// Replace stored progress with a fresh record.
    pub async fn clear(&mut self) -> Result<UserProgress> {
        self.storage.delete_document(Document::Progress).await?;
        let fresh = self.tracker.clear_progress();
        self.save_progress(&fresh).await?;
        info!(user = %fresh.user_id, "progress cleared");
        Ok(fresh)
    }

    // === Settings document ===

    /// Load settings, defaulting when none are stored or they are unreadable.
    pub async fn load_settings(&self) -> Result<AppSettings> {
        match self.storage.load_document(Document::Settings).await {
            Ok(Some(value)) => Ok(serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(error = %e, "stored settings unreadable, using defaults");
                AppSettings::default()
            })),
            Ok(None) => Ok(AppSettings::default()),
            Err(StorageError::Json(e)) => {
                warn!(error = %e, "stored settings unreadable, using defaults");
                Ok(AppSettings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist settings.
    pub async fn save_settings(&mut self, settings: &AppSettings) -> Result<()> {
        let value = serde_json::to_value(settings)?;
        self.storage.save_document(Document::Settings, &value).await?;
        Ok(())
    }

    // === Export / import ===

    /// Write the progress export to `path`.
    pub async fn export_to(&self, progress: &UserProgress, path: &Path) -> Result<()> {
        let value = serde_json::to_value(progress)?;
        self.storage.write_file(path, &value).await?;
        info!(path = %path.display(), "progress exported");
        Ok(())
    }

    /// Import a progress export from `path` and make it current.
    ///
    /// On a parse failure nothing is saved and the stored progress is kept.
    pub async fn import_from(&mut self, path: &Path) -> Result<UserProgress> {
        let text = self.storage.read_file(path).await?;
        let imported = self.tracker.import_progress(&text)?;
        self.save_progress(&imported).await?;
        info!(path = %path.display(), user = %imported.user_id, "progress imported");
        Ok(imported)
    }

    /// Export to a picked file. `None` when the picker was cancelled.
    pub async fn export_with_picker(&self, progress: &UserProgress, picker: &dyn FilePicker) -> Result<Option<PathBuf>> {
        let Some(path) = picker.pick_file_for_export(PROGRESS_EXPORT_NAME) else {
            return Ok(None);
        };
        self.export_to(progress, &path).await?;
        Ok(Some(path))
    }

    /// Import from a picked file. `None` when the picker was cancelled.
    pub async fn import_with_picker(&mut self, picker: &dyn FilePicker) -> Result<Option<UserProgress>> {
        let Some(path) = picker.pick_file_for_import() else {
            return Ok(None);
        };
        self.import_from(&path).await.map(Some)
    }

    // === Backup / restore ===

    /// Suggested file name for a backup taken now.
    pub fn backup_file_name(&self) -> String {
        format!("wordwise-backup-{}.json", self.tracker.now().format("%Y-%m-%d"))
    }

    /// Write progress and settings to `path` as one backup document.
    pub async fn backup_to(&self, progress: &UserProgress, settings: &AppSettings, path: &Path) -> Result<()> {
        let backup = create_backup(progress, settings, self.tracker.now());
        let value = serde_json::to_value(&backup)?;
        self.storage.write_file(path, &value).await?;
        info!(path = %path.display(), "backup written");
        Ok(())
    }

    /// Restore a backup or bare progress export from `path` and save it.
    ///
    /// Settings are only overwritten when the file is a full backup.
    pub async fn restore_from(&mut self, path: &Path) -> Result<Restored> {
        let text = self.storage.read_file(path).await?;
        let restored = restore_backup(&self.tracker, &text)?;

        self.save_progress(&restored.progress).await?;
        if let Some(settings) = &restored.settings {
            self.save_settings(settings).await?;
        }
        info!(path = %path.display(), with_settings = restored.settings.is_some(), "backup restored");
        Ok(restored)
    }
}
