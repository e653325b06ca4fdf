//! Backup and restore of progress together with settings.

use serde_json::{Map, Value};
use tracing::warn;
use wordwise_core::{AppSettings, BackupDocument, Time, UserProgress};
use crate::migrate::RawProgress;
use crate::tracker::ProgressTracker;
use crate::Result;

/// What a restore file contained.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    /// Migrated progress
    pub progress: UserProgress,
    /// Settings, present only for full backups
    pub settings: Option<AppSettings>,
}

/// Bundle progress and settings into a backup document.
pub fn create_backup(progress: &UserProgress, settings: &AppSettings, now: Time) -> BackupDocument {
    BackupDocument::new(progress.clone(), settings.clone(), now)
}

/// Read a backup or a bare progress export.
///
/// Objects carrying a `version` key are full backups: their `progress` is
/// migrated and their `settings` loaded with defaults for anything missing.
/// Any other JSON value is taken as a progress document on its own. Only text
/// that is not JSON at all fails.
pub fn restore_backup(tracker: &ProgressTracker, text: &str) -> Result<Restored> {
    let mut object = match serde_json::from_str::<Value>(text)? {
        Value::Object(object) if is_backup(&object) => object,
        other => {
            let progress = tracker.migrate_progress_data(RawProgress::from_value(other));
            return Ok(Restored { progress, settings: None });
        }
    };

    let progress = object.remove("progress").map(RawProgress::from_value).unwrap_or_default();
    let settings = object
        .remove("settings")
        .and_then(|v| match serde_json::from_value::<AppSettings>(v) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!(error = %e, "backup settings unreadable, using defaults");
                None
            }
        })
        .unwrap_or_default();

    Ok(Restored {
        progress: tracker.migrate_progress_data(progress),
        settings: Some(settings),
    })
}

fn is_backup(object: &Map<String, Value>) -> bool {
    match object.get("version") {
        Some(Value::String(v)) => !v.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wordwise_core::{Theme, BACKUP_VERSION};
    use crate::clock::FixedClock;

    fn tracker() -> ProgressTracker {
        ProgressTracker::new().with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap()))
    }

    #[test]
    fn test_full_backup_restores_both_documents() {
        let tracker = tracker();
        let progress = tracker.add_mastered_word(&tracker.create_default(), "w1");
        let mut settings = AppSettings::default();
        settings.theme = Theme::Dark;

        let backup = create_backup(&progress, &settings, tracker.now());
        assert_eq!(backup.version, BACKUP_VERSION);

        let text = serde_json::to_string_pretty(&backup).unwrap();
        let restored = restore_backup(&tracker, &text).unwrap();
        assert_eq!(restored.progress, progress);
        assert_eq!(restored.settings, Some(settings));
    }

    #[test]
    fn test_bare_progress_restores_without_settings() {
        let tracker = tracker();
        let progress = tracker.add_weak_word(&tracker.create_default(), "w2");
        let text = tracker.export_progress(&progress).unwrap();

        let restored = restore_backup(&tracker, &text).unwrap();
        assert_eq!(restored.progress, progress);
        assert_eq!(restored.settings, None);
    }

    #[test]
    fn test_backup_with_bad_settings_uses_defaults() {
        let text = r#"{"version":"1.0","timestamp":"2024-03-06T10:00:00Z","progress":{"totalPoints":15},"settings":{"theme":"purple"}}"#;
        let restored = restore_backup(&tracker(), text).unwrap();
        assert_eq!(restored.progress.total_points, 15);
        assert_eq!(restored.settings, Some(AppSettings::default()));
    }

    #[test]
    fn test_unparseable_restore_fails() {
        assert!(restore_backup(&tracker(), "{not json").is_err());
    }

    #[test]
    fn test_non_object_restores_default_progress() {
        let restored = restore_backup(&tracker(), "[1, 2]").unwrap();
        assert_eq!(restored.progress.total_points, 0);
        assert_eq!(restored.settings, None);
    }
}
