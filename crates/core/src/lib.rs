//! Wordwise core data models.
//!
//! This crate defines the records a learner's progress is made of, along with
//! the settings and backup documents persisted next to it.

#![warn(missing_docs)]

// Identities
mod id;

// Learner progress
mod progress;
mod achievement;
mod session;

// Documents persisted alongside progress
mod settings;
mod backup;

// Re-exports
pub use id::UserId;

pub use progress::{Level, UserProgress, WeeklyStats, DEFAULT_DAILY_GOAL};
pub use achievement::Achievement;
pub use session::StudySession;

pub use settings::{AppSettings, Language, SettingError, Theme};
pub use backup::{BackupDocument, BACKUP_VERSION};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
