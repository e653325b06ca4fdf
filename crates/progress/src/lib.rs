//! Progress Tracking
//!
//! Study-session bookkeeping, streaks, levels, weekly stats, achievements,
//! and the migration/import/export paths for the progress document.

#![warn(missing_docs)]

pub mod clock;
pub mod calendar;
pub mod achievements;
pub mod tracker;
pub mod migrate;
pub mod stats;
pub mod backup;
pub mod service;
mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use achievements::{AchievementDef, ACHIEVEMENTS};
pub use tracker::{ProgressTracker, TrackerConfig};
pub use migrate::RawProgress;
pub use stats::StudyStatistics;
pub use backup::{create_backup, restore_backup, Restored};
pub use service::ProgressService;
pub use error::{ProgressError, Result};
