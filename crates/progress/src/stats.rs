//! Derived statistics for dashboards.

use serde::Serialize;
use wordwise_core::{Level, UserProgress};
use crate::calendar::day_diff;
use crate::tracker::ProgressTracker;

/// Summary figures shown on the progress view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStatistics {
    /// Mastered words
    pub total_words: usize,
    /// Words flagged for review
    pub weak_words: usize,
    /// Minutes studied
    pub total_time: u64,
    /// Current streak in days
    pub current_streak: u32,
    /// Points earned
    pub total_points: u64,
    /// Achievements earned
    pub achievements_count: usize,
    /// Current level
    pub current_level: Level,
    /// Today's progress toward the daily goal, 0-100
    pub daily_goal_progress: f64,
}

impl ProgressTracker {
    /// Rough percentage of today's goal met.
    ///
    /// Only total time is recorded, so today's minutes are approximated as
    /// the remainder of total time modulo the goal. Zero unless the last
    /// session was today.
    pub fn daily_progress(&self, progress: &UserProgress) -> f64 {
        if day_diff(progress.last_study_date, self.now()) != 0 || progress.daily_goal == 0 {
            return 0.0;
        }
        let goal = progress.daily_goal as u64;
        let today_minutes = progress.time_spent % goal;
        (today_minutes as f64 / goal as f64 * 100.0).min(100.0)
    }

    /// Summary figures for a record.
    pub fn study_statistics(&self, progress: &UserProgress) -> StudyStatistics {
        StudyStatistics {
            total_words: progress.mastered_words.len(),
            weak_words: progress.weak_words.len(),
            total_time: progress.time_spent,
            current_streak: progress.streak_days,
            total_points: progress.total_points,
            achievements_count: progress.achievements.len(),
            current_level: progress.current_level,
            daily_goal_progress: self.daily_progress(progress),
        }
    }
}
