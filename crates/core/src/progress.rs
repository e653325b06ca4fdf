//! Progress model - the learner's persisted record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::achievement::Achievement;
use crate::id::UserId;
use crate::Time;

/// Default daily study goal in minutes.
pub const DEFAULT_DAILY_GOAL: u32 = 30;

/// Everything tracked about one learner.
///
/// Field order is the order keys appear in exported documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Owner of this record
    pub user_id: UserId,

    /// Level derived from total points
    pub current_level: Level,

    /// Points earned so far
    pub total_points: u64,

    /// Consecutive study days
    pub streak_days: u32,

    /// Start of the most recent study session
    pub last_study_date: Time,

    /// Lessons finished at least once
    pub completed_lessons: Vec<String>,

    /// Words the learner knows, in the order they were mastered
    pub mastered_words: Vec<String>,

    /// Words flagged for review
    pub weak_words: Vec<String>,

    /// Total study time in minutes
    pub time_spent: u64,

    /// Achievements earned, unique by id
    pub achievements: Vec<Achievement>,

    /// Daily goal in minutes
    pub daily_goal: u32,

    /// Aggregates for the current week
    pub weekly_stats: WeeklyStats,
}

impl UserProgress {
    /// Create a zero-state record.
    pub fn new(user_id: UserId, now: Time, daily_goal: u32, weekly_stats: WeeklyStats) -> Self {
        Self {
            user_id,
            current_level: Level::Beginner,
            total_points: 0,
            streak_days: 0,
            last_study_date: now,
            completed_lessons: Vec::new(),
            mastered_words: Vec::new(),
            weak_words: Vec::new(),
            time_spent: 0,
            achievements: Vec::new(),
            daily_goal,
            weekly_stats,
        }
    }

    /// Whether the word is in the mastered list.
    pub fn is_mastered(&self, word_id: &str) -> bool {
        self.mastered_words.iter().any(|w| w == word_id)
    }

    /// Whether the word is in the weak list.
    pub fn is_weak(&self, word_id: &str) -> bool {
        self.weak_words.iter().any(|w| w == word_id)
    }

    /// Whether an achievement with this id has been earned.
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }
}

/// Learner level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Under 500 points
    Beginner,
    /// 500 to 1999 points
    Intermediate,
    /// 2000 points and up
    Advanced,
}

impl Level {
    /// Level for a point total.
    pub fn from_points(points: u64) -> Self {
        match points {
            0..=499 => Level::Beginner,
            500..=1999 => Level::Intermediate,
            _ => Level::Advanced,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    /// Parse the serialized form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Level::Beginner),
            "intermediate" => Some(Level::Intermediate),
            "advanced" => Some(Level::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Study aggregates for one Sunday-based calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// Sunday the week starts on
    pub week: NaiveDate,

    /// Sessions tied to a lesson
    pub lessons_completed: u32,

    /// Words studied across sessions
    pub words_learned: u32,

    /// Minutes studied
    pub time_spent: u64,

    /// Running answer accuracy, 0-100
    pub accuracy: f64,
}

impl WeeklyStats {
    /// Zeroed stats for the week starting on `week`.
    pub fn empty(week: NaiveDate) -> Self {
        Self {
            week,
            lessons_completed: 0,
            words_learned: 0,
            time_spent: 0,
            accuracy: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_level_boundaries() {
        assert_eq!(Level::from_points(0), Level::Beginner);
        assert_eq!(Level::from_points(499), Level::Beginner);
        assert_eq!(Level::from_points(500), Level::Intermediate);
        assert_eq!(Level::from_points(1999), Level::Intermediate);
        assert_eq!(Level::from_points(2000), Level::Advanced);
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap();
        let week = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let progress = UserProgress::new(UserId::new(), now, DEFAULT_DAILY_GOAL, WeeklyStats::empty(week));

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["currentLevel"], "beginner");
        assert_eq!(json["dailyGoal"], 30);
        assert_eq!(json["weeklyStats"]["week"], "2024-03-03");
        assert_eq!(json["weeklyStats"]["lessonsCompleted"], 0);
    }
}
