//! Progress tracking service.
//!
//! Every operation takes the caller's current [`UserProgress`] and returns a
//! new value. The tracker holds no learner state and never touches storage;
//! see [`crate::ProgressService`] for the load/save loop.

use tracing::{debug, info};
use wordwise_core::{Level, StudySession, Time, UserId, UserProgress, WeeklyStats, DEFAULT_DAILY_GOAL};
use crate::achievements;
use crate::calendar::{next_streak, week_start};
use crate::clock::{Clock, SystemClock};
use crate::migrate::RawProgress;
use crate::Result;

/// Configuration for the progress tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Points for marking a word as mastered outside a session
    pub mastered_word_bonus: u64,
    /// Daily goal in minutes for new or migrated records
    pub default_daily_goal: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            mastered_word_bonus: 10,
            default_daily_goal: DEFAULT_DAILY_GOAL,
        }
    }
}

/// Applies learner actions to progress records.
pub struct ProgressTracker {
    config: TrackerConfig,
    clock: Box<dyn Clock>,
}

impl ProgressTracker {
    /// Create a tracker on the system clock with default configuration.
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current time according to the tracker's clock.
    pub fn now(&self) -> Time {
        self.clock.now()
    }

    /// Zero-state record for a new learner.
    pub fn create_default(&self) -> UserProgress {
        let now = self.now();
        UserProgress::new(
            UserId::new(),
            now,
            self.config.default_daily_goal,
            WeeklyStats::empty(week_start(now)),
        )
    }

    /// Same as [`ProgressTracker::create_default`]; the caller overwrites storage.
    pub fn clear_progress(&self) -> UserProgress {
        self.create_default()
    }

    /// Fold a finished study session into the record.
    pub fn record_study_session(&self, progress: &UserProgress, session: &StudySession) -> UserProgress {
        let now = self.now();
        let mut updated = progress.clone();

        let minutes = session.duration_minutes();
        updated.time_spent = updated.time_spent.saturating_add(minutes);
        updated.total_points = updated.total_points.saturating_add(session.points_earned);

        for word_id in &session.words_studied {
            if !updated.is_mastered(word_id) {
                updated.mastered_words.push(word_id.clone());
            }
        }

        if session.has_lesson() && !updated.completed_lessons.contains(&session.lesson_id) {
            updated.completed_lessons.push(session.lesson_id.clone());
        }

        updated.streak_days = next_streak(updated.streak_days, updated.last_study_date, now);
        updated.last_study_date = session.start_time;

        updated.weekly_stats = roll_weekly_stats(&updated.weekly_stats, session, minutes, now);

        for achievement in achievements::evaluate(&mut updated, now) {
            info!(id = %achievement.id, points = achievement.points, "achievement unlocked");
        }

        updated.current_level = Level::from_points(updated.total_points);

        debug!(
            session = %session.id,
            minutes,
            points = updated.total_points,
            streak = updated.streak_days,
            "recorded study session"
        );
        updated
    }

    /// Mark a word as mastered. Achievements are not evaluated here.
    pub fn add_mastered_word(&self, progress: &UserProgress, word_id: &str) -> UserProgress {
        let mut updated = progress.clone();
        if !updated.is_mastered(word_id) {
            updated.mastered_words.push(word_id.to_string());
            updated.weak_words.retain(|w| w != word_id);
            updated.total_points = updated.total_points.saturating_add(self.config.mastered_word_bonus);
        }
        updated
    }

    /// Flag a word for review. Mastery is left alone.
    pub fn add_weak_word(&self, progress: &UserProgress, word_id: &str) -> UserProgress {
        let mut updated = progress.clone();
        if !updated.is_weak(word_id) {
            updated.weak_words.push(word_id.to_string());
        }
        updated
    }

    /// Pretty JSON with keys in model order.
    pub fn export_progress(&self, progress: &UserProgress) -> Result<String> {
        Ok(serde_json::to_string_pretty(progress)?)
    }

    /// Parse an exported document and migrate it.
    ///
    /// Fails only when the text is not JSON at all; the caller keeps its
    /// previous progress in that case. Any parseable value migrates, with
    /// non-objects yielding a default record.
    pub fn import_progress(&self, text: &str) -> Result<UserProgress> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(self.migrate_progress_data(RawProgress::from_value(value)))
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Weekly stats after a session, starting fresh when the week changed.
fn roll_weekly_stats(current: &WeeklyStats, session: &StudySession, minutes: u64, now: Time) -> WeeklyStats {
    let week = week_start(now);
    let lessons = u32::from(session.has_lesson());
    let words = u32::try_from(session.words_studied.len()).unwrap_or(u32::MAX);

    if current.week != week {
        return WeeklyStats {
            week,
            lessons_completed: lessons,
            words_learned: words,
            time_spent: minutes,
            accuracy: session.accuracy().unwrap_or(0.0),
        };
    }

    let accuracy = match session.accuracy() {
        Some(session_accuracy) => {
            let weight = current.lessons_completed as f64;
            (current.accuracy * weight + session_accuracy) / (weight + 1.0)
        }
        None => current.accuracy,
    };

    WeeklyStats {
        week,
        lessons_completed: current.lessons_completed.saturating_add(lessons),
        words_learned: current.words_learned.saturating_add(words),
        time_spent: current.time_spent.saturating_add(minutes),
        accuracy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use crate::clock::FixedClock;

    // Wednesday
    fn t0() -> Time {
        Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap()
    }

    fn tracker_at(now: Time) -> ProgressTracker {
        ProgressTracker::new().with_clock(FixedClock(now))
    }

    fn session_at(start: Time, minutes: i64) -> StudySession {
        let mut session = StudySession::new("lesson-1", start);
        session.end_time = Some(start + Duration::minutes(minutes));
        session
    }

    #[test]
    fn test_create_default() {
        let progress = tracker_at(t0()).create_default();
        assert_eq!(progress.current_level, Level::Beginner);
        assert_eq!(progress.total_points, 0);
        assert_eq!(progress.streak_days, 0);
        assert_eq!(progress.daily_goal, 30);
        assert_eq!(progress.last_study_date, t0());
        assert_eq!(progress.weekly_stats, WeeklyStats::empty(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()));
        assert!(progress.mastered_words.is_empty());
        assert!(progress.achievements.is_empty());
    }

    #[test]
    fn test_add_mastered_word_is_idempotent() {
        let tracker = tracker_at(t0());
        let mut progress = tracker.create_default();
        progress = tracker.add_weak_word(&progress, "apple");

        let once = tracker.add_mastered_word(&progress, "apple");
        let twice = tracker.add_mastered_word(&once, "apple");

        assert_eq!(once, twice);
        assert_eq!(once.mastered_words, vec!["apple"]);
        assert!(once.weak_words.is_empty());
        assert_eq!(once.total_points, 10);
    }

    #[test]
    fn test_add_mastered_word_does_not_unlock_achievements() {
        let tracker = tracker_at(t0());
        let progress = tracker.add_mastered_word(&tracker.create_default(), "w1");
        assert_eq!(progress.mastered_words, vec!["w1"]);
        assert_eq!(progress.total_points, 10);
        assert!(!progress.has_achievement("first-word"));
    }

    #[test]
    fn test_add_weak_word_keeps_mastery() {
        let tracker = tracker_at(t0());
        let mut progress = tracker.add_mastered_word(&tracker.create_default(), "w1");
        progress = tracker.add_weak_word(&progress, "w1");
        progress = tracker.add_weak_word(&progress, "w1");

        assert_eq!(progress.weak_words, vec!["w1"]);
        assert_eq!(progress.mastered_words, vec!["w1"]);
    }

    #[test]
    fn test_custom_mastered_word_bonus() {
        let tracker = tracker_at(t0()).with_config(TrackerConfig {
            mastered_word_bonus: 25,
            ..TrackerConfig::default()
        });
        let progress = tracker.add_mastered_word(&tracker.create_default(), "w1");
        assert_eq!(progress.total_points, 25);
    }

    #[test]
    fn test_ten_word_session_unlocks_two_achievements() {
        let tracker = tracker_at(t0());
        let mut session = session_at(t0(), 20);
        session.words_studied = (1..=10).map(|i| format!("w{}", i)).collect();
        session.points_earned = 20;

        let progress = tracker.record_study_session(&tracker.create_default(), &session);

        assert_eq!(progress.mastered_words.len(), 10);
        assert_eq!(progress.total_points, 20 + 10 + 50);
        assert!(progress.has_achievement("first-word"));
        assert!(progress.has_achievement("word-collector"));
        assert_eq!(progress.achievements.len(), 2);
        assert_eq!(progress.completed_lessons, vec!["lesson-1"]);
        assert_eq!(progress.time_spent, 20);
    }

    #[test]
    fn test_session_points_never_decrease() {
        let tracker = tracker_at(t0());
        let mut progress = tracker.create_default();
        for points in [0, 5, 0, 120] {
            let mut session = session_at(t0(), 3);
            session.points_earned = points;
            let next = tracker.record_study_session(&progress, &session);
            assert!(next.total_points >= progress.total_points);
            progress = next;
        }
        assert_eq!(progress.total_points, 125);
    }

    #[test]
    fn test_session_words_keep_first_seen_order() {
        let tracker = tracker_at(t0());
        let progress = tracker.add_mastered_word(&tracker.create_default(), "b");
        let mut session = session_at(t0(), 1);
        session.words_studied = vec!["c".into(), "b".into(), "a".into(), "c".into()];

        let progress = tracker.record_study_session(&progress, &session);
        assert_eq!(progress.mastered_words, vec!["b", "c", "a"]);
        assert_eq!(progress.weekly_stats.words_learned, 4);
    }

    #[test]
    fn test_streak_same_day_next_day_and_gap() {
        let base = {
            let mut p = tracker_at(t0()).create_default();
            p.streak_days = 4;
            p.last_study_date = t0();
            p
        };

        let same = tracker_at(t0()).record_study_session(&base, &session_at(t0(), 5));
        assert_eq!(same.streak_days, 4);

        let next_day = t0() + Duration::days(1);
        let next = tracker_at(next_day).record_study_session(&base, &session_at(next_day, 5));
        assert_eq!(next.streak_days, 5);
        assert_eq!(next.last_study_date, next_day);

        let later = t0() + Duration::days(5);
        let gap = tracker_at(later).record_study_session(&base, &session_at(later, 5));
        assert_eq!(gap.streak_days, 1);
    }

    #[test]
    fn test_weekly_stats_accumulate_within_week() {
        let tracker = tracker_at(t0());
        let mut progress = tracker.create_default();

        let mut first = session_at(t0(), 10);
        first.correct_answers = 8;
        first.total_answers = 10;
        progress = tracker.record_study_session(&progress, &first);
        assert_eq!(progress.weekly_stats.lessons_completed, 1);
        assert_eq!(progress.weekly_stats.accuracy, 80.0);

        let mut second = session_at(t0(), 15);
        second.correct_answers = 5;
        second.total_answers = 10;
        progress = tracker.record_study_session(&progress, &second);
        assert_eq!(progress.weekly_stats.lessons_completed, 2);
        assert_eq!(progress.weekly_stats.time_spent, 25);
        assert_eq!(progress.weekly_stats.accuracy, 65.0);

        // Unanswered practice leaves accuracy alone
        let mut practice = session_at(t0(), 5);
        practice.lesson_id.clear();
        progress = tracker.record_study_session(&progress, &practice);
        assert_eq!(progress.weekly_stats.lessons_completed, 2);
        assert_eq!(progress.weekly_stats.time_spent, 30);
        assert_eq!(progress.weekly_stats.accuracy, 65.0);
    }

    #[test]
    fn test_weekly_stats_reset_on_new_week() {
        let tracker = tracker_at(t0());
        let mut progress = tracker.record_study_session(&tracker.create_default(), &session_at(t0(), 40));
        assert_eq!(progress.weekly_stats.time_spent, 40);

        // Following Monday
        let monday = t0() + Duration::days(5);
        let mut session = session_at(monday, 12);
        session.correct_answers = 3;
        session.total_answers = 4;
        progress = tracker_at(monday).record_study_session(&progress, &session);

        assert_eq!(progress.weekly_stats.week, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(progress.weekly_stats.lessons_completed, 1);
        assert_eq!(progress.weekly_stats.time_spent, 12);
        assert_eq!(progress.weekly_stats.accuracy, 75.0);
        assert_eq!(progress.time_spent, 52);
    }

    #[test]
    fn test_level_follows_points_after_session() {
        let tracker = tracker_at(t0());
        let mut session = session_at(t0(), 1);
        session.points_earned = 499;
        let progress = tracker.record_study_session(&tracker.create_default(), &session);
        assert_eq!(progress.total_points, 499);
        assert_eq!(progress.current_level, Level::Beginner);

        let mut session = session_at(t0(), 1);
        session.points_earned = 1;
        let progress = tracker.record_study_session(&progress, &session);
        // 500 unlocks point-collector for another 50
        assert_eq!(progress.total_points, 550);
        assert_eq!(progress.current_level, Level::Intermediate);
    }

    #[test]
    fn test_export_import_round_trip() {
        let tracker = tracker_at(t0());
        let mut session = session_at(t0(), 30);
        session.words_studied = vec!["w1".into(), "w2".into()];
        session.correct_answers = 2;
        session.total_answers = 3;
        session.points_earned = 40;
        // 66.66... must survive the trip
        let mut progress = tracker.record_study_session(&tracker.create_default(), &session);
        progress = tracker.add_weak_word(&progress, "w9");

        let json = tracker.export_progress(&progress).unwrap();
        let imported = tracker.import_progress(&json).unwrap();
        assert_eq!(imported, progress);

        let keys: Vec<_> = json.lines().filter(|l| l.starts_with("  \"")).map(|l| l.trim()).collect();
        assert!(keys[0].starts_with("\"userId\""));
        assert!(keys[keys.len() - 1].starts_with("\"weeklyStats\""));
    }

    #[test]
    fn test_import_malformed_fails() {
        let tracker = tracker_at(t0());
        assert!(matches!(tracker.import_progress("{not json"), Err(crate::ProgressError::Parse(_))));
        assert!(tracker.import_progress("").is_err());
    }

    #[test]
    fn test_import_non_object_gives_default_record() {
        let tracker = tracker_at(t0());
        for text in ["[1, 2]", "42", "null", "\"progress\""] {
            let progress = tracker.import_progress(text).unwrap();
            assert_eq!(progress.total_points, 0);
            assert_eq!(progress.daily_goal, 30);
            assert!(progress.mastered_words.is_empty());
        }
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let tracker = tracker_at(t0());
        let progress = tracker.import_progress(r#"{"totalPoints": 18446744073709551615}"#).unwrap();
        assert_eq!(progress.total_points, u64::MAX);

        let progress = tracker.add_mastered_word(&progress, "w1");
        assert_eq!(progress.total_points, u64::MAX);

        let mut session = session_at(t0(), 30);
        session.points_earned = 500;
        let progress = tracker.record_study_session(&progress, &session);
        assert_eq!(progress.total_points, u64::MAX);
        assert_eq!(progress.current_level, Level::Advanced);
    }

    #[test]
    fn test_huge_time_and_weekly_counters_do_not_overflow() {
        let tracker = tracker_at(t0());
        let text = r#"{
            "timeSpent": 1e30,
            "streakDays": 4294967295,
            "lastStudyDate": "2024-03-05T10:00:00Z",
            "weeklyStats": {"week": "2024-03-03", "lessonsCompleted": 4294967295,
                            "wordsLearned": 4294967295, "timeSpent": 18446744073709551615, "accuracy": 50}
        }"#;
        let progress = tracker.import_progress(text).unwrap();
        assert_eq!(progress.time_spent, u64::MAX);

        let mut session = session_at(t0(), 10);
        session.words_studied = vec!["w1".into()];
        let progress = tracker.record_study_session(&progress, &session);

        assert_eq!(progress.time_spent, u64::MAX);
        assert_eq!(progress.streak_days, u32::MAX);
        assert_eq!(progress.weekly_stats.lessons_completed, u32::MAX);
        assert_eq!(progress.weekly_stats.words_learned, u32::MAX);
        assert_eq!(progress.weekly_stats.time_spent, u64::MAX);
    }

    #[test]
    fn test_clear_progress_generates_new_user() {
        let tracker = tracker_at(t0());
        let first = tracker.create_default();
        let cleared = tracker.clear_progress();
        assert_ne!(first.user_id, cleared.user_id);
        assert_eq!(cleared.total_points, 0);
    }
}
