//! Migration of loosely-typed progress documents.
//!
//! Stored and imported documents may come from older versions or be edited by
//! hand. [`RawProgress`] accepts anything; the conversion into
//! [`UserProgress`] never fails and falls back to defaults field by field.

use serde::Deserialize;
use chrono::NaiveDate;
use serde_json::Value;
use wordwise_core::{Achievement, Level, Time, UserId, UserProgress, WeeklyStats};
use crate::achievements;
use crate::calendar::week_start;
use crate::tracker::ProgressTracker;

/// An untrusted progress document. Every field is optional and untyped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProgress {
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    current_level: Option<Value>,
    #[serde(default)]
    total_points: Option<Value>,
    #[serde(default)]
    streak_days: Option<Value>,
    #[serde(default)]
    last_study_date: Option<Value>,
    #[serde(default)]
    completed_lessons: Option<Value>,
    #[serde(default)]
    mastered_words: Option<Value>,
    #[serde(default)]
    weak_words: Option<Value>,
    #[serde(default)]
    time_spent: Option<Value>,
    #[serde(default)]
    achievements: Option<Value>,
    #[serde(default)]
    daily_goal: Option<Value>,
    #[serde(default)]
    weekly_stats: Option<Value>,
}

/// The weekly stats object nested in a progress document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeeklyStats {
    #[serde(default)]
    week: Option<Value>,
    #[serde(default)]
    lessons_completed: Option<Value>,
    #[serde(default)]
    words_learned: Option<Value>,
    #[serde(default)]
    time_spent: Option<Value>,
    #[serde(default)]
    accuracy: Option<Value>,
}

impl RawProgress {
    /// Wrap any JSON value; non-objects carry no fields.
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            serde_json::from_value(value).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}

impl ProgressTracker {
    /// Build a valid record from an untrusted document.
    ///
    /// Missing, mistyped, or empty fields take the values
    /// [`ProgressTracker::create_default`] would give them, except that a
    /// missing level is derived from the points. Nested weekly stats and
    /// achievements are converted field by field as well. Duplicate word ids
    /// and achievement ids keep their first occurrence.
    pub fn migrate_progress_data(&self, raw: RawProgress) -> UserProgress {
        let now = self.now();
        let total_points = raw.total_points.and_then(as_count).unwrap_or(0);

        UserProgress {
            user_id: raw
                .user_id
                .and_then(as_string)
                .and_then(UserId::from_existing)
                .unwrap_or_default(),
            current_level: raw
                .current_level
                .and_then(as_string)
                .and_then(|s| Level::parse(&s))
                .unwrap_or_else(|| Level::from_points(total_points)),
            total_points,
            streak_days: raw.streak_days.and_then(as_count).and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
            last_study_date: raw
                .last_study_date
                .and_then(|v| serde_json::from_value::<Time>(v).ok())
                .unwrap_or(now),
            completed_lessons: raw.completed_lessons.map(as_id_list).unwrap_or_default(),
            mastered_words: raw.mastered_words.map(as_id_list).unwrap_or_default(),
            weak_words: raw.weak_words.map(as_id_list).unwrap_or_default(),
            time_spent: raw.time_spent.and_then(as_count).unwrap_or(0),
            achievements: raw
                .achievements
                .map(|v| as_achievements(v, now))
                .unwrap_or_default(),
            daily_goal: raw
                .daily_goal
                .and_then(as_count)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n > 0)
                .unwrap_or(self.config().default_daily_goal),
            weekly_stats: raw
                .weekly_stats
                .and_then(|v| as_weekly_stats(v, now))
                .unwrap_or_else(|| WeeklyStats::empty(week_start(now))),
        }
    }
}

fn as_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn as_count(value: Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.floor() as u64)
    })
}

fn as_id_list(value: Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if let Value::String(id) = item {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

fn as_u32(value: Value) -> Option<u32> {
    as_count(value).map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Non-objects yield `None`; an object keeps every field that converts.
fn as_weekly_stats(value: Value, now: Time) -> Option<WeeklyStats> {
    if !value.is_object() {
        return None;
    }
    let raw: RawWeeklyStats = serde_json::from_value(value).unwrap_or_default();
    Some(WeeklyStats {
        week: raw
            .week
            .and_then(|v| serde_json::from_value::<NaiveDate>(v).ok())
            .unwrap_or_else(|| week_start(now)),
        lessons_completed: raw.lessons_completed.and_then(as_u32).unwrap_or(0),
        words_learned: raw.words_learned.and_then(as_u32).unwrap_or(0),
        time_spent: raw.time_spent.and_then(as_count).unwrap_or(0),
        accuracy: raw
            .accuracy
            .and_then(|v| v.as_f64())
            .filter(|f| f.is_finite())
            .map(|f| f.clamp(0.0, 100.0))
            .unwrap_or(0.0),
    })
}

/// Any object with a non-empty string `id` is kept. Missing display fields
/// and points come from the achievement table; a missing date becomes `now`.
fn as_achievement(value: Value, now: Time) -> Option<Achievement> {
    let Value::Object(mut fields) = value else {
        return None;
    };
    let id = fields.remove("id").and_then(as_string)?;
    let def = achievements::find(&id);
    let mut text = |key: &str, fallback: Option<&str>| {
        fields
            .remove(key)
            .and_then(as_string)
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_default()
    };
    let title = text("title", def.map(|d| d.title));
    let description = text("description", def.map(|d| d.description));
    let icon = text("icon", def.map(|d| d.icon));

    Some(Achievement {
        title,
        description,
        icon,
        earned_date: fields
            .remove("earnedDate")
            .and_then(|v| serde_json::from_value::<Time>(v).ok())
            .unwrap_or(now),
        points: fields
            .remove("points")
            .and_then(as_count)
            .or_else(|| def.map(|d| d.points))
            .unwrap_or(0),
        id,
    })
}

fn as_achievements(value: Value, now: Time) -> Vec<Achievement> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    let mut earned: Vec<Achievement> = Vec::new();
    for item in items {
        if let Some(achievement) = as_achievement(item, now) {
            if !earned.iter().any(|a| a.id == achievement.id) {
                earned.push(achievement);
            }
        }
    }
    earned
}
