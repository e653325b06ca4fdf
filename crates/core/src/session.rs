//! Study session model - input to progress updates.

use serde::{Deserialize, Serialize};
use ulid::Ulid;
use crate::Time;

/// One finished study session, as reported by the presentation layer.
///
/// Sessions are never persisted; they are folded into `UserProgress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// Session identifier
    pub id: String,

    /// When the session started
    pub start_time: Time,

    /// When the session ended, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Time>,

    /// Lesson studied; empty for freeform practice
    #[serde(default)]
    pub lesson_id: String,

    /// Word ids seen during the session
    #[serde(default)]
    pub words_studied: Vec<String>,

    /// Exercises finished
    #[serde(default)]
    pub exercises_completed: u32,

    /// Correct answers given
    #[serde(default)]
    pub correct_answers: u32,

    /// Answers given
    #[serde(default)]
    pub total_answers: u32,

    /// Points earned
    #[serde(default)]
    pub points_earned: u64,
}

impl StudySession {
    /// Start a new session for a lesson.
    pub fn new(lesson_id: impl Into<String>, start_time: Time) -> Self {
        Self {
            id: format!("session_{}", Ulid::new().to_string().to_lowercase()),
            start_time,
            end_time: None,
            lesson_id: lesson_id.into(),
            words_studied: Vec::new(),
            exercises_completed: 0,
            correct_answers: 0,
            total_answers: 0,
            points_earned: 0,
        }
    }

    /// Whole minutes between start and end; 0 when unfinished or inverted.
    pub fn duration_minutes(&self) -> u64 {
        match self.end_time {
            Some(end) => (end - self.start_time).num_minutes().max(0) as u64,
            None => 0,
        }
    }

    /// Answer accuracy as a percentage, `None` when nothing was answered.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total_answers == 0 {
            None
        } else {
            Some(self.correct_answers as f64 * 100.0 / self.total_answers as f64)
        }
    }

    /// Whether the session belongs to a lesson.
    pub fn has_lesson(&self) -> bool {
        !self.lesson_id.is_empty()
    }
}
