//! Earned achievement records.

use serde::{Deserialize, Serialize};
use crate::Time;

/// An achievement the learner has unlocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Stable identifier, e.g. `first-word`
    pub id: String,

    /// Display title
    pub title: String,

    /// What it was awarded for
    pub description: String,

    /// Emoji icon
    pub icon: String,

    /// When it was earned
    pub earned_date: Time,

    /// Bonus points awarded
    pub points: u64,
}
