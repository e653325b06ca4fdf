//! Achievement table and evaluation.

use wordwise_core::{Achievement, Time, UserProgress};

/// What must hold for an achievement to unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// At least this many mastered words
    MasteredWords(usize),
    /// Streak of at least this many days
    StreakDays(u32),
    /// At least this many total points
    TotalPoints(u64),
    /// At least this many minutes studied
    TimeSpent(u64),
}

impl Condition {
    /// Test the condition against a progress snapshot.
    pub fn is_met(&self, progress: &UserProgress) -> bool {
        match *self {
            Condition::MasteredWords(n) => progress.mastered_words.len() >= n,
            Condition::StreakDays(n) => progress.streak_days >= n,
            Condition::TotalPoints(n) => progress.total_points >= n,
            Condition::TimeSpent(n) => progress.time_spent >= n,
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    /// Stable identifier
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Description
    pub description: &'static str,
    /// Emoji icon
    pub icon: &'static str,
    /// Bonus points
    pub points: u64,
    /// Unlock condition
    pub condition: Condition,
}

impl AchievementDef {
    /// Earned record stamped with `earned_date`.
    pub fn earn(&self, earned_date: Time) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            earned_date,
            points: self.points,
        }
    }
}

/// All achievements, in evaluation order.
pub const ACHIEVEMENTS: [AchievementDef; 10] = [
    AchievementDef {
        id: "first-word",
        title: "First Word",
        description: "Learn your first word",
        icon: "🎯",
        points: 10,
        condition: Condition::MasteredWords(1),
    },
    AchievementDef {
        id: "word-collector",
        title: "Word Collector",
        description: "Learn 10 words",
        icon: "📚",
        points: 50,
        condition: Condition::MasteredWords(10),
    },
    AchievementDef {
        id: "word-master",
        title: "Word Master",
        description: "Learn 50 words",
        icon: "🏆",
        points: 200,
        condition: Condition::MasteredWords(50),
    },
    AchievementDef {
        id: "vocabulary-expert",
        title: "Vocabulary Expert",
        description: "Learn 100 words",
        icon: "🎓",
        points: 500,
        condition: Condition::MasteredWords(100),
    },
    AchievementDef {
        id: "streak-starter",
        title: "Streak Starter",
        description: "Study for 3 days in a row",
        icon: "🔥",
        points: 30,
        condition: Condition::StreakDays(3),
    },
    AchievementDef {
        id: "streak-master",
        title: "Streak Master",
        description: "Study for 7 days in a row",
        icon: "🌟",
        points: 100,
        condition: Condition::StreakDays(7),
    },
    AchievementDef {
        id: "dedicated-learner",
        title: "Dedicated Learner",
        description: "Study for 30 days in a row",
        icon: "💎",
        points: 500,
        condition: Condition::StreakDays(30),
    },
    AchievementDef {
        id: "point-collector",
        title: "Point Collector",
        description: "Earn 500 points",
        icon: "⭐",
        points: 50,
        condition: Condition::TotalPoints(500),
    },
    AchievementDef {
        id: "high-achiever",
        title: "High Achiever",
        description: "Earn 1000 points",
        icon: "🏅",
        points: 100,
        condition: Condition::TotalPoints(1000),
    },
    AchievementDef {
        id: "time-tracker",
        title: "Time Tracker",
        description: "Study for 10 hours total",
        icon: "⏰",
        points: 100,
        condition: Condition::TimeSpent(600),
    },
];

/// Look up a definition by id.
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|def| def.id == id)
}

/// Unlock every achievement whose condition now holds.
///
/// Definitions are checked in table order against the live record, and each
/// unlock adds its points before the next check. A bonus can therefore push
/// a later points-based achievement over its threshold in the same pass.
/// Returns the achievements unlocked by this call.
pub fn evaluate(progress: &mut UserProgress, now: Time) -> Vec<Achievement> {
    let mut unlocked = Vec::new();

    for def in ACHIEVEMENTS.iter() {
        if progress.has_achievement(def.id) || !def.condition.is_met(progress) {
            continue;
        }
        let earned = def.earn(now);
        progress.total_points = progress.total_points.saturating_add(def.points);
        progress.achievements.push(earned.clone());
        unlocked.push(earned);
    }

    unlocked
}
