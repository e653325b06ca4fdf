//! Calendar arithmetic for streaks and weekly stats.
//!
//! All dates are taken in UTC.

use chrono::{Datelike, Duration, NaiveDate};
use wordwise_core::Time;

/// Sunday on or before the date of `t`.
pub fn week_start(t: Time) -> NaiveDate {
    let date = t.date_naive();
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Calendar days from `earlier` to `later`; negative if `later` is before.
pub fn day_diff(earlier: Time, later: Time) -> i64 {
    (later.date_naive() - earlier.date_naive()).num_days()
}

/// Next streak value given the previous study time and now.
///
/// Same day keeps the streak, the next day extends it, anything else
/// (a gap or a clock that moved backwards) starts over at 1.
pub fn next_streak(current: u32, last_study: Time, now: Time) -> u32 {
    match day_diff(last_study, now) {
        0 => current,
        1 => current.saturating_add(1),
        _ => 1,
    }
}
