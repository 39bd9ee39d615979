//! Read-side history projections.
//!
//! Summarizes a bounded window of past day ledgers against the profile's
//! current goal, for the trend chart (ascending) and the day-card list
//! (most recent first). Pure projection, no mutation.

use crate::DayIntake;
use chrono::NaiveDate;
use serde::Serialize;

/// How many recent day records the history views cover
pub const HISTORY_WINDOW: usize = 5;

/// Per-day summary row for history views
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_calories: u32,
    pub goal: u32,
    /// total − goal, signed: positive means over the goal
    pub difference: i64,
    /// Sum of quantities across the day's items
    pub total_servings: u32,
}

impl DaySummary {
    pub fn from_day(day: &DayIntake, goal: u32) -> Self {
        Self {
            date: day.date,
            total_calories: day.total_calories,
            goal,
            difference: i64::from(day.total_calories) - i64::from(goal),
            total_servings: day.total_servings(),
        }
    }
}

/// Summarize day ledgers against the current goal, chronologically ascending.
///
/// The list display wants most-recent-first; callers reverse the result,
/// both orderings derive from the same set.
pub fn summarize(days: &[DayIntake], goal: u32) -> Vec<DaySummary> {
    let mut summaries: Vec<_> = days
        .iter()
        .map(|day| DaySummary::from_day(day, goal))
        .collect();
    summaries.sort_by_key(|s| s.date);
    summaries
}
