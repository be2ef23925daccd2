use std::collections::BTreeSet;

use chrono::{Duration, Local, NaiveDate};

use crate::Workout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    All,
    Week,
    Month,
}

impl TimeRange {
    /// Calendar-day window ending at `today` inclusive: the last 7 days for
    /// `Week`, the last 30 days for `Month`, no window for `All`.
    #[must_use]
    pub fn window(self, today: NaiveDate) -> Option<Interval> {
        let days = match self {
            TimeRange::All => return None,
            TimeRange::Week => 6,
            TimeRange::Month => 29,
        };
        Some(Interval {
            first: today - Duration::days(days),
            last: today,
        })
    }

    #[must_use]
    pub fn includes(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.window(today).is_none_or(|w| w.contains(date))
    }
}

/// Consecutive calendar days with at least one workout, counted backward from
/// the most recent logged day. Multiple workouts on the same day count once.
///
/// The most recent logged day is the anchor even if it is not today, so a
/// streak can be computed for a stale dataset.
#[must_use]
pub fn current_streak(workouts: &[Workout]) -> u32 {
    let days = workouts.iter().map(|w| w.date).collect::<BTreeSet<_>>();
    let Some(&most_recent) = days.last() else {
        return 0;
    };

    let mut streak = 0;
    let mut cursor = most_recent;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

/// Dashboard aggregate over the whole collection, computed against the local
/// calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_workouts: usize,
    pub sessions_this_week: usize,
    pub total_sets: usize,
    pub volume_this_week: f64,
    pub current_streak: u32,
}

#[must_use]
pub fn summary(workouts: &[Workout]) -> Summary {
    let today = Local::now().date_naive();
    let this_week = workouts
        .iter()
        .filter(|w| TimeRange::Week.includes(w.date, today))
        .collect::<Vec<_>>();

    Summary {
        total_workouts: workouts.len(),
        sessions_this_week: this_week.len(),
        total_sets: workouts.iter().map(Workout::set_count).sum(),
        volume_this_week: this_week.iter().map(|w| w.volume()).sum(),
        current_streak: current_streak(workouts),
    }
}
