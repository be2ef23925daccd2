use chrono::Local;

use crate::{TimeRange, Workout};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum FocusFilter {
    #[default]
    All,
    Tag(String),
}

impl FocusFilter {
    #[must_use]
    pub fn matches(&self, workout: &Workout) -> bool {
        match self {
            FocusFilter::All => true,
            FocusFilter::Tag(tag) => {
                workout.focus.trim().to_lowercase() == tag.trim().to_lowercase()
            }
        }
    }
}

/// An entry of the focus filter dropdown: lowercase key, first-seen casing as
/// the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusOption {
    pub key: String,
    pub label: String,
}

/// Workouts within `range` (relative to the local calendar day) that match
/// `focus`, sorted by date descending. The order of workouts sharing a date
/// is unspecified.
#[must_use]
pub fn filter_history(workouts: &[Workout], range: TimeRange, focus: &FocusFilter) -> Vec<Workout> {
    let today = Local::now().date_naive();
    let mut result = workouts
        .iter()
        .filter(|w| range.includes(w.date, today))
        .filter(|w| focus.matches(w))
        .cloned()
        .collect::<Vec<_>>();
    result.sort_by(|a, b| b.date.cmp(&a.date));
    result
}

/// Distinct focus tags, deduplicated case-insensitively and sorted
/// case-insensitively by label. Blank focuses are excluded.
#[must_use]
pub fn distinct_focuses(workouts: &[Workout]) -> Vec<FocusOption> {
    let mut options: Vec<FocusOption> = Vec::new();
    for workout in workouts {
        let focus = workout.focus.trim();
        if focus.is_empty() {
            continue;
        }
        let key = focus.to_lowercase();
        if options.iter().all(|o| o.key != key) {
            options.push(FocusOption {
                key,
                label: focus.to_string(),
            });
        }
    }
    options.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    options
}

/// Display string for the active filter. Three mutually exclusive states: no
/// workouts exist at all, the filters matched nothing, or a count message.
#[must_use]
pub fn history_summary(
    workouts: &[Workout],
    filtered: &[Workout],
    range: TimeRange,
    focus: &FocusFilter,
) -> String {
    if workouts.is_empty() {
        return "No workouts yet. Add one above to build your streak.".to_string();
    }
    if filtered.is_empty() {
        return "No workouts match the selected filters yet.".to_string();
    }

    let count = filtered.len();
    let label = if count == 1 { "workout" } else { "workouts" };
    let mut message = format!("Showing {count} {label}");
    match range {
        TimeRange::Week => message.push_str(" in the last 7 days"),
        TimeRange::Month => message.push_str(" in the last 30 days"),
        TimeRange::All => {}
    }
    if let FocusFilter::Tag(tag) = focus {
        let key = tag.trim().to_lowercase();
        let label = distinct_focuses(workouts)
            .into_iter()
            .find(|o| o.key == key)
            .map_or_else(|| tag.trim().to_string(), |o| o.label);
        message.push_str(&format!(" focused on {label}"));
    }
    message.push('.');
    message
}
