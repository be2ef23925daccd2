//! The single translation point from persisted or imported JSON to the
//! canonical entities. Legacy record shapes are detected and repaired here;
//! everything downstream only ever sees the canonical shape.

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde_json::{Map, Value};

use liftlog_domain::{
    Exercise, Name, Reps, Set, Template, TemplateID, Weight, Workout, WorkoutID,
};

/// Upper bound when expanding a flat `{sets: count}` record, so a corrupt
/// count cannot balloon memory.
const MAX_EXPANDED_SETS: usize = 1000;

/// Converts one JSON-decoded workout record into a canonical [`Workout`].
/// Returns `None` for non-object input or a record whose date cannot be
/// interpreted as a calendar day.
#[must_use]
pub fn normalize_workout(raw: &Value) -> Option<Workout> {
    let record = raw.as_object()?;
    let date = record.get("date").and_then(Value::as_str).and_then(parse_date)?;

    let created_at = record
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map_or_else(Utc::now, |created_at| created_at.with_timezone(&Utc));

    Some(Workout {
        id: workout_id(record),
        date,
        focus: string_field(record.get("focus")),
        notes: string_field(record.get("notes")),
        exercises: normalize_exercises(record.get("exercises")),
        created_at,
    })
}

/// Converts one JSON-decoded exercise record into a canonical [`Exercise`].
///
/// The name is resolved from the legacy field names `exercise`, `name` and
/// `title` in that order and may come out empty; callers that require named
/// exercises filter afterwards. The set list is never empty: if nothing
/// usable can be recovered, a single default set remains.
#[must_use]
pub fn normalize_exercise(raw: &Value) -> Option<Exercise> {
    let record = raw.as_object()?;

    let name = ["exercise", "name", "title"]
        .iter()
        .find_map(|field| record.get(*field).and_then(Value::as_str))
        .unwrap_or_default()
        .trim()
        .to_string();

    let sets = match record.get("sets") {
        Some(Value::Array(entries)) => {
            let mut sets = entries.iter().filter_map(normalize_set).collect::<Vec<_>>();
            if sets.is_empty() {
                sets.push(default_set());
            }
            sets
        }
        count => expand_flat_sets(count, record.get("reps"), record.get("weight")),
    };

    Some(Exercise { name, sets })
}

/// Converts one JSON-decoded template record into a canonical [`Template`],
/// generating an ID when absent. A blank name defaults to `"Template"`; an
/// over-long name is truncated, never replaced.
#[must_use]
pub fn normalize_template(raw: &Value) -> Option<Template> {
    let record = raw.as_object()?;

    let id = match record.get("id").and_then(Value::as_str).map(str::trim) {
        Some(id) if !id.is_empty() => TemplateID::from(id),
        _ => TemplateID::random(),
    };
    let name = record
        .get("name")
        .and_then(Value::as_str)
        .and_then(Name::clamped)
        .unwrap_or_default();

    Some(Template {
        id,
        name,
        focus: string_field(record.get("focus")),
        exercises: normalize_exercises(record.get("exercises")),
    })
}

fn workout_id(record: &Map<String, Value>) -> WorkoutID {
    match record.get("id").and_then(Value::as_str).map(str::trim) {
        Some(id) if !id.is_empty() => WorkoutID::from(id),
        _ => WorkoutID::random(),
    }
}

fn normalize_exercises(raw: Option<&Value>) -> Vec<Exercise> {
    raw.and_then(Value::as_array).map_or_else(Vec::new, |entries| {
        entries.iter().filter_map(normalize_exercise).collect()
    })
}

/// One element of an explicit `sets` array. An entry with neither meaningful
/// reps nor a weight is dropped; otherwise invalid reps default to 1 and an
/// unusable weight becomes absent.
fn normalize_set(raw: &Value) -> Option<Set> {
    let reps = raw.get("reps").and_then(as_finite_number);
    let weight = raw.get("weight").and_then(as_finite_number);

    if reps.is_none_or(|r| r < 1.0) && weight.is_none() {
        return None;
    }

    Some(Set {
        reps: coerce_reps(reps),
        weight: weight.and_then(|w| Weight::new(w).ok()),
    })
}

/// The flat legacy shape `{sets: count, reps, weight}`: a positive count
/// expands into identical sets; otherwise a single set remains if reps or
/// weight is present at all, else a single default set.
fn expand_flat_sets(count: Option<&Value>, reps: Option<&Value>, weight: Option<&Value>) -> Vec<Set> {
    let count = count.and_then(as_finite_number);
    let reps = reps.and_then(as_finite_number);
    let weight = weight
        .and_then(as_finite_number)
        .and_then(|w| Weight::new(w).ok());

    let set = Set {
        reps: coerce_reps(reps),
        weight,
    };

    match count {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        Some(count) if count > 0.0 => {
            let requested = count.ceil();
            if requested > MAX_EXPANDED_SETS as f64 {
                warn!("clamping a set count of {requested} to {MAX_EXPANDED_SETS}");
            }
            vec![set; (requested as usize).min(MAX_EXPANDED_SETS)]
        }
        _ if reps.is_some() || weight.is_some() => vec![set],
        _ => vec![default_set()],
    }
}

fn default_set() -> Set {
    Set {
        reps: Reps::ONE,
        weight: None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_reps(value: Option<f64>) -> Reps {
    value
        .filter(|v| *v >= 1.0)
        .and_then(|v| Reps::new(v.round() as u32).ok())
        .unwrap_or(Reps::ONE)
}

/// Numeric coercion for legacy data: JSON numbers are taken as-is, numeric
/// strings are parsed, everything else (including non-finite values) is
/// treated as absent.
fn as_finite_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn string_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Accepts `YYYY-MM-DD`, also as the leading part of a longer ISO timestamp.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let prefix = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
