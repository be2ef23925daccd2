use chrono::{DateTime, NaiveDate, Utc};
use log::{error, warn};
use serde::Serialize;
use serde_json::Value;

use liftlog_domain::{
    Exercise, Set, StorageError, Template, TemplateRepository, Workout, WorkoutRepository,
};

use crate::{
    Store, StoreError,
    normalize::{normalize_template, normalize_workout},
};

pub const KEY_WORKOUTS: &str = "workout-tracker-data-v1";
pub const KEY_TEMPLATES: &str = "workout-tracker-templates-v1";
pub const KEY_ACTIVE_VIEW: &str = "workout-tracker-active-view";

/// Repository persisting workouts and templates as JSON arrays in a
/// string-keyed [`Store`]. Reads never fail: unreadable or malformed data
/// degrades to the empty collection so a corrupt store behaves like a fresh
/// one.
pub struct LocalRepository<S> {
    store: S,
}

impl<S: Store> LocalRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The last view the user had open, if one was remembered.
    pub fn active_view(&self) -> Option<String> {
        match self.store.get(KEY_ACTIVE_VIEW) {
            Ok(view) => view,
            Err(err) => {
                warn!("failed to read active view: {err}");
                None
            }
        }
    }

    pub fn set_active_view(&self, view: &str) -> Result<(), StorageError> {
        self.store
            .set(KEY_ACTIVE_VIEW, view)
            .map_err(|StoreError::Unavailable(reason)| StorageError::Unavailable(reason))
    }

    fn read_records(&self, key: &str, entity: &str) -> Vec<Value> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return vec![],
            Err(err) => {
                error!("failed to read {entity}: {err}");
                return vec![];
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                warn!("stored {entity} are not a list, starting over");
                vec![]
            }
            Err(err) => {
                error!("failed to decode {entity}: {err}");
                vec![]
            }
        }
    }

    fn write_records<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store
            .set(key, &raw)
            .map_err(|StoreError::Unavailable(reason)| StorageError::Unavailable(reason))
    }
}

impl<S: Store> WorkoutRepository for LocalRepository<S> {
    fn read_workouts(&self) -> Vec<Workout> {
        self.read_records(KEY_WORKOUTS, "workouts")
            .iter()
            .filter_map(|record| {
                let workout = normalize_workout(record);
                if workout.is_none() {
                    warn!("dropping malformed workout record");
                }
                workout
            })
            .collect()
    }

    fn write_workouts(&self, workouts: &[Workout]) -> Result<(), StorageError> {
        let records = workouts.iter().map(WorkoutRecord::from).collect::<Vec<_>>();
        self.write_records(KEY_WORKOUTS, &records)
    }
}

impl<S: Store> TemplateRepository for LocalRepository<S> {
    fn read_templates(&self) -> Vec<Template> {
        self.read_records(KEY_TEMPLATES, "templates")
            .iter()
            .filter_map(|record| {
                let template = normalize_template(record);
                if template.is_none() {
                    warn!("dropping malformed template record");
                }
                template
            })
            .collect()
    }

    fn write_templates(&self, templates: &[Template]) -> Result<(), StorageError> {
        let records = templates
            .iter()
            .map(TemplateRecord::from)
            .collect::<Vec<_>>();
        self.write_records(KEY_TEMPLATES, &records)
    }
}

/// Canonical wire shape of a workout. Field names match what the normalizer
/// reads back, so a written store round-trips unchanged.
#[derive(Serialize)]
struct WorkoutRecord<'a> {
    id: &'a str,
    date: NaiveDate,
    focus: &'a str,
    notes: &'a str,
    exercises: Vec<ExerciseRecord<'a>>,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

impl<'a> From<&'a Workout> for WorkoutRecord<'a> {
    fn from(workout: &'a Workout) -> Self {
        Self {
            id: workout.id.as_str(),
            date: workout.date,
            focus: &workout.focus,
            notes: &workout.notes,
            exercises: workout.exercises.iter().map(ExerciseRecord::from).collect(),
            created_at: workout.created_at,
        }
    }
}

#[derive(Serialize)]
struct ExerciseRecord<'a> {
    exercise: &'a str,
    sets: Vec<SetRecord>,
}

impl<'a> From<&'a Exercise> for ExerciseRecord<'a> {
    fn from(exercise: &'a Exercise) -> Self {
        Self {
            exercise: &exercise.name,
            sets: exercise.sets.iter().map(SetRecord::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct SetRecord {
    reps: u32,
    weight: Option<f64>,
}

impl From<&Set> for SetRecord {
    fn from(set: &Set) -> Self {
        Self {
            reps: set.reps.into(),
            weight: set.weight.map(f64::from),
        }
    }
}

#[derive(Serialize)]
struct TemplateRecord<'a> {
    id: &'a str,
    name: &'a str,
    focus: &'a str,
    exercises: Vec<ExerciseRecord<'a>>,
}

impl<'a> From<&'a Template> for TemplateRecord<'a> {
    fn from(template: &'a Template) -> Self {
        Self {
            id: template.id.as_str(),
            name: template.name.as_str(),
            focus: &template.focus,
            exercises: template
                .exercises
                .iter()
                .map(ExerciseRecord::from)
                .collect(),
        }
    }
}
