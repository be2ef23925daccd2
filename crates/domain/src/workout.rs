use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{AsRef, Display, Into};
use uuid::Uuid;

use crate::StorageError;

pub trait WorkoutRepository {
    /// All stored workouts. Must not fail: unreadable storage degrades to an
    /// empty collection.
    fn read_workouts(&self) -> Vec<Workout>;
    fn write_workouts(&self, workouts: &[Workout]) -> Result<(), StorageError>;
}

/// Opaque unique identifier. Freshly created workouts get a UUID, but any
/// non-empty string from legacy storage is preserved as-is.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A logged session. `date` is a calendar day and drives all windowing and
/// streak logic; `created_at` only records when the entry was made.
///
/// A workout without exercises is never produced by the editor flows but may
/// arrive from external data, so all consumers tolerate it (volume 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: NaiveDate,
    pub focus: String,
    pub notes: String,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    #[must_use]
    pub fn volume(&self) -> f64 {
        volume(&self.exercises)
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<Set>,
}

impl Exercise {
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.sets.iter().map(Set::volume).sum()
    }
}

/// One set of an exercise. Absent weight means bodyweight or no load and
/// contributes zero to volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub reps: Reps,
    pub weight: Option<Weight>,
}

impl Set {
    #[must_use]
    pub fn volume(&self) -> f64 {
        f64::from(u32::from(self.reps)) * self.weight.map_or(0.0, f64::from)
    }
}

/// Total work performed: reps × weight summed across all sets and exercises.
#[must_use]
pub fn volume(exercises: &[Exercise]) -> f64 {
    exercises.iter().map(Exercise::volume).sum()
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub const ONE: Reps = Reps(1);

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value == 0 {
            return Err(RepsError::Zero);
        }

        Ok(Self(value))
    }
}

impl Default for Reps {
    fn default() -> Self {
        Reps::ONE
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be at least 1")]
    Zero,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub fn new(value: f64) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::NotFinite);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f64>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be a finite number")]
    NotFinite,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, Ok(Reps(1)))]
    #[case(999, Ok(Reps(999)))]
    #[case(0, Err(RepsError::Zero))]
    fn test_reps_new(#[case] input: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(input), expected);
    }

    #[rstest]
    #[case("1", Ok(Reps(1)))]
    #[case(" 12 ", Ok(Reps(12)))]
    #[case("0", Err(RepsError::Zero))]
    #[case("4.", Err(RepsError::ParseError))]
    #[case("", Err(RepsError::ParseError))]
    fn test_reps_from_str(#[case] input: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(input), expected);
    }

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(102.5, Ok(Weight(102.5)))]
    #[case(f64::NAN, Err(WeightError::NotFinite))]
    #[case(f64::INFINITY, Err(WeightError::NotFinite))]
    fn test_weight_new(#[case] input: f64, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(input), expected);
    }

    #[rstest]
    #[case("2.0", Ok(Weight(2.0)))]
    #[case("8", Ok(Weight(8.0)))]
    #[case("", Err(WeightError::ParseError))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_from_str(#[case] input: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(input), expected);
    }

    #[rstest]
    #[case::bodyweight(Set { reps: Reps(5), weight: None }, 0.0)]
    #[case::loaded(Set { reps: Reps(3), weight: Some(Weight(10.0)) }, 30.0)]
    fn test_set_volume(#[case] set: Set, #[case] expected: f64) {
        assert_eq!(set.volume(), expected);
    }

    #[test]
    fn test_volume_ignores_absent_weight() {
        let exercises = vec![Exercise {
            name: "A".to_string(),
            sets: vec![
                Set {
                    reps: Reps(3),
                    weight: Some(Weight(10.0)),
                },
                Set {
                    reps: Reps(5),
                    weight: None,
                },
            ],
        }];
        assert_eq!(volume(&exercises), 30.0);
    }

    #[test]
    fn test_volume_accumulates_fractional_weights() {
        let exercises = vec![Exercise {
            name: "Curl".to_string(),
            sets: vec![
                Set {
                    reps: Reps(8),
                    weight: Some(Weight(12.5)),
                },
                Set {
                    reps: Reps(6),
                    weight: Some(Weight(7.25)),
                },
            ],
        }];
        assert_approx_eq!(volume(&exercises), 143.5);
    }

    #[test]
    fn test_volume_of_empty_workout() {
        let workout = Workout {
            id: WorkoutID::from("a"),
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            focus: String::new(),
            notes: String::new(),
            exercises: vec![],
            created_at: DateTime::<Utc>::MIN_UTC,
        };
        assert_eq!(workout.volume(), 0.0);
        assert_eq!(workout.set_count(), 0);
    }

    #[test]
    fn test_workout_set_count() {
        let workout = Workout {
            id: WorkoutID::random(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            focus: "Push".to_string(),
            notes: String::new(),
            exercises: vec![
                Exercise {
                    name: "Bench press".to_string(),
                    sets: vec![
                        Set {
                            reps: Reps(5),
                            weight: Some(Weight(80.0)),
                        };
                        3
                    ],
                },
                Exercise {
                    name: "Push-up".to_string(),
                    sets: vec![Set {
                        reps: Reps(20),
                        weight: None,
                    }],
                },
            ],
            created_at: DateTime::<Utc>::MIN_UTC,
        };
        assert_eq!(workout.set_count(), 4);
        assert_eq!(workout.volume(), 1200.0);
    }

    #[test]
    fn test_workout_id_random_is_unique() {
        assert_ne!(WorkoutID::random(), WorkoutID::random());
    }
}
