#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod history;
pub mod service;
pub mod statistics;
pub mod template;
pub mod workout;

pub use error::{CreateError, DeleteError, StorageError, UpdateError};
pub use history::{FocusFilter, FocusOption, distinct_focuses, filter_history, history_summary};
pub use service::Service;
pub use statistics::{Interval, Summary, TimeRange, current_streak, summary};
pub use template::{Name, NameError, Template, TemplateID, TemplateRepository};
pub use workout::{
    Exercise, Reps, RepsError, Set, Weight, WeightError, Workout, WorkoutID, WorkoutRepository,
    volume,
};
