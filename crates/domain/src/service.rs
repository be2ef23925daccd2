use chrono::{NaiveDate, Utc};
use log::error;

use crate::{
    CreateError, DeleteError, Exercise, FocusFilter, Name, StorageError, Summary, Template,
    TemplateID, TemplateRepository, TimeRange, UpdateError, Workout, WorkoutID, WorkoutRepository,
    filter_history, history_summary, summary,
};

/// Owns the in-memory collections for one application session and keeps them
/// mirrored to the repository. Every mutation persists before returning; a
/// failed write is logged and surfaced, while the in-memory change is kept
/// (only durability is lost).
pub struct Service<R> {
    repository: R,
    workouts: Vec<Workout>,
    templates: Vec<Template>,
}

impl<R> Service<R>
where
    R: WorkoutRepository + TemplateRepository,
{
    pub fn load(repository: R) -> Self {
        let workouts = repository.read_workouts();
        let templates = repository.read_templates();
        Self {
            repository,
            workouts,
            templates,
        }
    }

    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    #[must_use]
    pub fn template(&self, id: &TemplateID) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == *id)
    }

    /// Logs a new workout with a fresh ID and creation timestamp. Exercises
    /// with a blank name or no sets are dropped first; an empty result is
    /// rejected.
    pub fn create_workout(
        &mut self,
        date: NaiveDate,
        focus: &str,
        notes: &str,
        exercises: Vec<Exercise>,
    ) -> Result<WorkoutID, CreateError> {
        let exercises = named_exercises(exercises);
        if exercises.is_empty() {
            return Err(CreateError::NoExercises);
        }

        let workout = Workout {
            id: WorkoutID::random(),
            date,
            focus: focus.trim().to_string(),
            notes: notes.trim().to_string(),
            exercises,
            created_at: Utc::now(),
        };
        let id = workout.id.clone();
        self.workouts.insert(0, workout);
        self.save_workouts()?;
        Ok(id)
    }

    /// Full-record replace during edit-save. `id` and `created_at` are
    /// preserved.
    pub fn replace_workout(
        &mut self,
        id: &WorkoutID,
        date: NaiveDate,
        focus: &str,
        notes: &str,
        exercises: Vec<Exercise>,
    ) -> Result<(), UpdateError> {
        let exercises = named_exercises(exercises);
        if exercises.is_empty() {
            return Err(UpdateError::NoExercises);
        }

        let Some(workout) = self.workouts.iter_mut().find(|w| w.id == *id) else {
            return Err(UpdateError::NotFound);
        };
        workout.date = date;
        workout.focus = focus.trim().to_string();
        workout.notes = notes.trim().to_string();
        workout.exercises = exercises;
        self.save_workouts()?;
        Ok(())
    }

    pub fn delete_workout(&mut self, id: &WorkoutID) -> Result<(), DeleteError> {
        let count = self.workouts.len();
        self.workouts.retain(|w| w.id != *id);
        if self.workouts.len() == count {
            return Err(DeleteError::NotFound);
        }
        self.save_workouts()?;
        Ok(())
    }

    pub fn create_template(
        &mut self,
        name: Name,
        focus: &str,
        exercises: Vec<Exercise>,
    ) -> Result<TemplateID, CreateError> {
        let exercises = named_exercises(exercises);
        if exercises.is_empty() {
            return Err(CreateError::NoExercises);
        }

        let template = Template {
            id: TemplateID::random(),
            name,
            focus: focus.trim().to_string(),
            exercises,
        };
        let id = template.id.clone();
        self.templates.push(template);
        self.save_templates()?;
        Ok(id)
    }

    pub fn delete_template(&mut self, id: &TemplateID) -> Result<(), DeleteError> {
        let count = self.templates.len();
        self.templates.retain(|t| t.id != *id);
        if self.templates.len() == count {
            return Err(DeleteError::NotFound);
        }
        self.save_templates()?;
        Ok(())
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        summary(&self.workouts)
    }

    #[must_use]
    pub fn history(&self, range: TimeRange, focus: &FocusFilter) -> Vec<Workout> {
        filter_history(&self.workouts, range, focus)
    }

    #[must_use]
    pub fn history_summary(
        &self,
        filtered: &[Workout],
        range: TimeRange,
        focus: &FocusFilter,
    ) -> String {
        history_summary(&self.workouts, filtered, range, focus)
    }

    fn save_workouts(&self) -> Result<(), StorageError> {
        let result = self.repository.write_workouts(&self.workouts);
        if let Err(ref err) = result {
            error!("failed to save workouts: {err}");
        }
        result
    }

    fn save_templates(&self) -> Result<(), StorageError> {
        let result = self.repository.write_templates(&self.templates);
        if let Err(ref err) = result {
            error!("failed to save templates: {err}");
        }
        result
    }
}

fn named_exercises(exercises: Vec<Exercise>) -> Vec<Exercise> {
    exercises
        .into_iter()
        .filter(|e| !e.name.trim().is_empty() && !e.sets.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::Local;
    use pretty_assertions::assert_eq;

    use crate::{Reps, Set, Weight};

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        workouts: RefCell<Vec<Workout>>,
        templates: RefCell<Vec<Template>>,
        fail_writes: Cell<bool>,
    }

    impl WorkoutRepository for &FakeRepository {
        fn read_workouts(&self) -> Vec<Workout> {
            self.workouts.borrow().clone()
        }

        fn write_workouts(&self, workouts: &[Workout]) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Unavailable("quota exceeded".to_string()));
            }
            *self.workouts.borrow_mut() = workouts.to_vec();
            Ok(())
        }
    }

    impl TemplateRepository for &FakeRepository {
        fn read_templates(&self) -> Vec<Template> {
            self.templates.borrow().clone()
        }

        fn write_templates(&self, templates: &[Template]) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Unavailable("quota exceeded".to_string()));
            }
            *self.templates.borrow_mut() = templates.to_vec();
            Ok(())
        }
    }

    fn squat() -> Exercise {
        Exercise {
            name: "Squat".to_string(),
            sets: vec![Set {
                reps: Reps::new(5).unwrap(),
                weight: Some(Weight::new(100.0).unwrap()),
            }],
        }
    }

    fn unnamed() -> Exercise {
        Exercise {
            name: "   ".to_string(),
            sets: vec![Set {
                reps: Reps::ONE,
                weight: None,
            }],
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    #[test]
    fn test_create_workout_persists() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);

        let id = service
            .create_workout(today(), "  Push ", " felt strong ", vec![squat(), unnamed()])
            .unwrap();

        assert_eq!(service.workouts().len(), 1);
        let workout = &service.workouts()[0];
        assert_eq!(workout.id, id);
        assert_eq!(workout.focus, "Push");
        assert_eq!(workout.notes, "felt strong");
        assert_eq!(workout.exercises, vec![squat()]);
        assert_eq!(*repository.workouts.borrow(), service.workouts());
    }

    #[test]
    fn test_create_workout_prepends() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);

        let first = service
            .create_workout(today(), "A", "", vec![squat()])
            .unwrap();
        let second = service
            .create_workout(today(), "B", "", vec![squat()])
            .unwrap();

        assert_eq!(service.workouts()[0].id, second);
        assert_eq!(service.workouts()[1].id, first);
    }

    #[test]
    fn test_create_workout_without_exercises() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);

        assert_eq!(
            service.create_workout(today(), "Push", "", vec![unnamed()]),
            Err(CreateError::NoExercises)
        );
        assert!(service.workouts().is_empty());
    }

    #[test]
    fn test_replace_workout_preserves_id_and_created_at() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);

        let id = service
            .create_workout(today(), "Push", "", vec![squat()])
            .unwrap();
        let created_at = service.workouts()[0].created_at;

        service
            .replace_workout(&id, today(), "Legs", "tweaked", vec![squat()])
            .unwrap();

        let workout = &service.workouts()[0];
        assert_eq!(workout.id, id);
        assert_eq!(workout.created_at, created_at);
        assert_eq!(workout.focus, "Legs");
        assert_eq!(workout.notes, "tweaked");
    }

    #[test]
    fn test_replace_unknown_workout() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);

        assert_eq!(
            service.replace_workout(
                &WorkoutID::from("missing"),
                today(),
                "",
                "",
                vec![squat()]
            ),
            Err(UpdateError::NotFound)
        );
    }

    #[test]
    fn test_delete_workout() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);

        let id = service
            .create_workout(today(), "Push", "", vec![squat()])
            .unwrap();
        service.delete_workout(&id).unwrap();

        assert!(service.workouts().is_empty());
        assert!(repository.workouts.borrow().is_empty());
        assert_eq!(
            service.delete_workout(&id),
            Err(DeleteError::NotFound)
        );
    }

    #[test]
    fn test_create_and_delete_template() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);

        let id = service
            .create_template(Name::new("Push day").unwrap(), "Push", vec![squat()])
            .unwrap();
        assert_eq!(service.templates().len(), 1);
        assert_eq!(service.template(&id).unwrap().name.as_str(), "Push day");

        service.delete_template(&id).unwrap();
        assert!(service.templates().is_empty());
        assert_eq!(service.delete_template(&id), Err(DeleteError::NotFound));
    }

    #[test]
    fn test_write_failure_is_surfaced_and_state_kept() {
        let repository = FakeRepository::default();
        let mut service = Service::load(&repository);
        repository.fail_writes.set(true);

        let result = service.create_workout(today(), "Push", "", vec![squat()]);

        assert_eq!(
            result,
            Err(CreateError::Storage(StorageError::Unavailable(
                "quota exceeded".to_string()
            )))
        );
        assert_eq!(service.workouts().len(), 1);
        assert!(repository.workouts.borrow().is_empty());
    }

    #[test]
    fn test_load_reads_existing_collections() {
        let repository = FakeRepository::default();
        {
            let mut service = Service::load(&repository);
            service
                .create_workout(today(), "Push", "", vec![squat()])
                .unwrap();
            service
                .create_template(Name::new("Push day").unwrap(), "Push", vec![squat()])
                .unwrap();
        }

        let service = Service::load(&repository);
        assert_eq!(service.workouts().len(), 1);
        assert_eq!(service.templates().len(), 1);
    }
}
