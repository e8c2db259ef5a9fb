//! Editing state for a workout that has not been saved yet.

use chrono::NaiveDate;

use crate::ids::IdGenerator;
use crate::models::{Exercise, Set, SetUnit, Workout};

/// A single-field change to a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetEdit {
    Reps(u32),
    Weight(f64),
    Unit(SetUnit),
}

/// Workout under construction. Exercises may be unnamed while editing;
/// they are dropped by [`WorkoutDraft::finish`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutDraft {
    pub name: String,
    pub notes: String,
    exercises: Vec<Exercise>,
}

impl WorkoutDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a draft from a saved workout, for editing.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            name: workout.name.clone(),
            notes: workout.notes.clone().unwrap_or_default(),
            exercises: workout.exercises.clone(),
        }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Adds an unnamed exercise with one empty set and returns its id.
    pub fn add_exercise(&mut self, ids: &IdGenerator, unit: SetUnit) -> String {
        let id = ids.next_id();
        self.exercises
            .push(Exercise::new(id.clone(), "").with_set(Set::empty(unit)));
        id
    }

    /// Appends an already-built exercise.
    pub fn push_exercise(&mut self, exercise: Exercise) {
        self.exercises.push(exercise);
    }

    pub fn remove_exercise(&mut self, exercise_id: &str) -> bool {
        let before = self.exercises.len();
        self.exercises.retain(|e| e.id != exercise_id);
        self.exercises.len() != before
    }

    pub fn rename_exercise(&mut self, exercise_id: &str, name: impl Into<String>) -> bool {
        match self.exercise_mut(exercise_id) {
            Some(exercise) => {
                exercise.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn add_set(&mut self, exercise_id: &str, unit: SetUnit) -> bool {
        match self.exercise_mut(exercise_id) {
            Some(exercise) => {
                exercise.sets.push(Set::empty(unit));
                true
            }
            None => false,
        }
    }

    pub fn remove_set(&mut self, exercise_id: &str, index: usize) -> bool {
        match self.exercise_mut(exercise_id) {
            Some(exercise) if index < exercise.sets.len() => {
                exercise.sets.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn update_set(&mut self, exercise_id: &str, index: usize, edit: SetEdit) -> bool {
        let Some(set) = self.set_mut(exercise_id, index) else {
            return false;
        };
        let updated = match edit {
            SetEdit::Reps(reps) => Set::new(reps, set.weight, set.unit),
            SetEdit::Weight(weight) => Set::new(set.reps, weight, set.unit),
            SetEdit::Unit(unit) => Set::new(set.reps, set.weight, unit),
        };
        *set = updated;
        true
    }

    /// Switches a set between bodyweight and the user's weight unit.
    pub fn toggle_bodyweight(&mut self, exercise_id: &str, index: usize, unit: SetUnit) -> bool {
        let Some(current) = self.set_mut(exercise_id, index).map(|s| s.unit) else {
            return false;
        };
        let next = if current.is_bodyweight() {
            unit
        } else {
            SetUnit::Bodyweight
        };
        self.update_set(exercise_id, index, SetEdit::Unit(next))
    }

    /// Builds the workout to save: blank-named exercises dropped and blank
    /// notes omitted.
    pub fn finish(self, id: impl Into<String>, date: NaiveDate) -> Workout {
        let notes = self.notes.trim();
        let workout = Workout::new(id, self.name, date).with_exercises(self.exercises);
        let workout = if notes.is_empty() {
            workout
        } else {
            workout.with_notes(notes)
        };
        workout.sanitized()
    }

    fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == exercise_id)
    }

    fn set_mut(&mut self, exercise_id: &str, index: usize) -> Option<&mut Set> {
        self.exercise_mut(exercise_id)
            .and_then(|e| e.sets.get_mut(index))
    }
}
