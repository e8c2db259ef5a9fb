use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::exercise::Exercise;

/// A logged workout. One workout belongs to exactly one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Workout {
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            exercises: Vec::new(),
            notes: None,
        }
    }

    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    pub fn with_exercise(mut self, exercise: Exercise) -> Self {
        self.exercises.push(exercise);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the workout in the shape it is persisted in: unnamed
    /// exercises removed and every set normalized.
    pub fn sanitized(mut self) -> Self {
        self.exercises.retain(Exercise::has_name);
        for exercise in &mut self.exercises {
            for set in &mut exercise.sets {
                *set = set.normalized();
            }
        }
        self
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::total_volume).sum()
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.name.trim().is_empty() {
            "Untitled workout"
        } else {
            self.name.as_str()
        };
        writeln!(f, "{} ({})", title, self.date)?;
        writeln!(f, "{}", "=".repeat(30))?;

        for exercise in &self.exercises {
            writeln!(f, "{}", exercise.name)?;
            for (index, set) in exercise.sets.iter().enumerate() {
                writeln!(f, "  {}. {}", index + 1, set)?;
            }
        }

        if let Some(notes) = &self.notes {
            writeln!(f, "\nNotes: {}", notes)?;
        }

        Ok(())
    }
}
