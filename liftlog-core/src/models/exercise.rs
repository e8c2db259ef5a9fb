use serde::{Deserialize, Serialize};

use super::set::Set;

/// An exercise within a workout. Set order is performance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: Vec<Set>,
}

impl Exercise {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sets: Vec::new(),
        }
    }

    pub fn with_sets(mut self, sets: Vec<Set>) -> Self {
        self.sets = sets;
        self
    }

    pub fn with_set(mut self, set: Set) -> Self {
        self.sets.push(set);
        self
    }

    /// Exercises without a name are dropped when a workout is saved.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn total_reps(&self) -> u32 {
        self.sets.iter().map(|s| s.reps).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.sets.iter().map(Set::volume).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SetUnit;

    #[test]
    fn test_exercise_new() {
        let exercise = Exercise::new("e1", "Squats");
        assert_eq!(exercise.id, "e1");
        assert_eq!(exercise.name, "Squats");
        assert!(exercise.sets.is_empty());
    }

    #[test]
    fn test_has_name_ignores_whitespace() {
        assert!(Exercise::new("e1", "Plank").has_name());
        assert!(!Exercise::new("e1", "").has_name());
        assert!(!Exercise::new("e1", "   ").has_name());
    }

    #[test]
    fn test_totals() {
        let exercise = Exercise::new("e1", "Bench Press")
            .with_set(Set::new(5, 80.0, SetUnit::Kilograms))
            .with_set(Set::new(3, 90.0, SetUnit::Kilograms));

        assert_eq!(exercise.total_reps(), 8);
        assert_eq!(exercise.total_volume(), 670.0);
    }
}
