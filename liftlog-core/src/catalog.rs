//! Predefined exercise names offered when logging a workout.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    UpperBody,
    LowerBody,
    Core,
    Cardio,
    Functional,
    YogaStretching,
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseCategory::UpperBody => write!(f, "Upper Body"),
            ExerciseCategory::LowerBody => write!(f, "Lower Body"),
            ExerciseCategory::Core => write!(f, "Core"),
            ExerciseCategory::Cardio => write!(f, "Cardio"),
            ExerciseCategory::Functional => write!(f, "Functional"),
            ExerciseCategory::YogaStretching => write!(f, "Yoga/Stretching"),
        }
    }
}

pub const CATALOG: &[(ExerciseCategory, &[&str])] = &[
    (
        ExerciseCategory::UpperBody,
        &[
            "Bench Press",
            "Incline Bench Press",
            "Decline Bench Press",
            "Overhead Press",
            "Shoulder Press",
            "Lateral Raises",
            "Front Raises",
            "Pull-ups",
            "Chin-ups",
            "Lat Pulldown",
            "Bent-over Rows",
            "Cable Rows",
            "Bicep Curls",
            "Hammer Curls",
            "Tricep Dips",
            "Tricep Extensions",
            "Push-ups",
            "Diamond Push-ups",
            "Pike Push-ups",
        ],
    ),
    (
        ExerciseCategory::LowerBody,
        &[
            "Squats",
            "Front Squats",
            "Back Squats",
            "Bulgarian Split Squats",
            "Lunges",
            "Walking Lunges",
            "Deadlifts",
            "Romanian Deadlifts",
            "Leg Press",
            "Leg Curls",
            "Leg Extensions",
            "Calf Raises",
            "Hip Thrusts",
            "Glute Bridges",
            "Step-ups",
        ],
    ),
    (
        ExerciseCategory::Core,
        &[
            "Plank",
            "Side Plank",
            "Russian Twists",
            "Mountain Climbers",
            "Crunches",
            "Sit-ups",
            "Leg Raises",
            "Bicycle Crunches",
            "Dead Bug",
            "Bird Dog",
            "Hollow Hold",
        ],
    ),
    (
        ExerciseCategory::Cardio,
        &[
            "Running",
            "Walking",
            "Cycling",
            "Rowing",
            "Swimming",
            "Jump Rope",
            "Burpees",
            "High Knees",
            "Jumping Jacks",
            "Elliptical",
            "Stair Climbing",
        ],
    ),
    (
        ExerciseCategory::Functional,
        &[
            "Kettlebell Swings",
            "Turkish Get-ups",
            "Farmer's Walk",
            "Battle Ropes",
            "Box Jumps",
            "Medicine Ball Slams",
        ],
    ),
    (
        ExerciseCategory::YogaStretching,
        &["Yoga", "Pilates", "Stretching", "Foam Rolling"],
    ),
];

/// Every catalog name in catalog order.
pub fn all() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().flat_map(|(_, names)| names.iter().copied())
}

/// Names containing `query`, case-insensitively, in catalog order.
/// An empty query matches everything.
pub fn search(query: &str) -> Vec<&'static str> {
    let needle = query.to_lowercase();
    all()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
}

pub fn category_of(name: &str) -> Option<ExerciseCategory> {
    CATALOG
        .iter()
        .find(|(_, names)| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size() {
        assert_eq!(all().count(), 66);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let results = search("SQUAT");
        assert_eq!(
            results,
            vec!["Squats", "Front Squats", "Back Squats", "Bulgarian Split Squats"]
        );
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(search("").len(), all().count());
        // The query is not trimmed: a space matches multi-word names only
        assert!(search("  ").is_empty());
        assert!(search(" ").contains(&"Bench Press"));
        assert!(!search(" ").contains(&"Squats"));
    }

    #[test]
    fn test_no_match() {
        assert!(search("zumba").is_empty());
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("plank"), Some(ExerciseCategory::Core));
        assert_eq!(category_of("Farmer's Walk"), Some(ExerciseCategory::Functional));
        assert_eq!(category_of("Zumba"), None);
    }
}
