//! Date-indexed views over a workout list.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::btree_set;
use std::collections::BTreeSet;

use crate::models::Workout;

/// Distinct dates that have at least one logged workout.
///
/// Always derived from a workout list; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkoutDatesIndex(BTreeSet<NaiveDate>);

impl WorkoutDatesIndex {
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        workouts.iter().map(|w| w.date).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, NaiveDate> {
        self.0.iter()
    }

    /// Dates that fall in the given month, ascending.
    pub fn in_month(&self, year: i32, month: u32) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0
            .iter()
            .copied()
            .filter(move |d| d.year() == year && d.month() == month)
    }

    pub fn latest(&self) -> Option<NaiveDate> {
        self.0.last().copied()
    }
}

impl FromIterator<NaiveDate> for WorkoutDatesIndex {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WorkoutDatesIndex {
    type Item = &'a NaiveDate;
    type IntoIter = btree_set::Iter<'a, NaiveDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Workouts logged on exactly `date`, in list order.
pub fn workouts_on(workouts: &[Workout], date: NaiveDate) -> Vec<Workout> {
    workouts.iter().filter(|w| w.date == date).cloned().collect()
}

/// Workouts with `from <= date <= to`, in list order.
pub fn workouts_between(workouts: &[Workout], from: NaiveDate, to: NaiveDate) -> Vec<Workout> {
    workouts
        .iter()
        .filter(|w| w.date >= from && w.date <= to)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn workouts() -> Vec<Workout> {
        vec![
            Workout::new("1", "Legs", ymd(2025, 9, 15)),
            Workout::new("2", "Push", ymd(2025, 9, 15)),
            Workout::new("3", "Pull", ymd(2025, 9, 17)),
            Workout::new("4", "Run", ymd(2025, 10, 1)),
        ]
    }

    #[test]
    fn test_index_is_distinct() {
        let index = WorkoutDatesIndex::from_workouts(&workouts());
        assert_eq!(index.len(), 3);
        assert!(index.contains(ymd(2025, 9, 15)));
        assert!(!index.contains(ymd(2025, 9, 16)));
    }

    #[test]
    fn test_empty_index() {
        let index = WorkoutDatesIndex::from_workouts(&[]);
        assert!(index.is_empty());
        assert!(index.latest().is_none());
    }

    #[test]
    fn test_in_month() {
        let index = WorkoutDatesIndex::from_workouts(&workouts());
        let september: Vec<NaiveDate> = index.in_month(2025, 9).collect();
        assert_eq!(september, vec![ymd(2025, 9, 15), ymd(2025, 9, 17)]);
        assert_eq!(index.latest(), Some(ymd(2025, 10, 1)));
    }

    #[test]
    fn test_serializes_as_sorted_array() {
        let index = WorkoutDatesIndex::from_workouts(&workouts());
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"["2025-09-15","2025-09-17","2025-10-01"]"#);
    }

    #[test]
    fn test_workouts_on() {
        let on_day = workouts_on(&workouts(), ymd(2025, 9, 15));
        let ids: Vec<&str> = on_day.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(workouts_on(&workouts(), ymd(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_workouts_between_is_inclusive() {
        let range = workouts_between(&workouts(), ymd(2025, 9, 15), ymd(2025, 9, 17));
        assert_eq!(range.len(), 3);
    }
}
