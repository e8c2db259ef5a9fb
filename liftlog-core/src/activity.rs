//! Calendar and heatmap views computed from a workout list.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Workout;

/// Highest heatmap intensity level.
pub const MAX_LEVEL: u8 = 4;

/// Number of workouts per day, for days with at least one.
pub fn activity_counts(workouts: &[Workout]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for workout in workouts {
        *counts.entry(workout.date).or_insert(0) += 1;
    }
    counts
}

fn month_days(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(
        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub has_activity: bool,
    pub selected: bool,
}

/// One month of days with activity and selection marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    /// Returns `None` for an invalid month.
    pub fn new(
        year: i32,
        month: u32,
        workouts: &[Workout],
        selected: Option<NaiveDate>,
    ) -> Option<Self> {
        let counts = activity_counts(workouts);
        let days = month_days(year, month)?
            .into_iter()
            .map(|date| CalendarDay {
                date,
                has_activity: counts.contains_key(&date),
                selected: selected == Some(date),
            })
            .collect();
        Some(Self { year, month, days })
    }

    /// Blank cells before the first day in a Monday-first grid.
    pub fn leading_blanks(&self) -> usize {
        self.days
            .first()
            .map(|d| d.date.weekday().num_days_from_monday() as usize)
            .unwrap_or(0)
    }

    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|d| d.has_activity).count()
    }

    /// Days arranged in Monday-first weeks; `None` pads partial weeks.
    pub fn weeks(&self) -> Vec<[Option<CalendarDay>; 7]> {
        grid(self.leading_blanks(), &self.days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: usize,
    /// `0..=MAX_LEVEL`, saturating at four workouts a day.
    pub level: u8,
}

impl HeatmapCell {
    fn new(date: NaiveDate, count: usize) -> Self {
        Self {
            date,
            count,
            level: count.min(MAX_LEVEL as usize) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    /// One cell per day of the month. Returns `None` for an invalid month.
    pub fn month(year: i32, month: u32, workouts: &[Workout]) -> Option<Self> {
        let counts = activity_counts(workouts);
        let cells = month_days(year, month)?
            .into_iter()
            .map(|date| HeatmapCell::new(date, counts.get(&date).copied().unwrap_or(0)))
            .collect();
        Some(Self { cells })
    }

    /// The `weeks` weeks ending at `end`, starting on a Monday. Returns
    /// `None` when the range reaches past the earliest representable date.
    pub fn trailing_weeks(end: NaiveDate, weeks: u32, workouts: &[Workout]) -> Option<Self> {
        let counts = activity_counts(workouts);
        let span = u64::from(weeks.max(1)) * 7 - 1;
        let start = end.checked_sub_days(Days::new(span))?;
        let start = start.checked_sub_days(Days::new(u64::from(
            start.weekday().num_days_from_monday(),
        )))?;

        let cells = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| HeatmapCell::new(date, counts.get(&date).copied().unwrap_or(0)))
            .collect();
        Some(Self { cells })
    }

    pub fn total_workouts(&self) -> usize {
        self.cells.iter().map(|c| c.count).sum()
    }

    pub fn active_days(&self) -> usize {
        self.cells.iter().filter(|c| c.count > 0).count()
    }

    /// Cells arranged in Monday-first weeks; `None` pads partial weeks.
    pub fn weeks(&self) -> Vec<[Option<HeatmapCell>; 7]> {
        let blanks = self
            .cells
            .first()
            .map(|c| c.date.weekday().num_days_from_monday() as usize)
            .unwrap_or(0);
        grid(blanks, &self.cells)
    }
}

fn grid<T: Copy>(leading_blanks: usize, items: &[T]) -> Vec<[Option<T>; 7]> {
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut column = leading_blanks;

    for item in items {
        week[column] = Some(*item);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }
    weeks
}
