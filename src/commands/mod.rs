mod calendar;
mod config_cmd;
mod exercise;
mod heatmap;
mod settings;
mod workout;

use chrono::NaiveDate;
use clap::ValueEnum;

pub use calendar::CalendarCommand;
pub use config_cmd::ConfigCommand;
pub use exercise::ExerciseCommand;
pub use heatmap::HeatmapCommand;
pub use settings::SettingsCommand;
pub use workout::WorkoutCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))
}

/// Parses `YYYY-MM` into a year and month.
pub(crate) fn parse_month(s: &str) -> Result<(i32, u32), String> {
    use chrono::Datelike;

    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month format '{}'. Use YYYY-MM.", s))?;
    Ok((first.year(), first.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-09-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
        );
        assert!(parse_date("15/09/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-09").unwrap(), (2025, 9));
        assert_eq!(parse_month(" 2026-02 ").unwrap(), (2026, 2));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("September").is_err());
    }
}
