use chrono::Local;
use clap::Args;

use liftlog_core::{Heatmap, Services, Theme};

use super::parse_month;

const DEFAULT_WEEKS: u32 = 12;
const MAX_WEEKS: i64 = 520;

/// Glyphs for levels 0 through 4.
const LIGHT_GLYPHS: [char; 5] = ['.', '-', '+', '*', '#'];
const DARK_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

#[derive(Args)]
pub struct HeatmapCommand {
    /// Month to show (YYYY-MM)
    #[arg(long, short, conflicts_with = "weeks")]
    month: Option<String>,

    /// Number of trailing weeks ending today
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..=MAX_WEEKS))]
    weeks: Option<u32>,
}

impl HeatmapCommand {
    pub async fn run(&self, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = services.workouts.snapshot();

        let heatmap = match &self.month {
            Some(m) => {
                let (year, month) = parse_month(m)?;
                Heatmap::month(year, month, &snapshot.workouts)
                    .ok_or_else(|| format!("Invalid month: {}", m))?
            }
            None => {
                let weeks = self.weeks.unwrap_or(DEFAULT_WEEKS);
                Heatmap::trailing_weeks(Local::now().date_naive(), weeks, &snapshot.workouts)
                    .ok_or_else(|| format!("--weeks {} reaches too far back", weeks))?
            }
        };

        print!("{}", render_heatmap(&heatmap, services.preferences.theme()));
        Ok(())
    }
}

/// One row per weekday, one column per week.
pub(crate) fn render_heatmap(heatmap: &Heatmap, theme: Theme) -> String {
    let glyphs = if theme.is_dark() {
        DARK_GLYPHS
    } else {
        LIGHT_GLYPHS
    };
    let weeks = heatmap.weeks();
    let mut out = String::new();

    if let (Some(first), Some(last)) = (heatmap.cells.first(), heatmap.cells.last()) {
        out.push_str(&format!("{} to {}\n", first.date, last.date));
    }

    for (row, label) in ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"].iter().enumerate() {
        let cells: String = weeks
            .iter()
            .map(|week| match week[row] {
                Some(cell) => format!(" {}", glyphs[usize::from(cell.level)]),
                None => "  ".to_string(),
            })
            .collect();
        out.push_str(&format!("{}{}\n", label, cells.trim_end()));
    }

    let legend: String = glyphs.iter().map(|g| format!(" {}", g)).collect();
    out.push_str(&format!(
        "\nLess{} More\n{} workout(s) on {} day(s)\n",
        legend,
        heatmap.total_workouts(),
        heatmap.active_days()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use liftlog_core::Workout;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_heatmap_levels() {
        // 2025-09-01 is a Monday
        let mut workouts = vec![Workout::new("a", "Run", date(2025, 9, 1))];
        for i in 0..5 {
            workouts.push(Workout::new(format!("b{}", i), "Lift", date(2025, 9, 2)));
        }
        let heatmap = Heatmap::month(2025, 9, &workouts).unwrap();

        let out = render_heatmap(&heatmap, Theme::Light);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "2025-09-01 to 2025-09-30");
        assert!(lines[1].starts_with("Mo -"));
        // Five workouts saturate at the top level
        assert!(lines[2].starts_with("Tu #"));
        assert!(lines[3].starts_with("We ."));
        assert!(out.contains("Less . - + * # More"));
        assert!(out.contains("6 workout(s) on 2 day(s)"));
    }

    #[test]
    fn test_render_heatmap_dark_theme() {
        let workouts = vec![Workout::new("a", "Run", date(2025, 9, 1))];
        let heatmap = Heatmap::month(2025, 9, &workouts).unwrap();

        let out = render_heatmap(&heatmap, Theme::Dark);
        assert!(out.lines().nth(1).unwrap().starts_with("Mo ░"));
        assert!(out.contains("Less · ░ ▒ ▓ █ More"));
    }

    #[test]
    fn test_render_trailing_weeks_has_one_column_per_week() {
        // 2025-09-21 is a Sunday, so four full weeks end there
        let heatmap = Heatmap::trailing_weeks(date(2025, 9, 21), 4, &[]).unwrap();
        let out = render_heatmap(&heatmap, Theme::Light);

        assert!(out.starts_with("2025-08-25 to 2025-09-21\n"));
        let sunday = out.lines().nth(7).unwrap();
        assert_eq!(sunday, "Su . . . .");
    }

    #[test]
    fn test_weeks_argument_is_bounded() {
        use clap::Parser;

        #[derive(Parser)]
        struct Cli {
            #[command(flatten)]
            heatmap: HeatmapCommand,
        }

        assert!(Cli::try_parse_from(["heatmap", "--weeks", "52"]).is_ok());
        assert!(Cli::try_parse_from(["heatmap", "--weeks", "0"]).is_err());
        assert!(Cli::try_parse_from(["heatmap", "--weeks", "100000000"]).is_err());
    }
}
