use chrono::{Datelike, Local};
use clap::Args;

use liftlog_core::{MonthCalendar, Services};

use super::{parse_date, parse_month};

const WEEKDAY_HEADER: &str = " Mo  Tu  We  Th  Fr  Sa  Su";

#[derive(Args)]
pub struct CalendarCommand {
    /// Month to show (YYYY-MM), defaults to the selected date's month or today
    #[arg(long, short)]
    month: Option<String>,

    /// Highlight a date (YYYY-MM-DD) and list its workouts
    #[arg(long, short)]
    select: Option<String>,
}

impl CalendarCommand {
    pub async fn run(&self, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
        let selected = self.select.as_deref().map(parse_date).transpose()?;

        let (year, month) = match (&self.month, selected) {
            (Some(m), _) => parse_month(m)?,
            (None, Some(date)) => (date.year(), date.month()),
            (None, None) => {
                let today = Local::now().date_naive();
                (today.year(), today.month())
            }
        };

        let snapshot = services.workouts.snapshot();
        let calendar = MonthCalendar::new(year, month, &snapshot.workouts, selected)
            .ok_or_else(|| format!("Invalid month: {}-{:02}", year, month))?;

        print!("{}", render_calendar(&calendar));

        if let Some(date) = selected {
            let workouts = snapshot.workouts_for_date(date);
            println!();
            if workouts.is_empty() {
                println!("No workouts on {}", date);
            } else {
                for workout in &workouts {
                    println!("[{}] {}", workout.id, workout);
                }
            }
        }

        Ok(())
    }
}

/// Monday-first month grid. Days with workouts carry a `*`, the selected
/// day is wrapped in brackets.
pub(crate) fn render_calendar(calendar: &MonthCalendar) -> String {
    let mut out = String::new();
    let title = calendar
        .days
        .first()
        .map(|d| d.date.format("%B %Y").to_string())
        .unwrap_or_default();

    out.push_str(&format!("{:^28}\n", title));
    out.push_str(WEEKDAY_HEADER);
    out.push('\n');

    for week in calendar.weeks() {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                None => "    ".to_string(),
                Some(day) => {
                    let mark = if day.has_activity { '*' } else { ' ' };
                    if day.selected {
                        format!("[{:>2}]", day.date.day())
                    } else {
                        format!(" {:>2}{}", day.date.day(), mark)
                    }
                }
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} active day(s) this month\n",
        calendar.active_days()
    ));
    out
}
