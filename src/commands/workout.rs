use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use std::io::{self, Write};

use liftlog_core::dates::{workouts_between, workouts_on};
use liftlog_core::{Exercise, Services, Set, SetUnit, Workout, WorkoutDraft};

use super::{parse_date, OutputFormat};

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Log a new workout
    Log {
        /// Name of the workout
        #[arg(long)]
        name: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Exercise as NAME=SETS, e.g. "Squats=5x100,8x60lbs,12xbw" (can be repeated)
        #[arg(long = "exercise", short = 'e', value_name = "SPEC")]
        exercises: Vec<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List logged workouts
    List {
        /// Only workouts on this date (YYYY-MM-DD)
        #[arg(long, short, conflicts_with_all = ["from", "to"])]
        date: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a workout's details
    Show {
        /// Workout ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Replace fields of an existing workout
    Update {
        /// Workout ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<String>,

        /// New notes (empty string clears them)
        #[arg(long)]
        notes: Option<String>,

        /// Replacement exercise list as NAME=SETS (can be repeated)
        #[arg(long = "exercise", short = 'e', value_name = "SPEC")]
        exercises: Vec<String>,
    },

    /// Delete a workout
    Delete {
        /// Workout ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Delete every logged workout
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl WorkoutCommand {
    pub async fn run(&self, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
        let repo = &services.workouts;

        match &self.command {
            WorkoutSubcommand::Log {
                name,
                date,
                exercises,
                notes,
            } => {
                if name.trim().is_empty() {
                    return Err("Workout name cannot be empty".into());
                }

                let date = match date {
                    Some(d) => parse_date(d)?,
                    None => Local::now().date_naive(),
                };
                let default_unit = services.preferences.weight_unit().set_unit();

                let mut draft = WorkoutDraft::new();
                draft.name = name.trim().to_string();
                if let Some(notes) = notes {
                    draft.notes = notes.clone();
                }
                for spec in exercises {
                    let (exercise_name, sets) = parse_exercise_spec(spec, default_unit)?;
                    draft.push_exercise(
                        Exercise::new(services.ids().next_id(), exercise_name).with_sets(sets),
                    );
                }

                let workout = draft.finish(services.ids().next_id(), date);
                repo.add_workout(workout.clone()).await?;

                println!("Logged workout {}:", workout.id);
                println!("{}", workout);
                Ok(())
            }

            WorkoutSubcommand::List {
                date,
                from,
                to,
                format,
            } => {
                let snapshot = repo.snapshot();

                let mut workouts = match (date, from, to) {
                    (Some(d), _, _) => workouts_on(&snapshot.workouts, parse_date(d)?),
                    (None, None, None) => snapshot.workouts.to_vec(),
                    (None, from, to) => {
                        let from = match from {
                            Some(d) => parse_date(d)?,
                            None => NaiveDate::MIN,
                        };
                        let to = match to {
                            Some(d) => parse_date(d)?,
                            None => NaiveDate::MAX,
                        };
                        if from > to {
                            return Err(format!("--from {} is after --to {}", from, to).into());
                        }
                        workouts_between(&snapshot.workouts, from, to)
                    }
                };

                if workouts.is_empty() {
                    println!("No workouts found");
                    return Ok(());
                }

                // Stable, so same-day workouts keep the order they were logged in
                workouts.sort_by_key(|w| w.date);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&workouts)?);
                    }
                    OutputFormat::Text => print!("{}", render_list(&workouts)),
                }
                Ok(())
            }

            WorkoutSubcommand::Show { id, format } => {
                let snapshot = repo.snapshot();
                let workout = snapshot
                    .find(id)
                    .ok_or_else(|| format!("Workout not found: {}", id))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(workout)?);
                    }
                    OutputFormat::Text => {
                        println!("ID: {}", workout.id);
                        print!("{}", workout);
                        println!(
                            "\n{} set(s), volume {}",
                            workout.total_sets(),
                            workout.total_volume()
                        );
                    }
                }
                Ok(())
            }

            WorkoutSubcommand::Update {
                id,
                name,
                date,
                notes,
                exercises,
            } => {
                let has_updates =
                    name.is_some() || date.is_some() || notes.is_some() || !exercises.is_empty();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let mut workout = repo
                    .snapshot()
                    .find(id)
                    .cloned()
                    .ok_or_else(|| format!("Workout not found: {}", id))?;

                if let Some(new_name) = name {
                    if new_name.trim().is_empty() {
                        return Err("Workout name cannot be empty".into());
                    }
                    workout.name = new_name.trim().to_string();
                }
                if let Some(new_date) = date {
                    workout.date = parse_date(new_date)?;
                }
                if let Some(new_notes) = notes {
                    let trimmed = new_notes.trim();
                    workout.notes = (!trimmed.is_empty()).then(|| trimmed.to_string());
                }
                if !exercises.is_empty() {
                    let default_unit = services.preferences.weight_unit().set_unit();
                    let mut replacement = Vec::with_capacity(exercises.len());
                    for spec in exercises {
                        let (exercise_name, sets) = parse_exercise_spec(spec, default_unit)?;
                        replacement.push(
                            Exercise::new(services.ids().next_id(), exercise_name).with_sets(sets),
                        );
                    }
                    workout.exercises = replacement;
                }

                repo.update_workout(id, workout).await?;

                let snapshot = repo.snapshot();
                if let Some(updated) = snapshot.find(id) {
                    println!("Updated workout:");
                    println!("{}", updated);
                }
                Ok(())
            }

            WorkoutSubcommand::Delete { id, force } => {
                let workout = repo
                    .snapshot()
                    .find(id)
                    .cloned()
                    .ok_or_else(|| format!("Workout not found: {}", id))?;

                let prompt = format!("Delete workout '{}' ({})?", workout.name, workout.date);
                if !force && !confirm(&prompt)? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                repo.delete_workout(&workout.id).await?;
                println!("Deleted workout: {}", workout.name);
                Ok(())
            }

            WorkoutSubcommand::Clear { force } => {
                let count = repo.snapshot().workouts.len();
                if count == 0 {
                    println!("No workouts to clear");
                    return Ok(());
                }

                if !force && !confirm(&format!("Delete all {} workout(s)?", count))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                repo.clear().await?;
                println!("Deleted {} workout(s)", count);
                Ok(())
            }
        }
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Parses `NAME=SETS` where SETS is a comma-separated list of
/// `REPSxWEIGHT[UNIT]` or `REPSxbw`. A bare `NAME` gives an exercise
/// without sets. Weights without a unit use `default_unit`.
pub(crate) fn parse_exercise_spec(
    spec: &str,
    default_unit: SetUnit,
) -> Result<(String, Vec<Set>), String> {
    let (name, sets) = match spec.split_once('=') {
        Some((name, sets)) => (name.trim(), sets.trim()),
        None => (spec.trim(), ""),
    };

    if name.is_empty() {
        return Err(format!("Exercise name missing in '{}'", spec));
    }

    let sets = sets
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_set(s, default_unit))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((name.to_string(), sets))
}

fn parse_set(token: &str, default_unit: SetUnit) -> Result<Set, String> {
    let invalid = || {
        format!(
            "Invalid set '{}'. Use REPSxWEIGHT[kg|lbs] or REPSxbw, e.g. 5x100",
            token
        )
    };

    let lower = token.to_lowercase();
    let (reps, load) = lower.split_once('x').ok_or_else(invalid)?;
    let reps: u32 = reps.trim().parse().map_err(|_| invalid())?;
    let load = load.trim();

    let split = load
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(load.len());
    let (weight, unit) = load.split_at(split);

    let unit = match unit.trim() {
        "" => default_unit,
        other => other.parse::<SetUnit>()?,
    };

    if unit.is_bodyweight() {
        if !weight.is_empty() {
            return Err(invalid());
        }
        return Ok(Set::bodyweight(reps));
    }

    let weight: f64 = weight.parse().map_err(|_| invalid())?;
    Ok(Set::new(reps, weight, unit))
}

fn render_list(workouts: &[Workout]) -> String {
    let mut out = String::new();
    let mut current_date: Option<NaiveDate> = None;

    for workout in workouts {
        // Print date header when it changes
        if current_date != Some(workout.date) {
            if current_date.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n{}\n", workout.date, "-".repeat(10)));
            current_date = Some(workout.date);
        }

        let exercises: Vec<&str> = workout.exercises.iter().map(|e| e.name.as_str()).collect();
        let summary = if exercises.is_empty() {
            String::new()
        } else {
            format!(": {}", exercises.join(", "))
        };
        out.push_str(&format!("  [{}] {}{}\n", workout.id, workout.name, summary));

        if let Some(notes) = &workout.notes {
            out.push_str(&format!("        Notes: {}\n", notes));
        }
    }

    out.push_str(&format!("\nTotal: {} workout(s)\n", workouts.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exercise_spec() {
        let (name, sets) =
            parse_exercise_spec("Squats=5x100,8x60lbs,12xbw", SetUnit::Kilograms).unwrap();

        assert_eq!(name, "Squats");
        assert_eq!(
            sets,
            vec![
                Set::new(5, 100.0, SetUnit::Kilograms),
                Set::new(8, 60.0, SetUnit::Pounds),
                Set::bodyweight(12),
            ]
        );
    }

    #[test]
    fn test_parse_exercise_spec_uses_default_unit() {
        let (_, sets) = parse_exercise_spec("Bench Press = 5x62.5", SetUnit::Pounds).unwrap();
        assert_eq!(sets, vec![Set::new(5, 62.5, SetUnit::Pounds)]);
    }

    #[test]
    fn test_parse_exercise_spec_name_only() {
        let (name, sets) = parse_exercise_spec("Plank", SetUnit::Kilograms).unwrap();
        assert_eq!(name, "Plank");
        assert!(sets.is_empty());
    }

    #[test]
    fn test_parse_exercise_spec_keeps_x_in_name() {
        let (name, sets) = parse_exercise_spec("Box Jumps=10XBW", SetUnit::Kilograms).unwrap();
        assert_eq!(name, "Box Jumps");
        assert_eq!(sets, vec![Set::bodyweight(10)]);
    }

    #[test]
    fn test_parse_exercise_spec_errors() {
        assert!(parse_exercise_spec("=5x100", SetUnit::Kilograms).is_err());
        assert!(parse_exercise_spec("Squats=five", SetUnit::Kilograms).is_err());
        assert!(parse_exercise_spec("Squats=5x", SetUnit::Kilograms).is_err());
        assert!(parse_exercise_spec("Squats=5x100stone", SetUnit::Kilograms).is_err());
        assert!(parse_exercise_spec("Squats=5x20bw", SetUnit::Kilograms).is_err());
    }

    #[test]
    fn test_render_list_groups_by_date() {
        let d1 = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 9, 17).unwrap();
        let workouts = vec![
            Workout::new("1", "Leg Day", d1)
                .with_exercise(Exercise::new("e1", "Squats"))
                .with_exercise(Exercise::new("e2", "Lunges")),
            Workout::new("2", "Run", d1).with_notes("easy pace"),
            Workout::new("3", "Push", d2),
        ];

        let out = render_list(&workouts);

        assert!(out.starts_with("2025-09-15\n"));
        assert!(out.contains("  [1] Leg Day: Squats, Lunges\n"));
        assert!(out.contains("        Notes: easy pace\n"));
        assert!(out.contains("\n2025-09-17\n"));
        assert_eq!(out.matches("2025-09-15").count(), 1);
        assert!(out.ends_with("Total: 3 workout(s)\n"));
    }
}
