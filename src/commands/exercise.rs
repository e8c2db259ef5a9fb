use clap::{Args, Subcommand};
use serde::Serialize;

use liftlog_core::catalog::{self, ExerciseCategory};

use super::OutputFormat;

#[derive(Args)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand)]
pub enum ExerciseSubcommand {
    /// Search the predefined exercise names
    Search {
        /// Case-insensitive substring; lists everything when omitted
        query: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct CatalogMatch {
    name: &'static str,
    category: Option<ExerciseCategory>,
}

impl ExerciseCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ExerciseSubcommand::Search { query, format } => {
                let matches = search(query.as_deref().unwrap_or(""));

                if matches.is_empty() {
                    println!("No exercises found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&matches)?);
                    }
                    OutputFormat::Text => {
                        let mut current: Option<ExerciseCategory> = None;
                        for m in &matches {
                            if m.category != current {
                                if current.is_some() {
                                    println!();
                                }
                                if let Some(category) = m.category {
                                    println!("{}", category);
                                }
                                current = m.category;
                            }
                            println!("  {}", m.name);
                        }
                        println!("\nTotal: {} exercise(s)", matches.len());
                    }
                }
                Ok(())
            }
        }
    }
}

fn search(query: &str) -> Vec<CatalogMatch> {
    catalog::search(query)
        .into_iter()
        .map(|name| CatalogMatch {
            name,
            category: catalog::category_of(name),
        })
        .collect()
}
