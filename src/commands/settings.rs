use clap::{Args, Subcommand};

use liftlog_core::{Services, Theme, WeightUnit};

use super::OutputFormat;

#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand)]
pub enum SettingsSubcommand {
    /// Show current preferences
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Set the default weight unit for new sets (kg, lbs)
    Unit {
        /// Weight unit
        unit: String,
    },

    /// Set the display theme (light, dark)
    Theme {
        /// Theme name
        theme: String,
    },

    /// Switch between light and dark
    ToggleTheme,
}

impl SettingsCommand {
    pub async fn run(&self, services: &Services) -> Result<(), Box<dyn std::error::Error>> {
        let preferences = &services.preferences;

        match &self.command {
            SettingsSubcommand::Show { format } => {
                let snapshot = preferences.snapshot();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&snapshot)?);
                    }
                    OutputFormat::Text => {
                        println!("weight_unit: {}", snapshot.weight_unit);
                        println!("theme: {}", snapshot.theme);
                    }
                }
                Ok(())
            }

            SettingsSubcommand::Unit { unit } => {
                let unit: WeightUnit = unit.parse().map_err(|e: String| e)?;
                preferences.set_weight_unit(unit).await?;
                println!("Weight unit set to {}", unit);
                Ok(())
            }

            SettingsSubcommand::Theme { theme } => {
                let theme: Theme = theme.parse().map_err(|e: String| e)?;
                preferences.set_theme(theme).await?;
                println!("Theme set to {}", theme);
                Ok(())
            }

            SettingsSubcommand::ToggleTheme => {
                let theme = preferences.toggle_theme().await?;
                println!("Theme set to {}", theme);
                Ok(())
            }
        }
    }
}
