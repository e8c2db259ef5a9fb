use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use crate::config::Config;

use super::OutputFormat;

const CONFIG_TEMPLATE: &str = r#"# liftlog configuration

# Storage backend: sqlite (default) or files
# storage: sqlite

# Directory for the files backend (default: platform data dir, e.g. ~/.local/share/liftlog/store)
# files_dir: ~/.local/share/liftlog/store

# Path to the SQLite database (default: platform data dir, e.g. ~/.local/share/liftlog/liftlog.db)
# Relative paths are resolved against this file's directory.
# database_path: ~/.local/share/liftlog/liftlog.db

# tracing filter used when RUST_LOG is not set
# log_filter: liftlog=warn,liftlog_core=warn

# How many times a failed workout write is retried
write_retries: 2
"#;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("storage: {}", config.storage.value);
                        println!("  source: {}", config.storage.source);
                        println!();

                        println!("files_dir: {}", config.files_dir.value.display());
                        println!("  source: {}", config.files_dir.source);
                        println!();

                        println!("database_path: {}", config.database_path.value.display());
                        println!("  source: {}", config.database_path.source);
                        println!();

                        println!("log_filter: {}", config.log_filter.value);
                        println!("  source: {}", config.log_filter.source);
                        println!();

                        println!("write_retries: {}", config.write_retries.value);
                        println!("  source: {}", config.write_retries.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = config
                    .config_file
                    .clone()
                    .unwrap_or_else(Config::default_config_path);

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'liftlog config show' to view current configuration.");
                    return Ok(());
                }

                // Create parent directory
                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(CONFIG_TEMPLATE.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}
