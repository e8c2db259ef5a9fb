use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod db;

use commands::{
    CalendarCommand, ConfigCommand, ExerciseCommand, HeatmapCommand, SettingsCommand,
    WorkoutCommand,
};
use config::{Config, StorageBackend};
use db::{init_db, SqliteKeyValueStore};
use liftlog_core::{FileStore, KeyValueStore, Services};

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(version)]
#[command(about = "Log workouts and see your training on a calendar", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log, list and edit workouts
    Workout(WorkoutCommand),

    /// Show a month calendar with workout days marked
    Calendar(CalendarCommand),

    /// Show workout intensity per day
    Heatmap(HeatmapCommand),

    /// Browse predefined exercise names
    Exercise(ExerciseCommand),

    /// Manage preferences
    Settings(SettingsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    init_tracing(&config);

    let command = match cli.command {
        Some(Commands::Exercise(cmd)) => return cmd.run(),
        Some(Commands::Config(cmd)) => return cmd.run(&config),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let mut pool = None;
    let kv: Arc<dyn KeyValueStore> = match config.storage.value {
        StorageBackend::Sqlite => {
            let db = init_db(&config.database_path.value).await?;
            pool = Some(db.clone());
            Arc::new(SqliteKeyValueStore::new(db))
        }
        StorageBackend::Files => Arc::new(FileStore::new(&config.files_dir.value)),
    };
    let services = Services::init(kv, config.retry_policy()).await;

    let result = match &command {
        Commands::Workout(cmd) => cmd.run(&services).await,
        Commands::Calendar(cmd) => cmd.run(&services).await,
        Commands::Heatmap(cmd) => cmd.run(&services).await,
        Commands::Settings(cmd) => cmd.run(&services).await,
        Commands::Exercise(_) | Commands::Config(_) => Ok(()),
    };

    // Pending writes finish even when the command failed
    services.shutdown().await;
    if let Some(pool) = pool {
        pool.close().await;
    }

    result
}

/// RUST_LOG wins over the configured filter. Logs go to stderr.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter.value));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
