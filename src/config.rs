use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use liftlog_core::RetryPolicy;

const DEFAULT_LOG_FILTER: &str = "liftlog=warn,liftlog_core=warn";
const DEFAULT_WRITE_RETRIES: u32 = 2;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(50);

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// Where workouts and preferences are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database at `database_path`
    #[default]
    Sqlite,
    /// One JSON file per key under `files_dir`
    Files,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Files => write!(f, "files"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "files" => Ok(StorageBackend::Files),
            _ => Err(format!(
                "Invalid storage backend '{}'. Valid options: sqlite, files",
                s
            )),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Storage backend
    pub storage: ConfigValue<StorageBackend>,
    /// Directory used by the `files` backend
    pub files_dir: ConfigValue<PathBuf>,
    /// Path to the SQLite database holding the key-value store
    pub database_path: ConfigValue<PathBuf>,
    /// tracing-subscriber filter used when RUST_LOG is unset
    pub log_filter: ConfigValue<String>,
    /// How many times a failed workout write is retried
    pub write_retries: ConfigValue<u32>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    storage: Option<StorageBackend>,
    files_dir: Option<PathBuf>,
    database_path: Option<PathBuf>,
    log_filter: Option<String>,
    write_retries: Option<u32>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut storage = ConfigValue::new(StorageBackend::default(), ConfigSource::Default);
        let mut files_dir =
            ConfigValue::new(Self::default_data_dir().join("store"), ConfigSource::Default);
        let mut database_path = ConfigValue::new(
            Self::default_data_dir().join("liftlog.db"),
            ConfigSource::Default,
        );
        let mut log_filter =
            ConfigValue::new(DEFAULT_LOG_FILTER.to_string(), ConfigSource::Default);
        let mut write_retries = ConfigValue::new(DEFAULT_WRITE_RETRIES, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(backend) = file_config.storage {
                storage = ConfigValue::new(backend, ConfigSource::File);
            }
            if let Some(dir) = file_config.files_dir {
                files_dir = ConfigValue::new(resolve_relative(&path, dir), ConfigSource::File);
            }
            if let Some(db_path) = file_config.database_path {
                database_path =
                    ConfigValue::new(resolve_relative(&path, db_path), ConfigSource::File);
            }
            if let Some(filter) = file_config.log_filter {
                log_filter = ConfigValue::new(filter, ConfigSource::File);
            }
            if let Some(retries) = file_config.write_retries {
                write_retries = ConfigValue::new(retries, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(backend) = std::env::var("LIFTLOG_STORAGE") {
            let parsed = backend
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("LIFTLOG_STORAGE", backend))?;
            storage = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("LIFTLOG_FILES_DIR") {
            files_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(db_path) = std::env::var("LIFTLOG_DATABASE_PATH") {
            database_path = ConfigValue::new(PathBuf::from(db_path), ConfigSource::Environment);
        }
        if let Ok(filter) = std::env::var("LIFTLOG_LOG") {
            log_filter = ConfigValue::new(filter, ConfigSource::Environment);
        }
        if let Ok(retries) = std::env::var("LIFTLOG_WRITE_RETRIES") {
            let parsed = retries
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("LIFTLOG_WRITE_RETRIES", retries))?;
            write_retries = ConfigValue::new(parsed, ConfigSource::Environment);
        }

        Ok(Self {
            storage,
            files_dir,
            database_path,
            log_filter,
            write_retries,
            config_file,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.write_retries.value, RETRY_BASE_DELAY)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/liftlog/
    /// - macOS: ~/Library/Application Support/liftlog/
    /// - Windows: %APPDATA%/liftlog/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftlog")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/liftlog/
    /// - macOS: ~/Library/Application Support/liftlog/
    /// - Windows: %APPDATA%/liftlog/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftlog")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Resolves relative paths against the config file's directory
fn resolve_relative(config_path: &std::path::Path, value: PathBuf) -> PathBuf {
    if value.is_relative() {
        config_path
            .parent()
            .map(|p| p.join(&value))
            .unwrap_or(value)
    } else {
        value
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidEnv(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidEnv(name, value) => {
                write!(f, "Invalid value '{}' for {}", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
