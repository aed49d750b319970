//! Configuration for tweedex

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default data file extension in a Twitter export (`tweets_2013_01.js` etc.)
pub const DEFAULT_DATA_EXTENSION: &str = "js";

/// Errors that make a run impossible before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("source directory does not exist: {}", .0.display())]
    MissingSourceDir(PathBuf),

    #[error("source path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("connection settings invalid:\n  - {0}")]
    Connection(String),

    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to construct HTTP client: {0}")]
    HttpClient(String),

    #[error("invalid endpoint for {host}:{port}: {reason}")]
    Endpoint {
        host: String,
        port: u16,
        reason: String,
    },
}

/// Where to reach Elasticsearch and which index to write into.
///
/// Built once per run and validated before a client is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Elasticsearch host name
    pub host: String,
    /// Elasticsearch port
    pub port: u16,
    /// Index to import into / search against
    pub index: String,
    /// Request timeout for bulk and search calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9200,
            index: "tweets".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ConnectionSettings {
    pub fn new(host: impl Into<String>, port: u16, index: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            index: index.into(),
            ..Self::default()
        }
    }

    /// Validate all fields, collecting every problem into one error so the
    /// user can fix everything in one pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.host.trim().is_empty() {
            errors.push("host must not be empty".to_string());
        }
        if self.port == 0 {
            errors.push("port must be positive".to_string());
        }
        if self.index.trim().is_empty() {
            errors.push("index name must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            errors.push("timeout_secs must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Connection(errors.join("\n  - ")))
        }
    }
}

/// Knobs for file discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Data file extension to match (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Descend into subdirectories (the export keeps tweet files flat,
    /// so this defaults to off)
    #[serde(default)]
    pub recursive: bool,
}

fn default_extension() -> String {
    DEFAULT_DATA_EXTENSION.to_string()
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            recursive: false,
        }
    }
}

/// Log severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Top-level configuration, loadable from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Elasticsearch connection
    #[serde(default)]
    pub connection: ConnectionSettings,
    /// File discovery
    #[serde(default)]
    pub import: ImportConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.connection.validate()?;
        Ok(config)
    }
}
