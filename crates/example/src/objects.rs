//! Demo configurable objects.

use core::fmt;
use rigging_config::InstantiateError;
use rigging_options::{Options, scalar_value};
use std::path::PathBuf;

/// Log severity accepted by the demo loggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Very verbose.
    Trace,
    /// Diagnostic detail.
    Debug,
    /// Normal operation.
    #[default]
    Info,
    /// Something looks wrong.
    Warn,
    /// Something failed.
    Error,
}

impl core::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            _ => Err(format!("unknown log level '{s}'")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

scalar_value!(LogLevel, "level");

/// Writes log lines to a file.
#[derive(Debug, Default, Options)]
pub struct FileLogger {
    /// Minimum level written to the file.
    #[option(name = "log-level")]
    pub log_level: LogLevel,

    /// Destination file.
    #[option]
    pub path: Option<PathBuf>,

    /// Tags attached to every line.
    #[option(name = "tag")]
    pub tags: Vec<String>,
}

/// Writes log lines to the terminal.
#[derive(Debug, Default, Options)]
pub struct ConsoleLogger {
    /// Minimum level printed.
    #[option(name = "log-level")]
    pub log_level: LogLevel,

    /// Colorize output.
    #[option]
    pub color: bool,
}

/// In-memory key-value store.
#[derive(Debug, Options)]
pub struct MemoryStore {
    /// Maximum number of entries kept.
    #[option]
    pub capacity: usize,
}

impl MemoryStore {
    /// Default number of entries.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Registry factory for [`MemoryStore`].
    ///
    /// # Errors
    ///
    /// Never fails.
    pub fn create() -> Result<Self, InstantiateError> {
        Ok(Self {
            capacity: Self::DEFAULT_CAPACITY,
        })
    }
}

/// HTTP front end.
#[derive(Debug, Options)]
pub struct HttpServer {
    /// Address to listen on.
    #[option]
    pub bind: String,

    /// Port to listen on.
    #[option]
    pub port: u16,

    /// Allowed CORS origins.
    #[option(name = "allow-origin")]
    pub allowed_origins: Vec<String>,
}

impl Default for HttpServer {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
        }
    }
}

/// Wall clock with no options.
#[derive(Debug, Default, Options)]
pub struct SystemClock {}

/// Destination for audit records. Registered without a factory.
#[derive(Debug, Options)]
pub struct AuditSink {
    /// Retention in days.
    #[option(name = "retention-days")]
    pub retention_days: u32,
}
