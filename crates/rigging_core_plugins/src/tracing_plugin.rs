//! Log output for Rigging applications.
//!
//! [`TracingPlugin`] installs a `tracing-subscriber` registry writing to
//! stderr and publishes the settings it used as [`TracingConfig`].
//!
//! # Lifecycle
//!
//! - **`build()`** resolves the filter directive and publishes
//!   [`TracingConfig`].
//! - **`ready()`** installs the subscriber, unless the process already has
//!   a global one (as test harnesses often do).
//!
//! # Filter Resolution
//!
//! The first of these wins:
//!
//! 1. an explicit [`TracingPlugin::with_env_filter`] directive;
//! 2. the `RIGGING_LOG` environment variable;
//! 3. the configured level.
//!
//! Log output goes to stderr, leaving stdout to the application.
//!
//! # Example
//!
//! ```
//! use rigging_core_plugins::{TracingConfig, TracingFormat, TracingPlugin};
//! use rigging_system::server::Server;
//! use tracing::Level;
//!
//! let mut server = Server::new();
//! server.add_plugins(
//!     TracingPlugin::default()
//!         .with_level(Level::DEBUG)
//!         .with_format(TracingFormat::Compact),
//! );
//! server.finish();
//!
//! let config = server.get_global::<TracingConfig>().unwrap();
//! assert_eq!(config.format, TracingFormat::Compact);
//! ```

use rigging_system::plugin::Plugin;
use rigging_system::resource::GlobalResource;
use rigging_system::server::Server;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable consulted for a filter directive.
pub const LOG_ENV_VAR: &str = "RIGGING_LOG";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Line layout of log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line, indented events.
    Pretty,
    /// One event per line (default).
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Error returned when parsing an unknown [`TracingFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tracing format '{0}' (expected pretty, compact or json)")]
pub struct ParseFormatError(String);

impl core::str::FromStr for TracingFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig Resource
// ─────────────────────────────────────────────────────────────────────────────

/// Log settings resolved by [`TracingPlugin`], published as a global.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level used when no filter directive applies.
    pub level: Level,
    /// Line layout.
    pub format: TracingFormat,
    /// The filter directive the subscriber is installed with.
    pub filter: String,
}

impl GlobalResource for TracingConfig {}

// ─────────────────────────────────────────────────────────────────────────────
// TracingPlugin
// ─────────────────────────────────────────────────────────────────────────────

/// Installs the process-wide log subscriber.
///
/// Publishes [`TracingConfig`] as a global resource. Defaults to `WARN` in
/// the compact layout.
///
/// ```
/// use rigging_core_plugins::{TracingFormat, TracingPlugin};
/// use tracing::Level;
///
/// // Local debugging: everything from the materializer
/// let verbose = TracingPlugin::default()
///     .with_level(Level::DEBUG)
///     .with_format(TracingFormat::Pretty)
///     .with_span_events(true);
///
/// // Machine-readable output, quiet dependencies
/// let structured = TracingPlugin::default()
///     .with_format(TracingFormat::Json)
///     .with_env_filter("rigging_config=info,warn");
/// ```
#[derive(Debug, Clone)]
pub struct TracingPlugin {
    /// Maximum log level.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Explicit filter directive (e.g. `"rigging_config=debug,warn"`).
    env_filter: Option<String>,
    /// Log span enter/exit.
    span_events: bool,
}

impl Default for TracingPlugin {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: TracingFormat::default(),
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingPlugin {
    /// Same as [`TracingPlugin::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the line layout.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a filter directive such as `rigging_config=debug,warn`.
    ///
    /// Takes precedence over `RIGGING_LOG` when it parses.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Logs spans being entered and exited.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Returns the filter directive to install, given the value of
    /// `RIGGING_LOG` (if set).
    fn resolve_filter(&self, from_env: Option<String>) -> String {
        let candidates = [self.env_filter.clone(), from_env];
        candidates
            .into_iter()
            .flatten()
            .find(|directive| EnvFilter::try_new(directive).is_ok())
            .unwrap_or_else(|| self.level.as_str().to_ascii_lowercase())
    }
}

impl Plugin for TracingPlugin {
    fn build(&self, server: &mut Server) {
        server.insert_global(TracingConfig {
            level: self.level,
            format: self.format,
            filter: self.resolve_filter(std::env::var(LOG_ENV_VAR).ok()),
        });
    }

    fn ready(&self, server: &mut Server) {
        let Some(filter) = server
            .get_global::<TracingConfig>()
            .map(|config| config.filter.clone())
        else {
            return;
        };
        let env_filter = EnvFilter::new(&filter);

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(if self.span_events {
                FmtSpan::ENTER | FmtSpan::EXIT
            } else {
                FmtSpan::NONE
            });

        // try_init fails when a global subscriber is already set; keep it.
        let installed = match self.format {
            TracingFormat::Pretty => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.pretty())
                .try_init(),
            TracingFormat::Compact => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.compact())
                .try_init(),
            TracingFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.json())
                .try_init(),
        }
        .is_ok();

        tracing::debug!(
            filter = %filter,
            format = ?self.format,
            installed,
            "tracing initialized"
        );
    }

    fn cleanup(&self, _server: &mut Server) {
        tracing::debug!("tracing shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_format_default_is_compact() {
        assert_eq!(TracingFormat::default(), TracingFormat::Compact);
    }

    #[test]
    fn tracing_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<TracingFormat>(), Ok(TracingFormat::Json));
        assert_eq!("pretty".parse::<TracingFormat>(), Ok(TracingFormat::Pretty));
        let err = "xml".parse::<TracingFormat>().unwrap_err();
        assert!(err.to_string().contains("'xml'"));
    }

    #[test]
    fn tracing_plugin_builders() {
        let plugin = TracingPlugin::new()
            .with_level(Level::DEBUG)
            .with_format(TracingFormat::Json)
            .with_env_filter("rigging_config=trace")
            .with_span_events(true);

        assert_eq!(plugin.level, Level::DEBUG);
        assert_eq!(plugin.format, TracingFormat::Json);
        assert_eq!(plugin.env_filter.as_deref(), Some("rigging_config=trace"));
        assert!(plugin.span_events);
    }

    #[test]
    fn filter_falls_back_to_level() {
        let plugin = TracingPlugin::new().with_level(Level::INFO);
        assert_eq!(plugin.resolve_filter(None), "info");
    }

    #[test]
    fn environment_overrides_level() {
        let plugin = TracingPlugin::new().with_level(Level::INFO);
        assert_eq!(
            plugin.resolve_filter(Some("rigging_config=debug".to_string())),
            "rigging_config=debug"
        );
    }

    #[test]
    fn explicit_filter_overrides_environment() {
        let plugin = TracingPlugin::new().with_env_filter("warn");
        assert_eq!(plugin.resolve_filter(Some("trace".to_string())), "warn");
    }

    #[test]
    fn invalid_directives_are_skipped() {
        let plugin = TracingPlugin::new()
            .with_level(Level::ERROR)
            .with_env_filter("rigging_config=loud");
        let from_env = Some("rigging_options=noisy".to_string());
        assert_eq!(plugin.resolve_filter(from_env), "error");
    }

    #[test]
    fn resolved_settings_are_published() {
        let mut server = Server::new();
        server.add_plugins(TracingPlugin::default().with_env_filter("rigging=debug"));
        server.finish();

        let config = server.get_global::<TracingConfig>().unwrap();
        assert_eq!(config.filter, "rigging=debug");
        assert_eq!(config.level, Level::WARN);
    }
}
