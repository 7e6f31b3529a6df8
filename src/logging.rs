//! Structured logging initialisation
//!
//! routeforge logs through `tracing`; this module installs a
//! `tracing-subscriber` registry for binaries and tests that want output.
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `ROUTEFORGE_LOG_LEVEL` | trace/debug/info/warn/error | `info` |
//! | `ROUTEFORGE_LOG_FORMAT` | json/pretty | `pretty` |
//! | `ROUTEFORGE_LOG_TARGET_FILTER` | extra `EnvFilter` directives, comma-separated | unset |
//! | `ROUTEFORGE_LOG_INCLUDE_LOCATION` | true/false | `false` |

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Log format: JSON for machines, pretty-print for terminals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("ROUTEFORGE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("ROUTEFORGE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
            target_filter: env::var("ROUTEFORGE_LOG_TARGET_FILTER").ok(),
            include_location: env::var("ROUTEFORGE_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Filter directives combining the level and the target filter
    #[must_use]
    pub fn directives(&self) -> String {
        match &self.target_filter {
            Some(extra) if !extra.trim().is_empty() => format!("{},{}", self.log_level, extra),
            _ => self.log_level.clone(),
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// # Errors
///
/// Fails if the filter directives do not parse or a global subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.directives())
        .with_context(|| format!("invalid log filter '{}'", config.directives()))?;

    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(())
}
