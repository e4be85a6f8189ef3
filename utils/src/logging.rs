//! Structured logging initialisation.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`]: readable lines for interactive use.
//! - [`LogFormat::Json`]: newline-delimited JSON for log aggregation.
//!
//! The filter can be overridden at runtime via the `RUST_LOG` environment
//! variable. When `RUST_LOG` is not set, the caller-supplied `level` string
//! is used (e.g. `"info"`, `"warn,soro_transactions=debug"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{fmt as sub_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Json => "json",
        })
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unknown log format {0:?} (expected human or json)")]
    UnknownFormat(String),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("a global subscriber is already installed")]
    AlreadyInitialized,
}

/// Build the filter: `RUST_LOG` if set, otherwise `level`.
pub fn log_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| LoggingError::Filter(e.to_string())),
    }
}

/// Install the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), LoggingError> {
    let filter = log_filter(level)?;
    let result = match format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(
                sub_fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                sub_fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    result.map_err(|_| LoggingError::AlreadyInitialized)
}
