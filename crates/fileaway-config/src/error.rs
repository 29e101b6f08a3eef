//! Error types for configuration loading and validation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file '{}'", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The configuration document was not valid JSON for the expected shape.
    #[error("configuration document is invalid: {source}")]
    Parse {
        /// File the document was read from, when loaded from disk.
        path: Option<PathBuf>,
        /// Source deserialisation error.
        source: serde_json::Error,
    },
    /// Field contained an invalid value.
    #[error("invalid value for '{field}': {reason}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: String,
        /// Offending value when it is safe to echo.
        value: Option<String>,
        /// Human-readable reason for the failure.
        reason: &'static str,
    },
    /// No configuration path was supplied and the executable location is unknown.
    #[error("unable to locate the configuration file; set FILEAWAY_CONFIG")]
    PathUnavailable {
        /// Source IO error raised while resolving the executable path.
        source: io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        field: impl Into<String>,
        value: Option<&str>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.map(str::to_string),
            reason,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
