//! Error types for a hook invocation.
//!
//! Only failures that stop the hook before it can talk to the file service
//! live here; outcomes of the remote call itself are `RemoteError` values.

use fileaway_config::ConfigError;
use thiserror::Error;

use crate::job::ClientVariant;

/// Exit status for a completed invocation, including skipped categories and
/// failed remote operations.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when the client passed malformed arguments.
pub const EXIT_INVALID_ARGUMENTS: i32 = 1;
/// Exit status when configuration or the HTTP client could not be set up.
pub const EXIT_SETUP_FAILURE: i32 = 2;

/// Result alias for hook operations.
pub type HookResult<T> = Result<T, HookError>;

/// Fatal hook errors.
#[derive(Debug, Error)]
pub enum HookError {
    /// The client passed the wrong number of positional arguments.
    #[error("{variant} hook expects {expected} arguments, received {actual}")]
    Arity {
        /// Variant the hook was installed as.
        variant: ClientVariant,
        /// Number of arguments the variant requires.
        expected: usize,
        /// Number of arguments received.
        actual: usize,
    },
    /// The argument vector could not be collected (e.g. non UTF-8 values).
    #[error("invalid hook arguments")]
    Arguments {
        /// Source argument parser error.
        source: clap::Error,
    },
    /// Configuration could not be loaded.
    #[error("failed to load configuration: {source}")]
    Config {
        /// Source configuration error.
        #[from]
        source: ConfigError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Source HTTP client error.
        source: reqwest::Error,
    },
    /// A header value derived from the configuration was rejected.
    #[error("invalid header value for '{name}'")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
    },
}

impl HookError {
    /// Process exit status for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arity { .. } | Self::Arguments { .. } => EXIT_INVALID_ARGUMENTS,
            Self::Config { .. } | Self::HttpClient { .. } | Self::InvalidHeader { .. } => {
                EXIT_SETUP_FAILURE
            }
        }
    }
}
