//! Default values and environment variable names for hook configuration.
//!
//! # Design
//! - Keep every environment name in one place so the binaries and docs agree.
//! - Timeouts are bounded so a stalled service cannot hang the download client.

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "FILEAWAY_CONFIG";
/// Environment variable overriding the service base URL.
pub const API_URL_ENV: &str = "FILEAWAY_API_URL";
/// Environment variable overriding the service API key.
pub const API_KEY_ENV: &str = "FILEAWAY_API_KEY";
/// Environment variable overriding the total request timeout in seconds.
pub const TIMEOUT_ENV: &str = "FILEAWAY_HTTP_TIMEOUT_SECS";
/// File name looked up next to the hook executable when no path is configured.
pub const DEFAULT_CONFIG_FILE: &str = "fileaway.json";
/// Total request timeout applied when the document does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Connect timeout applied when the document does not set one.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
