#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Static configuration for the FileAway download-client hooks.
//!
//! Layout: `model.rs` (validated runtime configuration), `loader.rs` (JSON
//! document parsing and environment overrides), `validate.rs` (field checks
//! and path normalisation), `defaults.rs` (environment names and timeouts).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{default_config_path, load, load_from_path, parse_document};
pub use model::{ApiKey, CategoryMapping, HookConfig, PathPair};
