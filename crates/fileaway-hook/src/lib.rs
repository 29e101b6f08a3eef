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
#![allow(clippy::redundant_pub_crate)]

//! Download-client hook that asks the FileAway service to copy or move
//! completed jobs according to their category.
//!
//! Layout:
//! - `job.rs`: per-client positional argument parsing
//! - `resolve.rs`: category lookup and path derivation
//! - `remote.rs`: HTTP client and response classification
//! - `hook.rs`: orchestration of a single invocation
//! - `output.rs`: stdout lines for the client's script log
//! - `cli.rs`: process entry point used by the binaries

pub(crate) mod cli;
pub mod error;
pub mod hook;
pub mod job;
pub(crate) mod output;
pub mod remote;
pub mod resolve;

pub use cli::run;
pub use error::{HookError, HookResult};
pub use hook::{Hook, HookOutcome};
pub use job::{ClientVariant, JobDescriptor, TorrentJob, UsenetJob};
pub use remote::{RemoteClient, RemoteError, RemoteResult};
pub use resolve::{OperationMode, Resolution, ResolvedOperation, directory_leaf, resolve};
