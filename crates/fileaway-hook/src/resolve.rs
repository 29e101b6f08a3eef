//! Category lookup and source/target path derivation.
//!
//! Paths are joined as plain strings. Nothing here touches the filesystem;
//! the file service validates and performs the actual operation.

use std::fmt::{self, Display, Formatter};

use fileaway_config::CategoryMapping;
use tracing::warn;

use crate::job::JobDescriptor;

/// File operation requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Keep the source (torrents continue seeding).
    Copy,
    /// Relocate the source.
    Move,
}

impl OperationMode {
    /// Final path segment of the service endpoint.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }
}

impl Display for OperationMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.endpoint())
    }
}

/// Concrete request derived for a mapped job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOperation {
    /// Copy or move.
    pub mode: OperationMode,
    /// Path the service reads from.
    pub source_path: String,
    /// Path the service writes to.
    pub target_path: String,
}

/// Outcome of resolving a job against the category mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The category is mapped; dispatch this operation.
    Dispatch(ResolvedOperation),
    /// The category has no mapping entry.
    Unmapped,
}

/// Resolve `job` against `mapping`.
///
/// qBittorrent jobs are copied under their torrent name; SABnzbd jobs are
/// moved under the last component of their final directory. A mapped
/// category always dispatches, even when the leaf is empty; the file service
/// decides whether the resulting paths are acceptable.
#[must_use]
pub fn resolve(job: &JobDescriptor, mapping: &CategoryMapping) -> Resolution {
    let Some(pair) = mapping.get(job.category()) else {
        return Resolution::Unmapped;
    };

    let (leaf, mode) = match job {
        JobDescriptor::Torrent(torrent) => (torrent.name.as_str(), OperationMode::Copy),
        JobDescriptor::Usenet(usenet) => (directory_leaf(&usenet.directory), OperationMode::Move),
    };
    if leaf.is_empty() {
        warn!(
            category = job.category(),
            "job has no name; requested paths end at the mapped roots"
        );
    }

    Resolution::Dispatch(ResolvedOperation {
        mode,
        source_path: join(pair.source_root(), leaf),
        target_path: join(pair.target_root(), leaf),
    })
}

/// Last component of `directory`, ignoring trailing `/` or `\` separators.
#[must_use]
pub fn directory_leaf(directory: &str) -> &str {
    let trimmed = directory.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
}

fn join(root: &str, leaf: &str) -> String {
    format!("{root}/{leaf}")
}
