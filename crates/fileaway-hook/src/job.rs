//! Positional-argument parsing for the supported download clients.
//!
//! Each client calls its post-processing script with a fixed argument order.
//! The vector is accepted only when its length matches exactly; every value
//! is kept verbatim.

use std::fmt::{self, Display, Formatter};

use crate::error::{HookError, HookResult};

/// Download client whose calling convention the hook follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientVariant {
    /// qBittorrent "run external program on torrent finished".
    QBittorrent,
    /// SABnzbd post-processing script.
    Sabnzbd,
}

const QBITTORRENT_FIELDS: [&str; 12] = [
    "Torrent Name",
    "Category",
    "Tags",
    "Content Path",
    "Root Path",
    "Save Path",
    "Number of files",
    "Torrent size",
    "Current tracker",
    "Hash_v1",
    "Hash_v2",
    "Torrent id",
];

const SABNZBD_FIELDS: [&str; 8] = [
    "Directory",
    "Orgnzbname",
    "Jobname",
    "Reportnumber",
    "Category",
    "Group",
    "Postprocstatus",
    "URL",
];

impl ClientVariant {
    /// Labels of the expected positional fields, in calling order.
    #[must_use]
    pub const fn field_labels(self) -> &'static [&'static str] {
        match self {
            Self::QBittorrent => &QBITTORRENT_FIELDS,
            Self::Sabnzbd => &SABNZBD_FIELDS,
        }
    }

    /// Number of positional arguments the client passes.
    #[must_use]
    pub const fn arity(self) -> usize {
        self.field_labels().len()
    }

    /// Convert the argument vector (program name excluded) into a job.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Arity`] when the number of arguments differs from
    /// [`ClientVariant::arity`].
    pub fn parse_args(self, args: Vec<String>) -> HookResult<JobDescriptor> {
        let actual = args.len();
        let arity_error = |_: Vec<String>| HookError::Arity {
            variant: self,
            expected: self.arity(),
            actual,
        };

        match self {
            Self::QBittorrent => {
                let [
                    name,
                    category,
                    tags,
                    content_path,
                    root_path,
                    save_path,
                    file_count,
                    size,
                    tracker,
                    info_hash_v1,
                    info_hash_v2,
                    torrent_id,
                ] = <[String; 12]>::try_from(args).map_err(arity_error)?;
                Ok(JobDescriptor::Torrent(TorrentJob {
                    name,
                    category,
                    tags,
                    content_path,
                    root_path,
                    save_path,
                    file_count,
                    size,
                    tracker,
                    info_hash_v1,
                    info_hash_v2,
                    torrent_id,
                }))
            }
            Self::Sabnzbd => {
                let [
                    directory,
                    nzb_name,
                    job_name,
                    report_number,
                    category,
                    group,
                    post_process_status,
                    url,
                ] = <[String; 8]>::try_from(args).map_err(arity_error)?;
                Ok(JobDescriptor::Usenet(UsenetJob {
                    directory,
                    nzb_name,
                    job_name,
                    report_number,
                    category,
                    group,
                    post_process_status,
                    url,
                }))
            }
        }
    }
}

impl Display for ClientVariant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::QBittorrent => "qbittorrent",
            Self::Sabnzbd => "sabnzbd",
        })
    }
}

/// Completed torrent as reported by qBittorrent (`%N %L %G %F %R %D %C %Z %T %I %J %K`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct TorrentJob {
    pub name: String,
    pub category: String,
    pub tags: String,
    pub content_path: String,
    pub root_path: String,
    pub save_path: String,
    pub file_count: String,
    pub size: String,
    pub tracker: String,
    pub info_hash_v1: String,
    pub info_hash_v2: String,
    pub torrent_id: String,
}

/// Completed Usenet job as reported by SABnzbd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsenetJob {
    /// Final directory of the job.
    pub directory: String,
    /// Original NZB file name.
    pub nzb_name: String,
    /// Clean job name.
    pub job_name: String,
    /// Indexer report number.
    pub report_number: String,
    /// Job category.
    pub category: String,
    /// Usenet group.
    pub group: String,
    /// Post-processing status code.
    pub post_process_status: String,
    /// Indexer URL.
    pub url: String,
}

/// Job metadata parsed from one hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobDescriptor {
    /// qBittorrent torrent.
    Torrent(TorrentJob),
    /// SABnzbd job.
    Usenet(UsenetJob),
}

impl JobDescriptor {
    /// Client variant the job was parsed for.
    #[must_use]
    pub const fn variant(&self) -> ClientVariant {
        match self {
            Self::Torrent(_) => ClientVariant::QBittorrent,
            Self::Usenet(_) => ClientVariant::Sabnzbd,
        }
    }

    /// Category assigned by the download client.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Torrent(job) => &job.category,
            Self::Usenet(job) => &job.category,
        }
    }

    /// Labelled field values in calling order, for diagnostics.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let values: Vec<&str> = match self {
            Self::Torrent(job) => vec![
                job.name.as_str(),
                job.category.as_str(),
                job.tags.as_str(),
                job.content_path.as_str(),
                job.root_path.as_str(),
                job.save_path.as_str(),
                job.file_count.as_str(),
                job.size.as_str(),
                job.tracker.as_str(),
                job.info_hash_v1.as_str(),
                job.info_hash_v2.as_str(),
                job.torrent_id.as_str(),
            ],
            Self::Usenet(job) => vec![
                job.directory.as_str(),
                job.nzb_name.as_str(),
                job.job_name.as_str(),
                job.report_number.as_str(),
                job.category.as_str(),
                job.group.as_str(),
                job.post_process_status.as_str(),
                job.url.as_str(),
            ],
        };
        self.variant()
            .field_labels()
            .iter()
            .copied()
            .zip(values)
            .collect()
    }
}
