//! Human-readable stdout lines for the download client's script log.
//!
//! qBittorrent and SABnzbd both capture script stdout, so these mirror the
//! structured `tracing` events in plain text.

use crate::job::JobDescriptor;
use crate::remote::{RemoteError, RemoteResult};
use crate::resolve::ResolvedOperation;

pub(crate) fn render_job_fields(job: &JobDescriptor) {
    for (label, value) in job.fields() {
        println!("{label}: {value}");
    }
}

pub(crate) fn render_operation(operation: &ResolvedOperation) {
    println!("Source: {}", operation.source_path);
    println!("Target: {}", operation.target_path);
}

pub(crate) fn render_result(result: &RemoteResult) {
    match result {
        Ok(body) => {
            println!("Request successful");
            println!("{}", String::from_utf8_lossy(body));
        }
        Err(RemoteError::Api { status, body }) => {
            println!("Request failed: {status}");
            if !body.is_empty() {
                println!("{}", String::from_utf8_lossy(body));
            }
        }
        Err(err @ RemoteError::UnexpectedResponse { .. }) => println!("Request failed: {err}"),
        Err(err @ RemoteError::Transport { source, .. }) => {
            println!("Request failed: {err}: {source}");
        }
    }
}
