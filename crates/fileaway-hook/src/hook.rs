//! Orchestration of a single hook invocation.
//!
//! Sequence: parse the client's arguments, resolve the category, dispatch at
//! most one request, report. Remote failures are reported but never turn
//! into a failing exit status; only malformed arguments and broken setup do.

use fileaway_config::HookConfig;
use tracing::{info, instrument, warn};

use crate::error::{EXIT_SUCCESS, HookResult};
use crate::job::{ClientVariant, JobDescriptor};
use crate::output::{render_job_fields, render_operation, render_result};
use crate::remote::{RemoteClient, RemoteError, RemoteResult};
use crate::resolve::{Resolution, ResolvedOperation, resolve};

/// What a completed invocation did.
#[derive(Debug)]
pub enum HookOutcome {
    /// The category has no mapping; nothing was sent.
    Skipped {
        /// Category reported by the client.
        category: String,
    },
    /// A request was sent.
    Dispatched {
        /// Operation that was requested.
        operation: ResolvedOperation,
        /// Classified outcome of the request.
        result: RemoteResult,
    },
}

impl HookOutcome {
    /// Process exit status; every completed invocation exits successfully.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Skipped { .. } | Self::Dispatched { .. } => EXIT_SUCCESS,
        }
    }

    /// Whether a request was sent to the file service.
    #[must_use]
    pub const fn dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

/// Hook bound to a client variant and an immutable configuration.
#[derive(Debug)]
pub struct Hook {
    variant: ClientVariant,
    config: HookConfig,
    remote: RemoteClient,
}

impl Hook {
    /// Build the hook and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(variant: ClientVariant, config: HookConfig, request_id: &str) -> HookResult<Self> {
        let remote = RemoteClient::from_config(&config, request_id)?;
        Ok(Self {
            variant,
            config,
            remote,
        })
    }

    /// Variant this hook parses arguments for.
    #[must_use]
    pub const fn variant(&self) -> ClientVariant {
        self.variant
    }

    /// Parse `args`, echo them, and handle the resulting job.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HookError::Arity`] when `args` has the wrong length; no
    /// request is sent in that case.
    pub async fn invoke(&self, args: Vec<String>) -> HookResult<HookOutcome> {
        let job = self.variant.parse_args(args)?;
        render_job_fields(&job);
        Ok(self.handle(&job).await)
    }

    /// Resolve `job` and dispatch its operation, if any.
    #[instrument(name = "hook.handle", skip_all, fields(category = %job.category()))]
    pub async fn handle(&self, job: &JobDescriptor) -> HookOutcome {
        match resolve(job, &self.config.categories) {
            Resolution::Unmapped => {
                info!("category is not mapped; nothing to do");
                HookOutcome::Skipped {
                    category: job.category().to_string(),
                }
            }
            Resolution::Dispatch(operation) => {
                render_operation(&operation);
                let result = self.remote.execute(&operation).await;
                log_result(&operation, &result);
                render_result(&result);
                HookOutcome::Dispatched { operation, result }
            }
        }
    }
}

fn log_result(operation: &ResolvedOperation, result: &RemoteResult) {
    match result {
        Ok(body) => info!(
            mode = %operation.mode,
            response_bytes = body.len(),
            "file operation accepted"
        ),
        Err(RemoteError::Api { status, body }) => warn!(
            mode = %operation.mode,
            status = status.as_u16(),
            body = %String::from_utf8_lossy(body),
            "file service rejected the operation"
        ),
        Err(RemoteError::Transport { reason, source }) => warn!(
            mode = %operation.mode,
            reason = *reason,
            error = %source,
            "file service unreachable"
        ),
        Err(RemoteError::UnexpectedResponse {
            status,
            content_type,
        }) => warn!(
            mode = %operation.mode,
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            "unexpected response from file service"
        ),
    }
}
