//! Process entry point shared by the per-client binaries.

use std::ffi::OsString;

use clap::Parser;
use fileaway_telemetry::{LoggingConfig, init_logging};
use tracing::{Instrument, error, info_span};
use uuid::Uuid;

use crate::error::{HookError, HookResult};
use crate::hook::{Hook, HookOutcome};
use crate::job::ClientVariant;
use crate::output::render_job_fields;

/// Raw positional arguments. Flags are not recognised; every value,
/// including ones starting with `-`, is kept as-is.
#[derive(Parser, Debug)]
#[command(
    about = "Forward completed download jobs to the FileAway file service",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct HookArgs {
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

/// Runs one hook invocation for `variant` using the process arguments and
/// environment. Returns the process exit code.
pub async fn run(variant: ClientVariant) -> i32 {
    let logging = LoggingConfig::from_env_lookup(|name| std::env::var(name).ok());
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("hook", client = %variant, request_id = %request_id);

    match execute(variant, std::env::args_os(), &request_id, |name| {
        std::env::var(name).ok()
    })
    .instrument(span)
    .await
    {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            error!(client = %variant, error = %err, "hook invocation failed");
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}

async fn execute<I, T>(
    variant: ClientVariant,
    argv: I,
    request_id: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> HookResult<HookOutcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = collect_args(argv)?;
    let job = variant.parse_args(args)?;
    render_job_fields(&job);

    let config = fileaway_config::load(lookup)?;
    let hook = Hook::new(variant, config, request_id)?;
    Ok(hook.handle(&job).await)
}

/// Collect positional values from a full argv (program name first).
///
/// A `--` is placed after the program name so clap never consumes a literal
/// `--` supplied by the download client as a field value.
fn collect_args<I, T>(argv: I) -> HookResult<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv.into_iter().map(Into::<OsString>::into);
    let program = argv.next().unwrap_or_default();
    let raw = std::iter::once(program)
        .chain(std::iter::once(OsString::from("--")))
        .chain(argv);
    HookArgs::try_parse_from(raw)
        .map(|parsed| parsed.args)
        .map_err(|source| HookError::Arguments { source })
}
