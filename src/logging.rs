//! Plain-text run log
//!
//! Each run truncates the log and writes one timestamped line per
//! `tracing` event, so the file always describes the latest run only.

use std::fs::File;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, UpdaterError};

/// Install the global subscriber writing to `path`
///
/// The returned guard flushes pending lines when dropped and must be
/// kept alive for the whole run. `RUST_LOG` overrides the default
/// filter.
pub fn init_run_log(path: &Path, verbose: bool) -> Result<WorkerGuard> {
    let file = open_run_log(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let default_directive = if verbose {
        "arc_updater=debug"
    } else {
        "arc_updater=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| UpdaterError::RunLogFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    Ok(guard)
}

/// Create or truncate the log file
fn open_run_log(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| UpdaterError::RunLogFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
