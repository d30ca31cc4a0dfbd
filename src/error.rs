//! Error types and handling for arc-updater
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only unexpected faults live here. Expected branch conditions (plugin
//! not installed, server unreachable, checksum mismatch) are ordinary
//! return values of the reconciler.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for arc-updater operations
#[derive(Error, Diagnostic, Debug)]
pub enum UpdaterError {
    // Local state errors
    #[error("Failed to inspect install location: {path}: {reason}")]
    #[diagnostic(
        code(arc_updater::fs::inspect_failed),
        help("Check that the updater folder sits inside the game directory and is readable")
    )]
    InspectFailed { path: String, reason: String },

    #[error("Invalid updater directory: {path}: {reason}")]
    #[diagnostic(
        code(arc_updater::fs::work_dir_invalid),
        help("Run the updater from its own folder inside the game directory, or pass --dir")
    )]
    WorkDirInvalid { path: String, reason: String },

    #[error("Failed to create file: {path}: {reason}")]
    #[diagnostic(code(arc_updater::fs::create_failed))]
    CreateFailed { path: String, reason: String },

    #[error("Failed to hash file: {path}: {reason}")]
    #[diagnostic(code(arc_updater::fs::hash_failed))]
    HashFailed { path: String, reason: String },

    #[error("Failed to move {from} to {to}: {reason}")]
    #[diagnostic(
        code(arc_updater::fs::promote_failed),
        help("Close the game before updating; a running game keeps d3d11.dll locked")
    )]
    PromoteFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to remove file: {path}: {reason}")]
    #[diagnostic(code(arc_updater::fs::remove_failed))]
    RemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(arc_updater::fs::io_error))]
    IoError { message: String },

    // Manifest errors
    #[error("Failed to read checksum manifest: {path}: {reason}")]
    #[diagnostic(code(arc_updater::manifest::read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Checksum manifest is empty: {path}")]
    #[diagnostic(
        code(arc_updater::manifest::empty),
        help("The server published a checksum file without a digest; try again later")
    )]
    EmptyManifest { path: String },

    #[error("Checksum manifest has a malformed digest: {path}")]
    #[diagnostic(
        code(arc_updater::manifest::malformed),
        help("The first field of the checksum file is not text; try again later")
    )]
    MalformedManifest { path: String },

    // Network errors
    #[error("Failed to set up HTTP client: {reason}")]
    #[diagnostic(code(arc_updater::net::client_failed))]
    HttpClientFailed { reason: String },

    #[error("Download failed: {url}: {reason}")]
    #[diagnostic(
        code(arc_updater::net::download_failed),
        help("Check your connection; a partially downloaded file is overwritten on the next run")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Server answered {status} for {url}")]
    #[diagnostic(code(arc_updater::net::bad_status))]
    BadStatus { url: String, status: u16 },

    #[error("Failed to save download of {url}: {reason}")]
    #[diagnostic(
        code(arc_updater::fs::save_failed),
        help("Check free disk space and write permission in the updater folder")
    )]
    SaveFailed { url: String, reason: String },

    // Logging errors
    #[error("Failed to open run log: {path}: {reason}")]
    #[diagnostic(
        code(arc_updater::log::open_failed),
        help("Pass --no-log to run without writing a log file")
    )]
    RunLogFailed { path: String, reason: String },
}

impl From<std::io::Error> for UpdaterError {
    fn from(err: std::io::Error) -> Self {
        UpdaterError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, UpdaterError>;
