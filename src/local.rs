//! Local filesystem state: install detection, promotion and cleanup

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, UpdaterError};
use crate::hash::{self, Digest};

/// Whether the plugin is present next to the game executable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    NotInstalled,
    Installed,
}

/// Check whether the installed binary exists
///
/// A missing file is the ordinary first-install branch. Any other error
/// (permissions, I/O) means the install location cannot be reasoned
/// about and aborts the run.
pub fn inspect(installed: &Path) -> Result<InstallState> {
    match fs::metadata(installed) {
        Ok(_) => Ok(InstallState::Installed),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(InstallState::NotInstalled),
        Err(e) => Err(UpdaterError::InspectFailed {
            path: installed.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Digest of the plugin currently in use
pub fn installed_digest(installed: &Path) -> Result<Digest> {
    hash::hash_file(installed)
}

/// Rename the staged binary into its install location, replacing any
/// existing file
pub fn promote(staged: &Path, installed: &Path) -> Result<()> {
    debug!("Promoting {} to {}", staged.display(), installed.display());

    fs::rename(staged, installed).map_err(|e| UpdaterError::PromoteFailed {
        from: staged.display().to_string(),
        to: installed.display().to_string(),
        reason: e.to_string(),
    })
}

/// Delete a file the run created
pub fn discard(path: &Path) -> Result<()> {
    debug!("Removing {}", path.display());

    fs::remove_file(path).map_err(|e| UpdaterError::RemoveFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Delete a leftover from an earlier, aborted run
///
/// Returns whether a file was actually removed.
pub fn discard_stale(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            warn!("Removed leftover {} from an earlier run", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(UpdaterError::RemoveFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}
