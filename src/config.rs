//! Compiled-in endpoints and on-disk layout
//!
//! The updater is meant to live in its own folder inside the game
//! directory. Everything it touches is resolved against that folder:
//! the staged download and the checksum manifest sit next to the
//! updater, the installed plugin one level up next to the game
//! executable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use normpath::PathExt;

use crate::error::{Result, UpdaterError};

/// Distribution root that the four endpoints are derived from
pub const DEFAULT_SERVER: &str = "https://www.deltaconnected.com/arcdps/";

/// Plugin file name, both staged and installed
pub const DLL_FILE_NAME: &str = "d3d11.dll";

/// Checksum manifest published next to the plugin
pub const MANIFEST_FILE_NAME: &str = "d3d11.dll.md5sum";

/// Plain-text run log, truncated at the start of every run
pub const RUN_LOG_FILE_NAME: &str = "arc-updater.log";

/// Applied to every outbound request, probe and downloads alike
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The four remote resources the updater talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Landing page, only probed for reachability
    pub base: String,
    /// Directory listing of the x64 build
    pub directory: String,
    /// The plugin binary
    pub binary: String,
    /// The checksum manifest for the plugin binary
    pub manifest: String,
}

impl Endpoints {
    /// Derive all endpoints from a distribution root
    ///
    /// A missing trailing slash is added so that `https://host/arcdps`
    /// and `https://host/arcdps/` resolve to the same resources.
    pub fn from_server(server: &str) -> Self {
        let base = if server.ends_with('/') {
            server.to_string()
        } else {
            format!("{server}/")
        };
        let directory = format!("{base}x64/");

        Self {
            binary: format!("{directory}{DLL_FILE_NAME}"),
            manifest: format!("{directory}{MANIFEST_FILE_NAME}"),
            directory,
            base,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_server(DEFAULT_SERVER)
    }
}

/// Local paths used during a run
///
/// Both directories are absolute and resolved once, so the install
/// location is a real parent directory rather than a `..` component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    work_dir: PathBuf,
    game_dir: PathBuf,
}

impl Layout {
    /// Resolve the updater folder and the game directory above it
    ///
    /// Fails when the folder does not exist or is a filesystem root: the
    /// staged and installed plugin would otherwise be the same file.
    pub fn resolve(dir: &Path) -> Result<Self> {
        let work_dir = dir
            .normalize()
            .map_err(|e| UpdaterError::WorkDirInvalid {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?
            .into_path_buf();

        if !work_dir.is_dir() {
            return Err(UpdaterError::WorkDirInvalid {
                path: work_dir.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }

        let game_dir = work_dir
            .parent()
            .ok_or_else(|| UpdaterError::WorkDirInvalid {
                path: work_dir.display().to_string(),
                reason: "has no parent directory to install into".to_string(),
            })?
            .to_path_buf();

        Ok(Self { work_dir, game_dir })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Freshly downloaded candidate binary
    pub fn staged_binary(&self) -> PathBuf {
        self.work_dir.join(DLL_FILE_NAME)
    }

    /// Freshly downloaded checksum manifest
    pub fn manifest(&self) -> PathBuf {
        self.work_dir.join(MANIFEST_FILE_NAME)
    }

    /// The plugin as loaded by the game, next to its executable
    pub fn installed_binary(&self) -> PathBuf {
        self.game_dir.join(DLL_FILE_NAME)
    }

    pub fn run_log(&self) -> PathBuf {
        self.work_dir.join(RUN_LOG_FILE_NAME)
    }
}
