//! Common test utilities for arc-updater integration tests

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Nothing listens on the discard port of the loopback interface, so
/// every request is refused immediately.
pub const UNREACHABLE_SERVER: &str = "http://127.0.0.1:9/arcdps/";

/// A scratch game directory with the updater folder inside it
#[allow(dead_code)]
pub struct TestInstall {
    /// Temporary directory standing in for the game directory
    pub temp: TempDir,
    /// Updater folder, passed as `--dir`
    pub work_dir: PathBuf,
}

impl TestInstall {
    /// Create a new test install layout
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let work_dir = temp.path().join("arc-updater");
        std::fs::create_dir_all(&work_dir).expect("Failed to create updater directory");
        Self { temp, work_dir }
    }

    /// Game directory, where the installed plugin lives
    pub fn game_dir(&self) -> &Path {
        self.temp.path()
    }

    /// Put a plugin next to the game executable
    #[allow(dead_code)]
    pub fn install_plugin(&self, contents: &[u8]) {
        std::fs::write(self.game_dir().join("d3d11.dll"), contents)
            .expect("Failed to write installed plugin");
    }

    /// Write a file into the updater folder
    #[allow(dead_code)]
    pub fn write_work_file(&self, name: &str, contents: &[u8]) {
        std::fs::write(self.work_dir.join(name), contents).expect("Failed to write file");
    }

    /// Relative path and contents of every file under the game directory
    #[allow(dead_code)]
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        let mut files = BTreeMap::new();
        collect_files(self.game_dir(), self.game_dir(), &mut files)
            .expect("Failed to snapshot install");
        files
    }

    /// Command preconfigured for this layout and an unreachable server
    #[allow(dead_code)]
    pub fn cmd(&self) -> Command {
        let mut cmd = arc_updater_cmd();
        cmd.arg("--dir")
            .arg(&self.work_dir)
            .arg("--server")
            .arg(UNREACHABLE_SERVER)
            .arg("--no-pause")
            .env_remove("ARC_UPDATER_DIR")
            .env_remove("ARC_UPDATER_SERVER")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestInstall {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn arc_updater_cmd() -> Command {
    Command::cargo_bin("arc-updater").expect("Failed to find arc-updater binary")
}

fn collect_files(
    root: &Path,
    dir: &Path,
    files: &mut BTreeMap<PathBuf, Vec<u8>>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            collect_files(root, &path, files)?;
        } else {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            files.insert(relative, std::fs::read(&path)?);
        }
    }

    Ok(())
}
