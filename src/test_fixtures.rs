//! Test fixtures and utilities for reducing test setup duplication.
//!
//! This module provides helpers to create a scratch install layout (a
//! game directory with the updater folder inside it) and an in-memory
//! stand-in for the distribution server.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeRemote, create_layout, digest_of};
//!
//! #[test]
//! fn my_test() {
//!     let (_temp, layout) = create_layout();
//!     let remote = FakeRemote::reachable().serve("https://host/x64/d3d11.dll", "plugin");
//!     assert_eq!(digest_of(b"plugin").as_str().len(), 32);
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use md5::{Digest as _, Md5};
use tempfile::TempDir;

use crate::config::Layout;
use crate::error::{Result, UpdaterError};
use crate::hash::Digest;
use crate::remote::Remote;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a game directory with an empty updater folder inside it.
///
/// The returned layout's working directory is `<temp>/arc-updater`, so
/// the installed binary resolves to `<temp>/d3d11.dll` (after symlinks
/// in the temp path are resolved).
///
/// # Panics
///
/// Panics if the directories cannot be created.
#[must_use]
pub fn create_layout() -> (TempDir, Layout) {
    let temp = create_temp_dir();
    let work_dir = temp.path().join("arc-updater");
    std::fs::create_dir_all(&work_dir).expect("Failed to create updater directory");
    let layout = Layout::resolve(&work_dir).expect("Failed to resolve updater directory");
    (temp, layout)
}

/// MD5 digest of in-memory bytes, rendered the way `hash_file` does.
#[must_use]
pub fn digest_of(bytes: &[u8]) -> Digest {
    Digest::from_hex(&format!("{:x}", Md5::digest(bytes)))
}

/// In-memory distribution server.
///
/// Serves registered bodies by exact URL and answers 404 for anything
/// else. Every probe and download is recorded in order.
#[derive(Debug, Default)]
pub struct FakeRemote {
    reachable: bool,
    resources: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl FakeRemote {
    #[must_use]
    pub fn reachable() -> Self {
        Self {
            reachable: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn unreachable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.resources.insert(url.to_string(), body.into());
        self
    }

    /// URLs requested so far, probes included.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Remote for FakeRemote {
    fn probe(&self, url: &str) -> bool {
        self.requests.borrow_mut().push(url.to_string());
        self.reachable
    }

    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        self.requests.borrow_mut().push(url.to_string());

        if !self.reachable {
            return Err(UpdaterError::DownloadFailed {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            });
        }

        let body = self
            .resources
            .get(url)
            .ok_or_else(|| UpdaterError::BadStatus {
                url: url.to_string(),
                status: 404,
            })?;
        dest.write_all(body)?;
        Ok(body.len() as u64)
    }
}
