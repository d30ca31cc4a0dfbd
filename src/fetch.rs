//! Downloading the checksum manifest and the candidate binary

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::config::Layout;
use crate::error::{Result, UpdaterError};
use crate::hash::{self, Digest};
use crate::local;
use crate::remote::Remote;

/// Download the manifest and return the digest it announces
///
/// The manifest stays on disk for the reconciler to remove once the run
/// is decided. An empty or malformed manifest is removed here since no
/// decision will follow.
pub fn fetch_expected_digest(remote: &dyn Remote, url: &str, layout: &Layout) -> Result<Digest> {
    let manifest = layout.manifest();
    download_to(remote, url, &manifest)?;

    match hash::read_manifest_digest(&manifest) {
        Ok(digest) => {
            info!("Server digest: {}", digest);
            Ok(digest)
        }
        Err(
            err @ (UpdaterError::EmptyManifest { .. } | UpdaterError::MalformedManifest { .. }),
        ) => {
            local::discard(&manifest)?;
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Download the candidate binary to the staging path and hash it
///
/// The digest is computed by re-reading the staged file, so it
/// describes what actually landed on disk rather than what came off the
/// wire.
pub fn fetch_candidate(remote: &dyn Remote, url: &str, layout: &Layout) -> Result<Digest> {
    let staged = layout.staged_binary();
    download_to(remote, url, &staged)?;

    let digest = hash::hash_file(&staged)?;
    info!("Downloaded digest: {}", digest);
    Ok(digest)
}

fn download_to(remote: &dyn Remote, url: &str, dest: &Path) -> Result<u64> {
    let mut file = File::create(dest).map_err(|e| UpdaterError::CreateFailed {
        path: dest.display().to_string(),
        reason: e.to_string(),
    })?;

    let bytes = remote.download(url, &mut file)?;
    file.flush()?;
    file.sync_all()?;

    Ok(bytes)
}
