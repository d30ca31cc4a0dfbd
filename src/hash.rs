//! MD5 digests for plugin integrity
//!
//! The distribution server publishes an `md5sum`-style manifest next to
//! the binary, so the digest has to be MD5 even though it is no longer a
//! collision-resistant hash. Both sides are rendered as lowercase hex
//! before comparison.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use md5::{Digest as _, Md5};

use crate::error::{Result, UpdaterError};

/// Lowercase hex fingerprint of a file's bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(String);

impl Digest {
    /// Wrap a hex token, normalizing it to lowercase
    pub fn from_hex(hex: &str) -> Self {
        Self(hex.to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calculate the MD5 digest of a file by streaming its contents
pub fn hash_file(path: &Path) -> Result<Digest> {
    let file = File::open(path).map_err(|e| UpdaterError::HashFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| UpdaterError::HashFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Digest(format!("{:x}", hasher.finalize())))
}

/// Read the expected digest from a downloaded checksum manifest
///
/// Only the first line is considered and only its first
/// whitespace-delimited field, matching `md5sum` output
/// (`<digest>  <file name>`). The line is read as raw bytes; only the
/// digest field has to be valid UTF-8, the file name after it may not be.
pub fn read_manifest_digest(path: &Path) -> Result<Digest> {
    let file = File::open(path).map_err(|e| UpdaterError::ManifestReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut first_line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut first_line)
        .map_err(|e| UpdaterError::ManifestReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let token = first_token(&first_line).ok_or_else(|| UpdaterError::EmptyManifest {
        path: path.display().to_string(),
    })?;

    std::str::from_utf8(token)
        .map(Digest::from_hex)
        .map_err(|_| UpdaterError::MalformedManifest {
            path: path.display().to_string(),
        })
}

/// First ASCII-whitespace-delimited field of a line, if any
pub fn first_token(line: &[u8]) -> Option<&[u8]> {
    line.split(u8::is_ascii_whitespace)
        .find(|field| !field.is_empty())
}
