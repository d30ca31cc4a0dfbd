//! Blocking HTTPS access through reqwest

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use super::Remote;
use crate::error::{Result, UpdaterError};
use crate::progress;

/// Distribution server reached over HTTPS
///
/// One client is built per run and reused for every request.
/// Certificate validation is off; integrity comes from the checksum
/// manifest alone.
pub struct HttpRemote {
    client: Client,
}

impl HttpRemote {
    /// Build a client that gives up on any request after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .user_agent(concat!("arc-updater/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpdaterError::HttpClientFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

impl Remote for HttpRemote {
    fn probe(&self, url: &str) -> bool {
        debug!("Probing {}", url);

        match self.client.get(url).send() {
            Ok(response) => {
                let status = response.status();
                info!("Probe {} answered {}", url, status);
                status == StatusCode::OK
            }
            Err(e) => {
                warn!("Probe {} failed: {}", url, e);
                false
            }
        }
    }

    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        info!("Downloading {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| UpdaterError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdaterError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_bytes = response.content_length();
        debug!("Content-Length: {:?}", total_bytes);

        let pb = progress::download_bar(total_bytes, progress::label_for(url));
        let mut reader = pb.wrap_read(response);
        let copied = copy_body(url, &mut reader, dest);
        pb.finish_and_clear();

        let bytes = copied?;

        info!("Download complete: {} bytes from {}", bytes, url);
        Ok(bytes)
    }
}

/// Stream a response body into `dest`
///
/// Read errors are network failures, write errors are local ones, and
/// they are reported as such.
fn copy_body(url: &str, reader: &mut impl Read, dest: &mut dyn Write) -> Result<u64> {
    let mut buffer = [0u8; 8192];
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(UpdaterError::DownloadFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        dest.write_all(&buffer[..bytes_read])
            .map_err(|e| UpdaterError::SaveFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        total += bytes_read as u64;
    }

    Ok(total)
}
