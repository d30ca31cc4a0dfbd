//! Install / update decision for the plugin binary
//!
//! A run walks one of two paths depending on whether the plugin is
//! already next to the game executable:
//!
//! - **not installed**: fetch the manifest digest, download the
//!   candidate, promote it if the digests match, otherwise discard it.
//! - **installed**: fetch the manifest digest and hash the installed
//!   binary. Equal digests end the run; otherwise the candidate is
//!   downloaded and gated on the manifest digest exactly like a fresh
//!   install.
//!
//! The manifest is removed at the end of every decided run. A staged
//! binary either becomes the installed binary or is deleted; it is never
//! promoted without a digest match.

use std::fmt;
use std::io::Write;

use console::style;
use tracing::{debug, info, warn};

use crate::config::{DLL_FILE_NAME, Endpoints, Layout};
use crate::error::Result;
use crate::fetch;
use crate::hash::Digest;
use crate::local::{self, InstallState};
use crate::remote::Remote;

/// Which path led to a candidate download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Install,
    Update,
}

/// Result of one reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Base URL did not answer 200; nothing was touched
    Unreachable,
    /// Plugin was absent and is now installed
    Installed,
    /// Plugin was outdated and has been replaced
    Updated,
    /// Installed plugin already matches the server
    AlreadyCurrent,
    /// Downloaded candidate failed the digest check and was discarded
    Rejected(Phase),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Unreachable => "service unreachable",
            Outcome::Installed => "installed",
            Outcome::Updated => "updated",
            Outcome::AlreadyCurrent => "already current",
            Outcome::Rejected(Phase::Install) => "rejected, not installed",
            Outcome::Rejected(Phase::Update) => "rejected, not updated",
        };
        f.write_str(text)
    }
}

/// Drives a single run against one server and one install layout
///
/// The console writer receives the user-facing narration; the same
/// decisions are also emitted as `tracing` events for the run log.
pub struct Reconciler<'a> {
    remote: &'a dyn Remote,
    endpoints: &'a Endpoints,
    layout: &'a Layout,
    out: &'a mut dyn Write,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        remote: &'a dyn Remote,
        endpoints: &'a Endpoints,
        layout: &'a Layout,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            remote,
            endpoints,
            layout,
            out,
        }
    }

    /// Probe the server and reconcile the installed plugin
    pub fn run(&mut self) -> Result<Outcome> {
        if !self.remote.probe(&self.endpoints.base) {
            warn!("Server unreachable: {}", self.endpoints.base);
            self.say(&format!(
                "{} {} - Exiting.",
                style("Bad Response from").red(),
                self.endpoints.base
            ))?;
            return Ok(Outcome::Unreachable);
        }
        debug!("Serving from {}", self.endpoints.directory);

        self.sweep_leftovers()?;

        let outcome = match local::inspect(&self.layout.installed_binary())? {
            InstallState::NotInstalled => {
                self.say(&format!("{DLL_FILE_NAME} Does Not Exist."))?;
                self.install()?
            }
            InstallState::Installed => {
                self.say(&format!("{DLL_FILE_NAME} Exists."))?;
                self.update()?
            }
        };

        info!("Run finished: {}", outcome);
        Ok(outcome)
    }

    fn install(&mut self) -> Result<Outcome> {
        self.say("Arcdps not found - Installing")?;

        let expected = fetch::fetch_expected_digest(
            self.remote,
            &self.endpoints.manifest,
            self.layout,
        )?;
        self.gate_candidate(&expected, Phase::Install)
    }

    fn update(&mut self) -> Result<Outcome> {
        let expected = fetch::fetch_expected_digest(
            self.remote,
            &self.endpoints.manifest,
            self.layout,
        )?;
        let current = local::installed_digest(&self.layout.installed_binary())?;
        info!("Installed digest: {}", current);

        if current == expected {
            self.say(
                &style("Your Arcdps is already the latest version. Exiting.")
                    .green()
                    .to_string(),
            )?;
            local::discard(&self.layout.manifest())?;
            return Ok(Outcome::AlreadyCurrent);
        }

        info!("Installed plugin differs from server, fetching candidate");
        self.gate_candidate(&expected, Phase::Update)
    }

    /// Download the candidate and promote it only on a digest match
    fn gate_candidate(&mut self, expected: &Digest, phase: Phase) -> Result<Outcome> {
        let actual =
            fetch::fetch_candidate(self.remote, &self.endpoints.binary, self.layout)?;

        if actual == *expected {
            let message = match phase {
                Phase::Install => "Checksum OK - Installing Arcdps.",
                Phase::Update => "Checksum OK - Updating Arcdps.",
            };
            self.say(&style(message).green().to_string())?;

            local::promote(&self.layout.staged_binary(), &self.layout.installed_binary())?;
            local::discard(&self.layout.manifest())?;

            Ok(match phase {
                Phase::Install => Outcome::Installed,
                Phase::Update => Outcome::Updated,
            })
        } else {
            warn!("Digest mismatch: expected {}, got {}", expected, actual);
            let message = match phase {
                Phase::Install => "Checksums do not match - Arcdps will not be Installed.",
                Phase::Update => "Checksums do not match - Arcdps will not be updated.",
            };
            self.say(&style(message).red().to_string())?;

            local::discard(&self.layout.staged_binary())?;
            local::discard(&self.layout.manifest())?;

            Ok(Outcome::Rejected(phase))
        }
    }

    /// Remove staged files an aborted run may have left behind
    fn sweep_leftovers(&mut self) -> Result<()> {
        local::discard_stale(&self.layout.staged_binary())?;
        local::discard_stale(&self.layout.manifest())?;
        Ok(())
    }

    fn say(&mut self, line: &str) -> Result<()> {
        info!("{}", console::strip_ansi_codes(line));
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}
