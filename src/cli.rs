//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// arc-updater - keeps arcdps up to date
///
/// Checks the arcdps distribution server and installs or updates
/// d3d11.dll next to the game executable when the published checksum
/// matches the download.
#[derive(Parser, Debug)]
#[command(
    name = "arc-updater",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install or update arcdps from its distribution server",
    long_about = "Place arc-updater in its own folder inside the Guild Wars 2 directory. \
                  Each run probes the server, compares the published MD5 checksum with the \
                  installed d3d11.dll and installs or updates it one level up.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  arc-updater                              \x1b[90m# Run from the updater folder\x1b[0m\n   \
                  arc-updater --dir \"C:\\GW2\\arc-updater\"   \x1b[90m# Run from elsewhere\x1b[0m\n   \
                  arc-updater --no-pause --no-log          \x1b[90m# Scripted, no log file\x1b[0m\n"
)]
pub struct Cli {
    /// Updater folder inside the game directory (defaults to current directory)
    #[arg(long, short = 'd', env = "ARC_UPDATER_DIR")]
    pub dir: Option<PathBuf>,

    /// Distribution root to use instead of the official server
    #[arg(long, env = "ARC_UPDATER_SERVER", value_name = "URL")]
    pub server: Option<String>,

    /// Exit without waiting for a keypress
    #[arg(long)]
    pub no_pause: bool,

    /// Do not write the run log
    #[arg(long)]
    pub no_log: bool,

    /// Write debug detail to the run log
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn work_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Whether to wait for a keypress before exiting
    pub fn should_pause(&self) -> bool {
        cfg!(feature = "pause-on-exit") && !self.no_pause
    }
}
