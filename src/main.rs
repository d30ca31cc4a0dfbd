//! arc-updater - arcdps installer and updater
//!
//! A single-pass command line tool that keeps the arcdps `d3d11.dll`
//! next to the Guild Wars 2 executable in sync with its distribution
//! server, gated on the published MD5 checksum.

use clap::Parser;
use console::Term;
use std::io;

mod cli;
mod config;
mod error;
mod fetch;
mod hash;
mod local;
mod logging;
mod progress;
mod reconcile;
mod remote;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;
use config::{Endpoints, Layout, REQUEST_TIMEOUT};
use error::Result;
use reconcile::{Outcome, Reconciler};
use remote::HttpRemote;

fn run(cli: &Cli) -> Result<Outcome> {
    let layout = Layout::resolve(&cli.work_dir())?;
    let _log_guard = if cli.no_log {
        None
    } else {
        Some(logging::init_run_log(&layout.run_log(), cli.verbose)?)
    };

    tracing::info!(
        "arc-updater {} in {}",
        env!("CARGO_PKG_VERSION"),
        layout.work_dir().display()
    );

    let endpoints = cli
        .server
        .as_deref()
        .map_or_else(Endpoints::default, Endpoints::from_server);
    let remote = HttpRemote::new(REQUEST_TIMEOUT)?;
    let mut stdout = io::stdout().lock();

    Reconciler::new(&remote, &endpoints, &layout, &mut stdout)
        .run()
        .inspect_err(|e| tracing::error!("Run aborted: {}", e))
}

/// Announce the end of the run and wait for a key when attached to a terminal
fn pause() {
    println!("Finished - Press any key to exit.");

    let term = Term::stdout();
    if term.is_term() {
        let _ = term.read_key();
    }
}

fn main() {
    let cli = Cli::parse();

    let result = run(&cli);

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }

    if cli.should_pause() {
        pause();
    }

    if result.is_err() {
        std::process::exit(1);
    }
}
