//! Course Minder - turns video playlists into stored courses.
//!
//! A playlist reference (URL or bare ID) is resolved through the YouTube
//! Data API when a key is configured, falling back to the public playlist
//! page. Each user imports a given playlist at most once.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod importer;
pub mod ingest;
pub mod model;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive("course_minder=info".parse()?)
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run_command(&args)
}
