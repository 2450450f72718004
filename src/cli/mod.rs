//! Command-line interface for course-minder.
//!
//! This module provides CLI commands for importing playlists and managing a
//! user's imports.

mod commands;

pub use commands::{Cli, Commands, run_command};
