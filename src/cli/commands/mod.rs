//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `import`: Playlist import and the duration diagnostic
//! - `playlists`: Listing, showing and deleting a user's imports

mod import;
mod playlists;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::db::{self, SqliteImportStore};
use crate::error::{self, ResultExt};
use crate::importer::Importer;
use crate::ingest::PlaylistFetcher;

pub use import::{cmd_duration, cmd_import, cmd_init_config};
pub use playlists::{cmd_delete, cmd_list, cmd_show};

/// Course Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Import a playlist (URL or bare ID) as a course
    Import {
        /// Playlist URL or ID ("demo-java" imports the demo course)
        reference: String,
        /// Owning user ID
        #[arg(short, long)]
        user: String,
        /// YouTube Data API key (or set YOUTUBE_API_KEY env var)
        #[arg(short, long, env = "YOUTUBE_API_KEY")]
        api_key: Option<String>,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// List a user's imported playlists
    List {
        /// Owning user ID
        #[arg(short, long)]
        user: String,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show one import with its videos
    Show {
        /// Import ID (from `list`)
        id: i64,
        /// Owning user ID
        #[arg(short, long)]
        user: String,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Delete one import and its videos
    Delete {
        /// Import ID (from `list`)
        id: i64,
        /// Owning user ID
        #[arg(short, long)]
        user: String,
        /// Database path
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Normalize an ISO-8601 duration (e.g. PT1H2M3S) to seconds
    Duration {
        value: String,
    },
    /// Write a config file with defaults
    InitConfig {
        /// YouTube Data API key to store
        #[arg(short, long)]
        api_key: Option<String>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load();

    match &cli.command {
        Commands::Import {
            reference,
            user,
            api_key,
            db,
        } => {
            let rt = Runtime::new()?;
            cmd_import(&rt, &config, reference, user, api_key.as_deref(), db.as_deref())
        }
        Commands::List { user, db } => {
            let rt = Runtime::new()?;
            cmd_list(&rt, &config, user, db.as_deref())
        }
        Commands::Show { id, user, db } => {
            let rt = Runtime::new()?;
            cmd_show(&rt, &config, user, *id, db.as_deref())
        }
        Commands::Delete { id, user, db } => {
            let rt = Runtime::new()?;
            cmd_delete(&rt, &config, user, *id, db.as_deref())
        }
        Commands::Duration { value } => {
            cmd_duration(value);
            Ok(())
        }
        Commands::InitConfig { api_key } => cmd_init_config(config, api_key.as_deref()),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Open the database and build the importer with the configured sources.
pub(crate) async fn open_importer(
    config: &Config,
    db_path: Option<&Path>,
    api_key: Option<&str>,
) -> error::Result<Importer<SqliteImportStore>> {
    let path = db_path
        .map(Path::to_path_buf)
        .or_else(|| config.storage.database_path.clone());
    let db_url = db::db_url(path.as_deref());

    let pool = db::init_db(&db_url)
        .await
        .with_context(format!("Failed to open database {db_url}"))?;
    let fetcher = PlaylistFetcher::new(&config.to_import_config(api_key))
        .with_context("Failed to set up playlist sources")?;

    Ok(Importer::new(SqliteImportStore::new(pool), fetcher))
}

/// Format seconds as `H:MM:SS` (or `M:SS` under an hour)
pub(crate) fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
