//! Playlist import commands.

use std::path::Path;
use tokio::runtime::Runtime;

use super::{format_duration, open_importer};
use crate::config::{self, Config};
use crate::ingest::duration;
use crate::model::ImportResult;

/// Import a playlist for a user
pub fn cmd_import(
    rt: &Runtime,
    config: &Config,
    reference: &str,
    user: &str,
    api_key: Option<&str>,
    db_path: Option<&Path>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let importer = open_importer(config, db_path, api_key).await?;
        println!("Importing: {}", reference);

        let result = match importer.import_playlist(user, reference).await {
            Ok(result) => result,
            Err(e) => {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
        };

        let record = result.record();
        let playlist = &record.playlist;
        match &result {
            ImportResult::Created(_) => println!("✓ Imported (id {})", record.id),
            ImportResult::Existing(_) => println!(
                "✓ Already imported on {} (id {})",
                record.imported_at.format("%Y-%m-%d %H:%M"),
                record.id
            ),
        }
        println!();
        println!("  Title:    {}", playlist.title);
        println!("  Channel:  {}", playlist.channel_title);
        println!("  Videos:   {}", playlist.video_count);
        println!("  Duration: {}", format_duration(playlist.total_duration_seconds));
        println!("  Source:   {}", playlist.source);
        anyhow::Ok(())
    })
}

/// Print the normalized seconds for a raw duration
pub fn cmd_duration(value: &str) {
    let seconds = duration::to_seconds(Some(value));
    println!("{} = {} seconds ({})", value, seconds, format_duration(u64::from(seconds)));
}

/// Write a config file with defaults, keeping any existing settings
pub fn cmd_init_config(mut config: Config, api_key: Option<&str>) -> anyhow::Result<()> {
    if let Some(key) = api_key {
        config.credentials.youtube_api_key = Some(key.to_string());
    }

    let path = config::save(&config)?;
    println!("✓ Config written to {:?}", path);
    if config.credentials.youtube_api_key.is_none() {
        println!("  No YouTube API key set; imports will scrape public pages.");
    }
    Ok(())
}
