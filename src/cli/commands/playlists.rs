//! Commands for a user's existing imports.

use std::path::Path;
use tokio::runtime::Runtime;

use super::{format_duration, open_importer};
use crate::config::Config;
use crate::importer::ImportError;

/// List a user's imports, newest first
pub fn cmd_list(
    rt: &Runtime,
    config: &Config,
    user: &str,
    db_path: Option<&Path>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let importer = open_importer(config, db_path, None).await?;
        let imports = importer.list_imports(user).await?;

        if imports.is_empty() {
            println!("No playlists imported for {}.", user);
            return Ok(());
        }

        for summary in imports {
            println!(
                "{:>5}  {}  {} ({} videos, {}) [{}]",
                summary.id,
                summary.imported_at.format("%Y-%m-%d"),
                summary.title,
                summary.video_count,
                format_duration(summary.total_duration_seconds),
                summary.source
            );
        }
        anyhow::Ok(())
    })
}

/// Show one import with its videos
pub fn cmd_show(
    rt: &Runtime,
    config: &Config,
    user: &str,
    import_id: i64,
    db_path: Option<&Path>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let importer = open_importer(config, db_path, None).await?;
        let record = match importer.get_import(user, import_id).await {
            Ok(record) => record,
            Err(ImportError::NotFound(id)) => {
                eprintln!("✗ No import {} for {}", id, user);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        };

        let playlist = &record.playlist;
        println!("{} ({})", playlist.title, playlist.external_id);
        println!("  Channel:  {}", playlist.channel_title);
        println!("  Imported: {}", record.imported_at.format("%Y-%m-%d %H:%M:%S"));
        println!("  Source:   {}", playlist.source);
        println!(
            "  {} videos, {}",
            playlist.video_count,
            format_duration(playlist.total_duration_seconds)
        );
        println!();
        for video in &playlist.videos {
            println!(
                "  {:>4}. {} [{}]",
                video.position + 1,
                video.title,
                format_duration(u64::from(video.duration_seconds))
            );
        }
        anyhow::Ok(())
    })
}

/// Delete one import and its videos
pub fn cmd_delete(
    rt: &Runtime,
    config: &Config,
    user: &str,
    import_id: i64,
    db_path: Option<&Path>,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let importer = open_importer(config, db_path, None).await?;
        match importer.delete_import(user, import_id).await {
            Ok(()) => {
                println!("✓ Deleted import {}", import_id);
                anyhow::Ok(())
            }
            Err(ImportError::NotFound(id)) => {
                eprintln!("✗ No import {} for {}", id, user);
                std::process::exit(1);
            }
            Err(e) => Err(e.into()),
        }
    })
}
