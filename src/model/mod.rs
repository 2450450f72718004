//! Persisted playlist imports.
//!
//! A [`PlaylistImport`] owns one normalized playlist plus who imported it and
//! when. It is created once per (owner, external ID) pair and never updated.
//!
//! # Database Schema
//!
//! - `playlist_imports` - one row per import, unique on (owner_user_id, external_id)
//! - `playlist_videos` - ordered videos, deleted with their import

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::ingest::{NormalizedPlaylist, NormalizedVideo, SourceKind};

/// A playlist imported by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistImport {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Owning user, as known to the authentication collaborator
    pub owner_user_id: String,
    pub imported_at: DateTime<Utc>,
    pub playlist: NormalizedPlaylist,
}

/// Import listing entry without the video list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: i64,
    pub external_id: String,
    pub title: String,
    pub channel_title: String,
    pub video_count: u32,
    pub total_duration_seconds: u64,
    pub source: SourceKind,
    pub imported_at: DateTime<Utc>,
}

/// Outcome of an import request. A duplicate is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportResult {
    /// First import of this playlist for this user
    Created(PlaylistImport),
    /// Already imported; the stored record, unchanged
    Existing(PlaylistImport),
}

impl ImportResult {
    pub fn record(&self) -> &PlaylistImport {
        match self {
            ImportResult::Created(record) | ImportResult::Existing(record) => record,
        }
    }

    pub fn into_record(self) -> PlaylistImport {
        match self {
            ImportResult::Created(record) | ImportResult::Existing(record) => record,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, ImportResult::Created(_))
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

/// Row of `playlist_imports`.
#[derive(Debug, Clone, FromRow)]
pub struct ImportRow {
    pub id: i64,
    pub owner_user_id: String,
    pub external_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub video_count: i64,
    pub total_duration_seconds: i64,
    pub source: String,
    /// RFC 3339
    pub imported_at: String,
}

/// Row of `playlist_videos`.
#[derive(Debug, Clone, FromRow)]
pub struct VideoRow {
    pub position: i64,
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub duration_raw: String,
    pub duration_seconds: i64,
}

impl From<VideoRow> for NormalizedVideo {
    fn from(row: VideoRow) -> Self {
        NormalizedVideo {
            video_id: row.video_id,
            title: row.title,
            description: row.description,
            thumbnail_url: row.thumbnail_url,
            channel_title: row.channel_title,
            position: row.position as u32,
            duration_raw: row.duration_raw,
            duration_seconds: row.duration_seconds as u32,
        }
    }
}

impl ImportRow {
    fn parse_source(&self) -> Result<SourceKind, sqlx::Error> {
        self.source
            .parse()
            .map_err(|e: String| sqlx::Error::Decode(e.into()))
    }

    fn parse_imported_at(&self) -> Result<DateTime<Utc>, sqlx::Error> {
        self.imported_at
            .parse::<DateTime<Utc>>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }

    /// Combine with the import's videos (already ordered by position).
    pub fn into_import(self, videos: Vec<VideoRow>) -> Result<PlaylistImport, sqlx::Error> {
        let source = self.parse_source()?;
        let imported_at = self.parse_imported_at()?;

        Ok(PlaylistImport {
            id: self.id,
            owner_user_id: self.owner_user_id,
            imported_at,
            playlist: NormalizedPlaylist {
                external_id: self.external_id,
                title: self.title,
                description: self.description,
                thumbnail_url: self.thumbnail_url,
                channel_title: self.channel_title,
                video_count: self.video_count as u32,
                videos: videos.into_iter().map(NormalizedVideo::from).collect(),
                total_duration_seconds: self.total_duration_seconds as u64,
                source,
            },
        })
    }

    pub fn into_summary(self) -> Result<PlaylistSummary, sqlx::Error> {
        let source = self.parse_source()?;
        let imported_at = self.parse_imported_at()?;

        Ok(PlaylistSummary {
            id: self.id,
            external_id: self.external_id,
            title: self.title,
            channel_title: self.channel_title,
            video_count: self.video_count as u32,
            total_duration_seconds: self.total_duration_seconds as u64,
            source,
            imported_at,
        })
    }
}
