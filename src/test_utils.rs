//! Test utilities and fixtures for course-minder tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{temp_db, sample_playlist};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let playlist = sample_playlist("PL1", 5, SourceKind::Scrape);
//!     // ... test logic
//! }
//! ```

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::ingest::duration;
use crate::ingest::{NormalizedPlaylist, NormalizedVideo, PlaylistHeader, SourceKind};

/// Creates a temporary database for testing.
///
/// The database lives in a temporary directory that is removed when the
/// returned `TempDir` is dropped. Migrations are run automatically.
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates a normalized playlist of `videos` entries with varied durations.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let custom = NormalizedPlaylist {
///     title: "Custom".to_string(),
///     ..sample_playlist("PL1", 3, SourceKind::Scrape)
/// };
/// ```
pub fn sample_playlist(external_id: &str, videos: u32, source: SourceKind) -> NormalizedPlaylist {
    let header = PlaylistHeader {
        external_id: external_id.to_string(),
        title: format!("Sample Playlist {external_id}"),
        description: "A playlist for tests".to_string(),
        thumbnail_url: "https://i.ytimg.com/vi/sample/hqdefault.jpg".to_string(),
        channel_title: "Sample Channel".to_string(),
        reported_count: Some(videos),
    };

    let videos = (0..videos)
        .map(|n| {
            let seconds = 60 + n * 37;
            NormalizedVideo {
                video_id: format!("vid-{n}"),
                title: format!("Lesson {}", n + 1),
                description: format!("Lesson {} description", n + 1),
                thumbnail_url: format!("https://i.ytimg.com/vi/vid-{n}/hqdefault.jpg"),
                channel_title: "Sample Channel".to_string(),
                position: n,
                duration_raw: duration::to_compact(seconds),
                duration_seconds: seconds,
            }
        })
        .collect();

    NormalizedPlaylist::assemble(header, videos, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        let imports = crate::db::list_imports(&pool, "nobody").await.unwrap();
        assert!(imports.is_empty());
    }

    #[test]
    fn test_sample_playlist_is_consistent() {
        let playlist = sample_playlist("PL1", 4, SourceKind::YouTubeApi);

        assert_eq!(playlist.external_id, "PL1");
        assert_eq!(playlist.video_count, 4);
        assert_eq!(playlist.source, SourceKind::YouTubeApi);
        assert_eq!(playlist.total_duration_seconds, 60 + 97 + 134 + 171);
        for (i, video) in playlist.videos.iter().enumerate() {
            assert_eq!(video.position, i as u32);
            assert_eq!(duration::to_seconds(Some(&video.duration_raw)), video.duration_seconds);
        }
    }
}
