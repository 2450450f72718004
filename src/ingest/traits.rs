//! The playlist source capability.
//!
//! Every acquisition strategy (demo generator, structured API, page scrape)
//! implements [`PlaylistSource`]. The orchestrator holds an ordered list of
//! them, so adding a source never touches the fallback logic.

use async_trait::async_trait;

use super::domain::{NormalizedPlaylist, SourceError, SourceKind};

/// Resolve a playlist ID to a complete [`NormalizedPlaylist`], or fail.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Which source this is (recorded on the resulting playlist).
    fn kind(&self) -> SourceKind;

    /// Whether this source should be asked about `playlist_id` at all.
    fn handles(&self, _playlist_id: &str) -> bool {
        true
    }

    /// Fetch the whole playlist. Partial results are never returned.
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<NormalizedPlaylist, SourceError>;
}

// Implement the capability for the real sources

#[async_trait]
impl PlaylistSource for super::mock::MockSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }

    fn handles(&self, playlist_id: &str) -> bool {
        self.is_sentinel(playlist_id)
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> Result<NormalizedPlaylist, SourceError> {
        Ok(self.generate(playlist_id))
    }
}

#[async_trait]
impl PlaylistSource for super::youtube::YouTubeApiClient {
    fn kind(&self) -> SourceKind {
        SourceKind::YouTubeApi
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> Result<NormalizedPlaylist, SourceError> {
        self.fetch_playlist(playlist_id).await
    }
}

#[async_trait]
impl PlaylistSource for super::scrape::ScrapeClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Scrape
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> Result<NormalizedPlaylist, SourceError> {
        self.fetch_playlist(playlist_id).await
    }
}
