//! Acquisition orchestration - resolves a playlist ID through an ordered
//! list of sources.
//!
//! Default order:
//! 1. Demo generator (only for the sentinel ID, never touches the network)
//! 2. YouTube Data API (only when an API key is configured)
//! 3. Public page scrape (always)
//!
//! Each attempt yields a [`SourceOutcome`]. A miss or failure moves on to
//! the next source; only the last source's failure reaches the caller.
//! Results from different sources are never merged.

use std::time::Duration;

use super::domain::{FetchError, NormalizedPlaylist, SourceError, SourceKind, SourceOutcome};
use super::mock::{self, MockSource};
use super::scrape::{self, ScrapeClient};
use super::traits::PlaylistSource;
use super::youtube::{self, YouTubeApiClient};

/// Configuration for playlist acquisition
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// YouTube Data API key; `None` means scrape-only (a normal mode)
    pub youtube_api_key: Option<String>,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Reference that routes to the demo playlist
    pub demo_sentinel: String,
    pub mock_video_count: u32,
    pub mock_seed: u64,
    pub api_base_url: String,
    pub scrape_base_url: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            youtube_api_key: None,
            request_timeout: Duration::from_secs(15),
            demo_sentinel: mock::DEFAULT_SENTINEL.to_string(),
            mock_video_count: mock::DEFAULT_VIDEO_COUNT,
            mock_seed: 42,
            api_base_url: youtube::DEFAULT_BASE_URL.to_string(),
            scrape_base_url: scrape::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Orchestrates playlist acquisition across sources
pub struct PlaylistFetcher {
    sources: Vec<Box<dyn PlaylistSource>>,
}

impl PlaylistFetcher {
    /// Build the default source chain from config.
    pub fn new(config: &ImportConfig) -> Result<Self, SourceError> {
        let mut sources: Vec<Box<dyn PlaylistSource>> = vec![Box::new(MockSource::new(
            config.demo_sentinel.clone(),
            config.mock_video_count,
            config.mock_seed,
        ))];

        match config.youtube_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                sources.push(Box::new(YouTubeApiClient::with_base_url(
                    key,
                    config.api_base_url.clone(),
                    config.request_timeout,
                )?));
            }
            _ => tracing::debug!("No YouTube API key configured; using page scrape only"),
        }

        sources.push(Box::new(ScrapeClient::with_base_url(
            config.scrape_base_url.clone(),
            config.request_timeout,
        )?));

        Ok(Self { sources })
    }

    /// Build a fetcher over an explicit, ordered source list.
    pub fn with_sources(sources: Vec<Box<dyn PlaylistSource>>) -> Self {
        Self { sources }
    }

    /// The configured sources, in the order they are tried.
    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// Resolve `playlist_id` (already parsed from the reference).
    pub async fn fetch(&self, playlist_id: &str) -> Result<NormalizedPlaylist, FetchError> {
        let mut last_error = None;

        for source in self.sources.iter().filter(|s| s.handles(playlist_id)) {
            let kind = source.kind();
            tracing::debug!(playlist_id, source = %kind, "Trying playlist source");

            match SourceOutcome::from(source.fetch_playlist(playlist_id).await) {
                SourceOutcome::Resolved(playlist) => {
                    tracing::info!(
                        playlist_id,
                        source = %kind,
                        videos = playlist.video_count,
                        total_seconds = playlist.total_duration_seconds,
                        "Playlist resolved"
                    );
                    return Ok(playlist);
                }
                SourceOutcome::Missed(err) => {
                    tracing::debug!(playlist_id, source = %kind, "Source has no such playlist: {}", err);
                    last_error = Some(err);
                }
                SourceOutcome::Failed(err) => {
                    tracing::warn!(playlist_id, source = %kind, "Source failed, trying next: {}", err);
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(source) => {
                tracing::error!(playlist_id, "All playlist sources failed: {}", source);
                Err(FetchError::Exhausted {
                    playlist_id: playlist_id.to_string(),
                    source,
                })
            }
            None => Err(FetchError::NoSource(playlist_id.to_string())),
        }
    }
}
