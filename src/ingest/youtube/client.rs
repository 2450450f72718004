//! YouTube Data API v3 HTTP client
//!
//! Resolves a playlist in three kinds of calls:
//! 1. `playlists` - playlist metadata (empty result = not found)
//! 2. `playlistItems` - membership, 50 per page, following `nextPageToken`
//! 3. `videos` - one batch per page to resolve durations, since membership
//!    items don't carry them
//!
//! Pages are fetched strictly in token order; each token comes from the
//! previous response. Any error aborts the whole fetch - no partial
//! playlist ever leaves this client.
//!
//! ## Quota
//! Every call costs one quota unit, so a 500-video playlist costs 21 units
//! (1 + 10 pages + 10 duration batches).

use std::collections::HashSet;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::ingest::domain::{NormalizedPlaylist, SourceError, SourceKind};

/// Public endpoint of the Data API
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Maximum page size the API allows for `playlistItems`
pub const PAGE_SIZE: u32 = 50;

/// The key travels in a header so it never appears in request URLs
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// YouTube Data API client
pub struct YouTubeApiClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

impl YouTubeApiClient {
    /// Create a client against the public API.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout)
    }

    /// Create a client against a custom base URL (proxies, tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a complete playlist: metadata, every page, every duration.
    pub async fn fetch_playlist(&self, playlist_id: &str) -> Result<NormalizedPlaylist, SourceError> {
        let header = adapter::to_header(self.get_playlist(playlist_id).await?, playlist_id)?;

        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        loop {
            let page = self.get_items_page(playlist_id, page_token.as_deref()).await?;

            let video_ids: Vec<&str> = page
                .items
                .iter()
                .map(|item| item.content_details.video_id.as_str())
                .collect();
            let durations = if video_ids.is_empty() {
                Default::default()
            } else {
                adapter::duration_lookup(self.get_videos(&video_ids).await?)
            };

            let first_position = videos.len() as u32;
            videos.extend(adapter::to_videos(page.items, &durations, first_position));

            tracing::debug!(
                playlist_id,
                fetched = videos.len(),
                "Fetched playlist items page"
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    if !seen_tokens.insert(token.clone()) {
                        return Err(SourceError::Parse(format!(
                            "page token {token} repeated; refusing to loop"
                        )));
                    }
                    page_token = Some(token);
                }
                None => break,
            }
        }

        Ok(NormalizedPlaylist::assemble(header, videos, SourceKind::YouTubeApi))
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<dto::PlaylistListResponse, SourceError> {
        self.get_json(
            "playlists",
            &[("part", "snippet,contentDetails"), ("id", playlist_id)],
        )
        .await
    }

    async fn get_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<dto::PlaylistItemListResponse, SourceError> {
        let max_results = PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        self.get_json("playlistItems", &query).await
    }

    async fn get_videos(&self, video_ids: &[&str]) -> Result<dto::VideoListResponse, SourceError> {
        let ids = video_ids.join(",");
        self.get_json("videos", &[("part", "contentDetails"), ("id", ids.as_str())])
            .await
    }

    /// Send a keyed GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(SourceError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<dto::ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    SourceError::Unauthorized(message)
                }
                _ => SourceError::Http {
                    status: status.as_u16(),
                    body: message,
                },
            });
        }

        response.json::<T>().await.map_err(SourceError::from_reqwest)
    }
}
