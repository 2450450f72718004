//! Public playlist page client (the credential-free fallback source)
//!
//! 1. `GET /playlist?list=<ID>` - the HTML carries `ytInitialData` with the
//!    playlist metadata and the first chunk of the listing (about 100
//!    entries), plus the client key/version used for continuations.
//! 2. `POST /youtubei/v1/browse` with each continuation token until a chunk
//!    arrives without one. There is no cap on the number of entries.
//!
//! Every failure is reported as-is; the orchestrator decides what is
//! terminal.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::Value;

use super::adapter::{self, InnertubeConfig};
use super::dto;
use crate::ingest::domain::{NormalizedPlaylist, SourceError, SourceKind};

/// Public site root
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Browser-like agent; the page serves a consent wall to unknown agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Playlist page scraper
pub struct ScrapeClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ScrapeClient {
    /// Create a client against the public site.
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client against a custom base URL (tests).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a complete playlist by following every listing continuation.
    pub async fn fetch_playlist(&self, playlist_id: &str) -> Result<NormalizedPlaylist, SourceError> {
        let html = self.get_page(playlist_id).await?;
        let data = adapter::extract_initial_data(&html)?;

        adapter::check_alerts(&data, playlist_id)?;
        let mut header = adapter::to_header(&data, playlist_id)?;

        let first = adapter::to_listing_chunk(&data)?;
        let mut entries = first.entries;
        let mut continuation = first.continuation;

        let innertube = adapter::extract_innertube_config(&html);
        let mut seen_tokens = HashSet::new();

        while let Some(token) = continuation.take() {
            if !seen_tokens.insert(token.clone()) {
                return Err(SourceError::Parse(format!(
                    "continuation {token} repeated; refusing to loop"
                )));
            }
            let Some(config) = innertube.as_ref() else {
                return Err(SourceError::Parse(
                    "listing continues but page has no client config".to_string(),
                ));
            };

            let chunk = adapter::to_listing_chunk(&self.browse(config, &token).await?)?;
            tracing::debug!(
                playlist_id,
                fetched = entries.len() + chunk.entries.len(),
                "Fetched listing continuation"
            );
            entries.extend(chunk.entries);
            continuation = chunk.continuation;
        }

        let videos = adapter::to_videos(entries);
        if header.channel_title.is_empty()
            && let Some(first) = videos.first()
        {
            header.channel_title = first.channel_title.clone();
        }
        if header.thumbnail_url.is_empty()
            && let Some(first) = videos.first()
        {
            header.thumbnail_url = first.thumbnail_url.clone();
        }

        Ok(NormalizedPlaylist::assemble(header, videos, SourceKind::Scrape))
    }

    async fn get_page(&self, playlist_id: &str) -> Result<String, SourceError> {
        let url = format!(
            "{}/playlist?list={}&hl=en",
            self.base_url,
            urlencoding::encode(playlist_id)
        );

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(SourceError::from_reqwest)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(playlist_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response.text().await.map_err(SourceError::from_reqwest)
    }

    async fn browse(&self, config: &InnertubeConfig, token: &str) -> Result<Value, SourceError> {
        let url = format!(
            "{}/youtubei/v1/browse?key={}",
            self.base_url,
            urlencoding::encode(&config.api_key)
        );
        let body = dto::BrowseRequest {
            context: dto::BrowseContext {
                client: dto::BrowseClient {
                    client_name: "WEB",
                    client_version: &config.client_version,
                    hl: "en",
                },
            },
            continuation: token,
        };

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(SourceError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response.json::<Value>().await.map_err(SourceError::from_reqwest)
    }
}
