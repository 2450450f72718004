//! YouTube Data API v3 Data Transfer Objects
//!
//! These types match what the `playlists`, `playlistItems` and `videos`
//! endpoints return for `part=snippet,contentDetails`. Only the fields we
//! read are declared; serde ignores the rest.
//! DO NOT use these types outside the youtube module - convert to domain types.
//!
//! API Reference: https://developers.google.com/youtube/v3/docs
//!
//! Example `playlistItems` response:
//! ```json
//! {
//!   "nextPageToken": "EAAaBlBUOkNESQ",
//!   "pageInfo": {"totalResults": 120, "resultsPerPage": 50},
//!   "items": [{
//!     "snippet": {
//!       "title": "Lecture 1",
//!       "channelTitle": "Some University",
//!       "position": 0,
//!       "thumbnails": {"default": {"url": "..."}, "high": {"url": "..."}}
//!     },
//!     "contentDetails": {"videoId": "dQw4w9WgXcQ"}
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// `GET /playlists` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<Playlist>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub snippet: PlaylistSnippet,
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaylistSnippet {
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    pub item_count: Option<u32>,
}

/// Thumbnail variants keyed by resolution name. Any may be absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// `GET /playlistItems` response (one page)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    /// Absent (or empty) on the last page
    pub next_page_token: Option<String>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: Option<u32>,
    pub results_per_page: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    #[serde(default)]
    pub snippet: PlaylistItemSnippet,
    pub content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaylistItemSnippet {
    pub title: String,
    pub description: String,
    /// Owner of the playlist (not of the video)
    pub channel_title: String,
    pub position: Option<u32>,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: String,
}

/// `GET /videos` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoContentDetails {
    /// Compact duration, e.g. `PT1H2M3S`
    pub duration: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playlist_items_page() {
        let json = r#"{
            "kind": "youtube#playlistItemListResponse",
            "nextPageToken": "t1",
            "pageInfo": {"totalResults": 2, "resultsPerPage": 50},
            "items": [{
                "snippet": {
                    "title": "Intro",
                    "description": "First lecture",
                    "channelTitle": "Uni",
                    "position": 0,
                    "thumbnails": {"default": {"url": "d.jpg", "width": 120, "height": 90}}
                },
                "contentDetails": {"videoId": "vid1", "videoPublishedAt": "2020-01-01T00:00:00Z"}
            }]
        }"#;

        let page: PlaylistItemListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("t1"));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].content_details.video_id, "vid1");
        assert!(page.items[0].snippet.thumbnails.high.is_none());
        assert_eq!(page.items[0].snippet.thumbnails.default.as_ref().unwrap().url, "d.jpg");
    }

    #[test]
    fn test_parse_last_page_without_token() {
        let json = r#"{"items": []}"#;
        let page: PlaylistItemListResponse = serde_json::from_str(json).unwrap();
        assert!(page.next_page_token.is_none());
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_parse_video_without_content_details() {
        let json = r#"{"items": [{"id": "v1"}, {"id": "v2", "contentDetails": {"duration": "PT4M"}}]}"#;
        let videos: VideoListResponse = serde_json::from_str(json).unwrap();
        assert!(videos.items[0].content_details.is_none());
        assert_eq!(
            videos.items[1].content_details.as_ref().unwrap().duration.as_deref(),
            Some("PT4M")
        );
    }

    #[test]
    fn test_parse_error_envelope() {
        let json = r#"{"error": {"code": 403, "message": "quotaExceeded", "errors": []}}"#;
        let err: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.code, 403);
        assert_eq!(err.error.message, "quotaExceeded");
    }
}
