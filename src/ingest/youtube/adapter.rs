//! Adapter layer: Convert YouTube Data API DTOs to domain models
//!
//! This is the ONLY place where these DTO types are converted to domain
//! types.

use std::collections::HashMap;

use super::dto;
use crate::ingest::domain::{NormalizedVideo, PlaylistHeader, SourceError};
use crate::ingest::duration;

/// Raw duration used when the videos endpoint did not report one
pub const MISSING_DURATION: &str = "PT0S";

/// Convert a `playlists` response into the playlist header.
///
/// An empty result set means the API does not know this playlist (deleted,
/// private, or the ID is wrong). That is a miss, not a failure.
pub fn to_header(
    response: dto::PlaylistListResponse,
    playlist_id: &str,
) -> Result<PlaylistHeader, SourceError> {
    let Some(playlist) = response.items.into_iter().next() else {
        return Err(SourceError::NotFound(playlist_id.to_string()));
    };

    Ok(PlaylistHeader {
        external_id: playlist_id.to_string(),
        title: playlist.snippet.title,
        description: playlist.snippet.description,
        thumbnail_url: best_thumbnail(&playlist.snippet.thumbnails),
        channel_title: playlist.snippet.channel_title,
        reported_count: playlist.content_details.and_then(|d| d.item_count),
    })
}

/// Build a video ID → raw duration lookup from a `videos` response.
pub fn duration_lookup(response: dto::VideoListResponse) -> HashMap<String, String> {
    response
        .items
        .into_iter()
        .filter_map(|video| {
            let raw = video.content_details?.duration?;
            Some((video.id, raw))
        })
        .collect()
}

/// Convert one page of playlist items, resolving durations from `durations`.
///
/// `first_position` is the number of items accumulated before this page.
pub fn to_videos(
    items: Vec<dto::PlaylistItem>,
    durations: &HashMap<String, String>,
    first_position: u32,
) -> Vec<NormalizedVideo> {
    items
        .into_iter()
        .enumerate()
        .map(|(offset, item)| {
            let video_id = item.content_details.video_id;
            let duration_raw = durations
                .get(&video_id)
                .cloned()
                .unwrap_or_else(|| MISSING_DURATION.to_string());
            let duration_seconds = duration::to_seconds(Some(&duration_raw));

            NormalizedVideo {
                thumbnail_url: best_thumbnail(&item.snippet.thumbnails),
                title: item.snippet.title,
                description: item.snippet.description,
                channel_title: item.snippet.channel_title,
                position: item.snippet.position.unwrap_or(first_position + offset as u32),
                duration_raw,
                duration_seconds,
                video_id,
            }
        })
        .collect()
}

/// Prefer the high-resolution thumbnail, fall back to the default one.
fn best_thumbnail(thumbnails: &dto::Thumbnails) -> String {
    thumbnails
        .high
        .as_ref()
        .or(thumbnails.default.as_ref())
        .map(|t| t.url.clone())
        .unwrap_or_default()
}
