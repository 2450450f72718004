//! Internal domain models for playlist ingestion.
//!
//! These types are OUR types - they don't change when the upstream API or
//! the public playlist page change shape. Every source converts its wire
//! format into these types via its adapter.

use std::collections::HashSet;
use std::fmt;

/// A single video inside an imported playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVideo {
    /// Source-stable video identifier (unique within a playlist)
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    /// Zero-based order within the playlist
    pub position: u32,
    /// Source-native duration encoding, kept for audit
    pub duration_raw: String,
    /// Normalized duration in whole seconds
    pub duration_seconds: u32,
}

/// A playlist resolved from exactly one source.
///
/// Build it with [`NormalizedPlaylist::assemble`] so that positions, the
/// video count and the total duration always agree with `videos`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPlaylist {
    pub external_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    /// Always the number of fetched videos
    pub video_count: u32,
    pub videos: Vec<NormalizedVideo>,
    pub total_duration_seconds: u64,
    /// Which source produced this playlist
    pub source: SourceKind,
}

/// Playlist-level fields before the video list is attached.
#[derive(Debug, Clone, Default)]
pub struct PlaylistHeader {
    pub external_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    /// Count advertised by the source, if any (informational only)
    pub reported_count: Option<u32>,
}

impl NormalizedPlaylist {
    /// Assemble a playlist from a header and videos in source order.
    ///
    /// Repeated video IDs keep their first occurrence. Positions are
    /// restamped to `0..N-1` and totals are computed from the videos, never
    /// trusted from upstream.
    pub fn assemble(header: PlaylistHeader, videos: Vec<NormalizedVideo>, source: SourceKind) -> Self {
        let mut seen = HashSet::with_capacity(videos.len());
        let mut videos: Vec<NormalizedVideo> = videos
            .into_iter()
            .filter(|v| seen.insert(v.video_id.clone()))
            .collect();

        for (index, video) in videos.iter_mut().enumerate() {
            video.position = index as u32;
        }

        let video_count = videos.len() as u32;
        if let Some(reported) = header.reported_count
            && reported != video_count
        {
            tracing::debug!(
                playlist_id = %header.external_id,
                reported,
                fetched = video_count,
                "Source-reported video count differs from fetched items; using fetched count"
            );
        }

        let total_duration_seconds = videos.iter().map(|v| u64::from(v.duration_seconds)).sum();

        Self {
            external_id: header.external_id,
            title: header.title,
            description: header.description,
            thumbnail_url: header.thumbnail_url,
            channel_title: header.channel_title,
            video_count,
            videos,
            total_duration_seconds,
            source,
        }
    }
}

/// Where a playlist came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Mock,
    YouTubeApi,
    Scrape,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Mock => "mock",
            SourceKind::YouTubeApi => "youtube_api",
            SourceKind::Scrape => "scrape",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mock" => Ok(SourceKind::Mock),
            "youtube_api" => Ok(SourceKind::YouTubeApi),
            "scrape" => Ok(SourceKind::Scrape),
            other => Err(format!("unknown playlist source: {other}")),
        }
    }
}

/// Errors a single source can report for one playlist.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Playlist {0} not found upstream")]
    NotFound(String),

    #[error("Request rejected by upstream (check API key or quota): {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Playlist is unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Map a transport error, keeping timeouts distinguishable.
    ///
    /// The request URL is dropped from the message; it can carry credentials.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            SourceError::Timeout(err.to_string())
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

/// Terminal acquisition failure: no source produced the playlist.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Every source was tried; carries the last source's cause
    #[error("Failed to fetch playlist {playlist_id}. Ensure it is valid and public. Error: {source}")]
    Exhausted {
        playlist_id: String,
        #[source]
        source: SourceError,
    },

    #[error("No playlist source is configured for {0}")]
    NoSource(String),
}

/// Result of asking one source for a playlist.
///
/// The orchestrator matches on this instead of intercepting errors.
#[derive(Debug)]
pub enum SourceOutcome {
    /// The source produced a complete playlist
    Resolved(NormalizedPlaylist),
    /// The source has no such playlist; another source may
    Missed(SourceError),
    /// The source broke (network, auth, malformed payload)
    Failed(SourceError),
}

impl From<Result<NormalizedPlaylist, SourceError>> for SourceOutcome {
    fn from(result: Result<NormalizedPlaylist, SourceError>) -> Self {
        match result {
            Ok(playlist) => SourceOutcome::Resolved(playlist),
            Err(err @ SourceError::NotFound(_)) => SourceOutcome::Missed(err),
            Err(err) => SourceOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, position: u32, secs: u32) -> NormalizedVideo {
        NormalizedVideo {
            video_id: id.to_string(),
            title: format!("Video {id}"),
            description: String::new(),
            thumbnail_url: String::new(),
            channel_title: "Channel".to_string(),
            position,
            duration_raw: format!("PT{secs}S"),
            duration_seconds: secs,
        }
    }

    fn header(id: &str) -> PlaylistHeader {
        PlaylistHeader {
            external_id: id.to_string(),
            title: "Course".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_assemble_computes_totals() {
        let playlist = NormalizedPlaylist::assemble(
            header("PL1"),
            vec![video("a", 0, 60), video("b", 1, 90), video("c", 2, 0)],
            SourceKind::Scrape,
        );

        assert_eq!(playlist.video_count, 3);
        assert_eq!(playlist.total_duration_seconds, 150);
        assert_eq!(playlist.source, SourceKind::Scrape);
    }

    #[test]
    fn test_assemble_restamps_positions_in_source_order() {
        // Upstream positions may have gaps (removed videos)
        let playlist = NormalizedPlaylist::assemble(
            header("PL1"),
            vec![video("a", 3, 1), video("b", 7, 1), video("c", 9, 1)],
            SourceKind::YouTubeApi,
        );

        let positions: Vec<u32> = playlist.videos.iter().map(|v| v.position).collect();
        let ids: Vec<&str> = playlist.videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_assemble_drops_repeated_video_ids() {
        let playlist = NormalizedPlaylist::assemble(
            header("PL1"),
            vec![video("a", 0, 10), video("b", 1, 20), video("a", 2, 10)],
            SourceKind::Scrape,
        );

        assert_eq!(playlist.video_count, 2);
        assert_eq!(playlist.total_duration_seconds, 30);
        assert_eq!(playlist.videos[1].video_id, "b");
        assert_eq!(playlist.videos[1].position, 1);
    }

    #[test]
    fn test_fetched_count_wins_over_reported_count() {
        let mut h = header("PL1");
        h.reported_count = Some(40);
        let playlist = NormalizedPlaylist::assemble(h, vec![video("a", 0, 5)], SourceKind::Scrape);
        assert_eq!(playlist.video_count, 1);
    }

    #[test]
    fn test_outcome_classification() {
        let missed = SourceOutcome::from(Err(SourceError::NotFound("X".into())));
        assert!(matches!(missed, SourceOutcome::Missed(_)));

        let failed = SourceOutcome::from(Err(SourceError::Unauthorized("bad key".into())));
        assert!(matches!(failed, SourceOutcome::Failed(_)));
    }

    #[test]
    fn test_source_kind_round_trips_through_str() {
        for kind in [SourceKind::Mock, SourceKind::YouTubeApi, SourceKind::Scrape] {
            assert_eq!(kind.as_str().parse::<SourceKind>().unwrap(), kind);
        }
        assert!("ytpl".parse::<SourceKind>().is_err());
    }
}
