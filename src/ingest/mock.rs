//! Synthetic demo playlist.
//!
//! Requests for the sentinel ID are answered from here without touching the
//! network. Durations come from a seeded RNG, so the same seed always yields
//! the same playlist.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::domain::{NormalizedPlaylist, NormalizedVideo, PlaylistHeader, SourceKind};
use super::duration;

/// Reference that routes to the demo playlist
pub const DEFAULT_SENTINEL: &str = "demo-java";

/// Number of videos in the demo playlist
pub const DEFAULT_VIDEO_COUNT: u32 = 100;

const THUMBNAIL_URL: &str = "https://i.ytimg.com/vi/eIrMbAQSU34/hqdefault.jpg";
const CHANNEL_TITLE: &str = "ProgrammingKnowledge";

/// Shortest and longest (exclusive) generated video, in seconds
const MIN_DURATION_SECS: u32 = 5 * 60;
const MAX_DURATION_SECS: u32 = 55 * 60;

/// Demo playlist generator
#[derive(Debug, Clone)]
pub struct MockSource {
    sentinel: String,
    video_count: u32,
    seed: u64,
}

impl MockSource {
    pub fn new(sentinel: impl Into<String>, video_count: u32, seed: u64) -> Self {
        Self {
            sentinel: sentinel.into(),
            video_count,
            seed,
        }
    }

    /// Whether `playlist_id` is the demo sentinel.
    pub fn is_sentinel(&self, playlist_id: &str) -> bool {
        playlist_id == self.sentinel
    }

    /// Generate the demo playlist under `playlist_id`.
    pub fn generate(&self, playlist_id: &str) -> NormalizedPlaylist {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let videos = (1..=self.video_count)
            .map(|n| {
                let secs = rng.random_range(MIN_DURATION_SECS..MAX_DURATION_SECS);
                NormalizedVideo {
                    video_id: format!("mock-vid-{n}"),
                    title: format!("Java Programming Tutorial #{n} - Complete Guide"),
                    description: format!(
                        "This is video number {n} in the comprehensive Java series."
                    ),
                    thumbnail_url: THUMBNAIL_URL.to_string(),
                    channel_title: CHANNEL_TITLE.to_string(),
                    position: n - 1,
                    duration_raw: duration::to_compact(secs),
                    duration_seconds: secs,
                }
            })
            .collect();

        let header = PlaylistHeader {
            external_id: playlist_id.to_string(),
            title: format!(
                "Complete Java Programming Course ({} Videos)",
                self.video_count
            ),
            description: format!(
                "Learn Java from scratch to expert level with this {}-video playlist.",
                self.video_count
            ),
            thumbnail_url: THUMBNAIL_URL.to_string(),
            channel_title: CHANNEL_TITLE.to_string(),
            reported_count: Some(self.video_count),
        };

        NormalizedPlaylist::assemble(header, videos, SourceKind::Mock)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL, DEFAULT_VIDEO_COUNT, 42)
    }
}
