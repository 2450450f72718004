//! Playlist ingestion - turns a playlist reference into a normalized playlist.
//!
//! # Architecture
//!
//! Same layering for every source:
//! - **Domain models** (`domain.rs`) - our types, independent of any wire format
//! - **DTOs** (`youtube/dto.rs`, `scrape/dto.rs`) - exact upstream shapes
//! - **Adapters** - convert DTOs to domain models
//! - **Clients** - HTTP clients for the upstreams
//! - **Service** - tries sources in order and classifies total failure
//!
//! Durations leave this module in seconds only; the raw upstream encoding is
//! kept on each video for audit.
//!
//! # Usage
//!
//! ```ignore
//! use ingest::{ImportConfig, PlaylistFetcher, parse_playlist_id};
//!
//! let fetcher = PlaylistFetcher::new(&ImportConfig::default())?;
//! let id = parse_playlist_id("https://www.youtube.com/playlist?list=PL123");
//! let playlist = fetcher.fetch(id).await?;
//! println!("{}: {} videos", playlist.title, playlist.video_count);
//! ```

pub mod domain;
pub mod duration;
pub mod mock;
pub mod reference;
pub mod scrape;
pub mod service;
pub mod traits;
pub mod youtube;

pub use domain::{
    FetchError, NormalizedPlaylist, NormalizedVideo, PlaylistHeader, SourceError, SourceKind,
    SourceOutcome,
};
pub use mock::MockSource;
pub use reference::parse_playlist_id;
pub use service::{ImportConfig, PlaylistFetcher};
pub use traits::PlaylistSource;
