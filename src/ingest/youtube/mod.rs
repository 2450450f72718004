//! YouTube Data API v3 integration (the structured, key-authenticated source)
//!
//! API docs: https://developers.google.com/youtube/v3/docs

mod adapter;
mod client;
pub mod dto;

pub use adapter::MISSING_DURATION;
pub use client::{DEFAULT_BASE_URL, PAGE_SIZE, YouTubeApiClient};
