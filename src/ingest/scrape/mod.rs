//! Public playlist page scraping (the credential-free fallback source)

mod adapter;
mod client;
pub mod dto;

pub use adapter::SCRAPED_DESCRIPTION;
pub use client::{DEFAULT_BASE_URL, ScrapeClient};
