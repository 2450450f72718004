//! Shapes of the renderer objects embedded in the public playlist page.
//!
//! The page carries a large `ytInitialData` JSON document (and continuation
//! responses carry more of the same). We don't model the whole tree - the
//! adapter locates the renderer objects by key and deserializes only these.
//! DO NOT use these types outside the scrape module - convert to domain types.
//!
//! Example `playlistVideoRenderer`:
//! ```json
//! {
//!   "videoId": "dQw4w9WgXcQ",
//!   "title": {"runs": [{"text": "Lecture 1"}]},
//!   "thumbnail": {"thumbnails": [{"url": "https://i.ytimg.com/...", "width": 168, "height": 94}]},
//!   "shortBylineText": {"runs": [{"text": "Some University"}]},
//!   "lengthText": {"simpleText": "12:34"},
//!   "lengthSeconds": "754"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Text node: either `simpleText` or a list of `runs`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Text {
    pub simple_text: Option<String>,
    pub runs: Vec<Run>,
}

impl Text {
    /// Flatten to a plain string.
    pub fn text(&self) -> String {
        match &self.simple_text {
            Some(s) => s.clone(),
            None => self.runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Run {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThumbnailList {
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One playlist entry
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideoRenderer {
    pub video_id: String,
    #[serde(default)]
    pub title: Text,
    #[serde(default)]
    pub thumbnail: ThumbnailList,
    /// Uploader name
    pub short_byline_text: Option<Text>,
    /// Human-readable length, e.g. "1:02:03"
    pub length_text: Option<Text>,
    /// Length in seconds, as a string
    pub length_seconds: Option<String>,
}

/// Trailing item of a listing chunk that points at the next chunk
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationItemRenderer {
    pub continuation_endpoint: ContinuationEndpoint,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationEndpoint {
    pub continuation_command: ContinuationCommand,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContinuationCommand {
    pub token: String,
}

/// `metadata.playlistMetadataRenderer`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaylistMetadataRenderer {
    pub title: String,
    pub description: String,
}

/// `microformat.microformatDataRenderer`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MicroformatDataRenderer {
    pub title: String,
    pub description: String,
    pub thumbnail: ThumbnailList,
}

/// Page-level alert ("The playlist does not exist.", "This playlist is private.")
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertRenderer {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Text,
}

/// Body of the `youtubei/v1/browse` continuation request
#[derive(Debug, Clone, Serialize)]
pub struct BrowseRequest<'a> {
    pub context: BrowseContext<'a>,
    pub continuation: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseContext<'a> {
    pub client: BrowseClient<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseClient<'a> {
    pub client_name: &'a str,
    pub client_version: &'a str,
    pub hl: &'a str,
}
