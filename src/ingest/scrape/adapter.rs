//! Adapter layer: locate renderer objects in page data and convert them to
//! domain models.
//!
//! Page layout moves around between front-end releases, so renderers are
//! found by key anywhere in the tree instead of by a fixed path.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dto;
use crate::ingest::domain::{NormalizedVideo, PlaylistHeader, SourceError};

/// Description given to every scraped video; the listing has none.
pub const SCRAPED_DESCRIPTION: &str = "Imported via Scraper";

const INITIAL_DATA_MARKER: &str = "ytInitialData";

static INNERTUBE_API_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#).expect("valid api key pattern")
});

static INNERTUBE_CLIENT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_CLIENT_VERSION"\s*:\s*"([^"]+)""#).expect("valid version pattern")
});

/// Client settings needed to request listing continuations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnertubeConfig {
    pub api_key: String,
    pub client_version: String,
}

/// One chunk of the listing: entries plus the token for the next chunk.
#[derive(Debug, Default)]
pub struct ListingChunk {
    pub entries: Vec<dto::PlaylistVideoRenderer>,
    pub continuation: Option<String>,
}

/// Pull the `ytInitialData` document out of the page HTML.
pub fn extract_initial_data(html: &str) -> Result<Value, SourceError> {
    let start = html
        .find(INITIAL_DATA_MARKER)
        .and_then(|marker| html[marker..].find('{').map(|brace| marker + brace))
        .ok_or_else(|| SourceError::Parse("page has no ytInitialData".to_string()))?;

    // The document is followed by `;</script>`; stream exactly one value.
    serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| SourceError::Parse("ytInitialData is empty".to_string()))?
        .map_err(|e| SourceError::Parse(format!("ytInitialData: {e}")))
}

/// Read the client key/version the page was rendered with.
pub fn extract_innertube_config(html: &str) -> Option<InnertubeConfig> {
    let api_key = INNERTUBE_API_KEY.captures(html)?.get(1)?.as_str().to_string();
    let client_version = INNERTUBE_CLIENT_VERSION
        .captures(html)?
        .get(1)?
        .as_str()
        .to_string();
    Some(InnertubeConfig {
        api_key,
        client_version,
    })
}

/// Fail early when the page shows an error alert instead of a playlist.
pub fn check_alerts(data: &Value, playlist_id: &str) -> Result<(), SourceError> {
    if find_first(data, "playlistMetadataRenderer").is_some() {
        return Ok(());
    }

    let alert = find_all(data, "alertRenderer")
        .into_iter()
        .chain(find_all(data, "alertWithButtonRenderer"))
        .filter_map(|v| decode::<dto::AlertRenderer>(v).ok())
        .find(|a| a.kind.as_deref().is_none_or(|k| k == "ERROR"));

    match alert {
        Some(alert) => {
            let message = alert.text.text();
            if message.to_lowercase().contains("does not exist") {
                Err(SourceError::NotFound(playlist_id.to_string()))
            } else {
                Err(SourceError::Unavailable(message))
            }
        }
        None => Ok(()),
    }
}

/// Build the playlist header from page metadata.
pub fn to_header(data: &Value, playlist_id: &str) -> Result<PlaylistHeader, SourceError> {
    let metadata: dto::PlaylistMetadataRenderer = find_first(data, "playlistMetadataRenderer")
        .map(decode)
        .transpose()?
        .unwrap_or_default();
    let microformat: dto::MicroformatDataRenderer = find_first(data, "microformatDataRenderer")
        .map(decode)
        .transpose()?
        .unwrap_or_default();

    let title = if metadata.title.is_empty() {
        microformat.title.clone()
    } else {
        metadata.title
    };
    if title.is_empty() {
        return Err(SourceError::Parse(format!(
            "no playlist metadata on page for {playlist_id}"
        )));
    }

    let description = if metadata.description.is_empty() {
        microformat.description
    } else {
        metadata.description
    };

    Ok(PlaylistHeader {
        external_id: playlist_id.to_string(),
        title,
        description,
        thumbnail_url: best_thumbnail(&microformat.thumbnail),
        channel_title: owner_name(data).unwrap_or_default(),
        reported_count: reported_count(data),
    })
}

/// Collect the entries and continuation token of one listing chunk.
pub fn to_listing_chunk(data: &Value) -> Result<ListingChunk, SourceError> {
    let entries = find_all(data, "playlistVideoRenderer")
        .into_iter()
        .map(decode::<dto::PlaylistVideoRenderer>)
        .collect::<Result<Vec<_>, _>>()?;

    let continuation = find_all(data, "continuationItemRenderer")
        .into_iter()
        .filter_map(|v| decode::<dto::ContinuationItemRenderer>(v).ok())
        .map(|c| c.continuation_endpoint.continuation_command.token)
        .find(|t| !t.is_empty());

    Ok(ListingChunk {
        entries,
        continuation,
    })
}

/// Convert listing entries (in listing order) to domain videos.
pub fn to_videos(entries: Vec<dto::PlaylistVideoRenderer>) -> Vec<NormalizedVideo> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| NormalizedVideo {
            title: entry.title.text(),
            description: SCRAPED_DESCRIPTION.to_string(),
            thumbnail_url: best_thumbnail(&entry.thumbnail),
            channel_title: entry
                .short_byline_text
                .map(|t| t.text())
                .unwrap_or_default(),
            position: index as u32,
            duration_raw: entry.length_text.map(|t| t.text()).unwrap_or_default(),
            duration_seconds: entry
                .length_seconds
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0),
            video_id: entry.video_id,
        })
        .collect()
}

/// Widest thumbnail, or the last listed when widths are missing.
fn best_thumbnail(list: &dto::ThumbnailList) -> String {
    list.thumbnails
        .iter()
        .enumerate()
        .max_by_key(|(index, t)| (t.width.unwrap_or(0), *index))
        .map(|(_, t)| absolute_url(&t.url))
        .unwrap_or_default()
}

fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

fn owner_name(data: &Value) -> Option<String> {
    ["playlistHeaderRenderer", "videoOwnerRenderer"]
        .iter()
        .filter_map(|key| find_first(data, key))
        .find_map(|renderer| {
            let text = renderer.get("ownerText").or_else(|| renderer.get("title"))?;
            let name = decode::<dto::Text>(text).ok()?.text();
            (!name.is_empty()).then_some(name)
        })
}

fn reported_count(data: &Value) -> Option<u32> {
    let text = decode::<dto::Text>(find_first(data, "numVideosText")?).ok()?.text();
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, SourceError> {
    T::deserialize(value).map_err(|e| SourceError::Parse(e.to_string()))
}

/// First value stored under `key`, depth-first.
fn find_first<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|v| find_first(v, key))),
        Value::Array(items) => items.iter().find_map(|v| find_first(v, key)),
        _ => None,
    }
}

/// Every value stored under `key`, in document order. Matches are not
/// searched further.
fn find_all<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(value, key, &mut found);
    found
}

fn collect<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    found.push(v);
                } else {
                    collect(v, key, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, key, found);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, secs: Option<&str>) -> Value {
        let mut v = json!({
            "playlistVideoRenderer": {
                "videoId": id,
                "title": {"runs": [{"text": format!("Video {id}")}]},
                "thumbnail": {"thumbnails": [
                    {"url": format!("https://i.ytimg.com/{id}/small.jpg"), "width": 168},
                    {"url": format!("https://i.ytimg.com/{id}/big.jpg"), "width": 336}
                ]},
                "shortBylineText": {"runs": [{"text": "Uploader"}]},
                "lengthText": {"simpleText": "1:00"}
            }
        });
        if let Some(secs) = secs {
            v["playlistVideoRenderer"]["lengthSeconds"] = json!(secs);
        }
        v
    }

    #[test]
    fn test_extract_initial_data_from_script() {
        let html = r#"<html><script>var ytInitialData = {"a": {"b": "};</script>"}};</script><script>var other = 1;</script></html>"#;
        let data = extract_initial_data(html).unwrap();
        assert_eq!(data["a"]["b"], "};</script>");
    }

    #[test]
    fn test_extract_initial_data_window_assignment() {
        let html = r#"<script>window["ytInitialData"] = {"x": 1};</script>"#;
        assert_eq!(extract_initial_data(html).unwrap()["x"], 1);
    }

    #[test]
    fn test_missing_initial_data_is_parse_error() {
        let result = extract_initial_data("<html><body>consent wall</body></html>");
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_extract_innertube_config() {
        let html = r#"ytcfg.set({"INNERTUBE_API_KEY": "AIzaKey", "INNERTUBE_CLIENT_VERSION":"2.20240101.00.00"});"#;
        let config = extract_innertube_config(html).unwrap();
        assert_eq!(config.api_key, "AIzaKey");
        assert_eq!(config.client_version, "2.20240101.00.00");
        assert!(extract_innertube_config("nothing here").is_none());
    }

    #[test]
    fn test_listing_chunk_with_continuation() {
        let data = json!({
            "contents": [
                entry("a", Some("60")),
                entry("b", None),
                {"continuationItemRenderer": {
                    "continuationEndpoint": {"continuationCommand": {"token": "next-1"}}
                }}
            ]
        });

        let chunk = to_listing_chunk(&data).unwrap();
        assert_eq!(chunk.entries.len(), 2);
        assert_eq!(chunk.continuation.as_deref(), Some("next-1"));
    }

    #[test]
    fn test_malformed_entry_is_parse_error() {
        let data = json!({"contents": [{"playlistVideoRenderer": {"title": "no id"}}]});
        assert!(matches!(to_listing_chunk(&data), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_to_videos_maps_entries() {
        let data = json!([entry("a", Some("754")), entry("b", None), entry("c", Some("oops"))]);
        let chunk = to_listing_chunk(&data).unwrap();
        let videos = to_videos(chunk.entries);

        assert_eq!(videos.len(), 3);
        assert_eq!(videos[0].duration_seconds, 754);
        assert_eq!(videos[0].duration_raw, "1:00");
        assert_eq!(videos[1].duration_seconds, 0);
        assert_eq!(videos[2].duration_seconds, 0);
        assert_eq!(videos[0].description, SCRAPED_DESCRIPTION);
        assert_eq!(videos[0].channel_title, "Uploader");
        assert_eq!(videos[0].thumbnail_url, "https://i.ytimg.com/a/big.jpg");
        assert_eq!(videos[2].position, 2);
    }

    #[test]
    fn test_header_from_metadata() {
        let data = json!({
            "header": {"playlistHeaderRenderer": {
                "ownerText": {"runs": [{"text": "CS Dept"}]},
                "numVideosText": {"runs": [{"text": "1,024"}, {"text": " videos"}]}
            }},
            "metadata": {"playlistMetadataRenderer": {"title": "Compilers", "description": "Dragon book"}},
            "microformat": {"microformatDataRenderer": {
                "title": "Compilers - YouTube",
                "thumbnail": {"thumbnails": [{"url": "//i.ytimg.com/pl.jpg", "width": 480}]}
            }}
        });

        let header = to_header(&data, "PLc").unwrap();
        assert_eq!(header.title, "Compilers");
        assert_eq!(header.description, "Dragon book");
        assert_eq!(header.channel_title, "CS Dept");
        assert_eq!(header.thumbnail_url, "https://i.ytimg.com/pl.jpg");
        assert_eq!(header.reported_count, Some(1024));
    }

    #[test]
    fn test_header_without_any_title_is_parse_error() {
        let data = json!({"contents": []});
        assert!(matches!(to_header(&data, "PLx"), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_alert_for_missing_playlist() {
        let data = json!({"alerts": [{"alertRenderer": {
            "type": "ERROR",
            "text": {"runs": [{"text": "The playlist does not exist."}]}
        }}]});
        assert!(matches!(check_alerts(&data, "PLx"), Err(SourceError::NotFound(id)) if id == "PLx"));
    }

    #[test]
    fn test_alert_for_private_playlist() {
        let data = json!({"alerts": [{"alertRenderer": {
            "type": "ERROR",
            "text": {"simpleText": "This playlist is private."}
        }}]});
        assert!(matches!(check_alerts(&data, "PLx"), Err(SourceError::Unavailable(_))));
    }

    #[test]
    fn test_info_alert_on_valid_playlist_is_ignored() {
        let data = json!({
            "alerts": [{"alertWithButtonRenderer": {"type": "INFO", "text": {"simpleText": "Unavailable videos are hidden"}}}],
            "metadata": {"playlistMetadataRenderer": {"title": "T"}}
        });
        assert!(check_alerts(&data, "PLx").is_ok());
    }
}
