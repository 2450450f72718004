//! Playlist reference parsing.
//!
//! Users paste either a bare playlist ID or a URL carrying `list=<ID>`.
//! The parsed ID is the only key used for both deduplication and fetching.

const LIST_PARAM: &str = "list=";

/// Extract the playlist ID from a user-supplied reference.
///
/// Takes the value of the `list` query parameter, up to the next `&` (or
/// the end of the string). `list=` only counts at the start of the
/// reference or right after `?` or `&`, so `playlist=` never matches. A
/// reference without it is already an ID.
pub fn parse_playlist_id(reference: &str) -> &str {
    let reference = reference.trim();
    let value_start = reference
        .match_indices(LIST_PARAM)
        .map(|(index, _)| index)
        .find(|&index| index == 0 || matches!(reference.as_bytes()[index - 1], b'?' | b'&'));

    match value_start {
        Some(index) => {
            let rest = &reference[index + LIST_PARAM.len()..];
            rest.split('&').next().unwrap_or(rest)
        }
        None => reference,
    }
}
