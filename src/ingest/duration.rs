//! Compact duration normalization.
//!
//! The structured API reports durations as `PT#H#M#S` (any subset of the
//! three components, whole numbers only). Everything past the adapters works
//! in seconds.

use std::sync::LazyLock;

use regex::Regex;

static COMPACT_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration pattern")
});

/// Convert a `PT#H#M#S` duration into whole seconds.
///
/// Missing, empty or malformed input yields 0: a video without usable
/// duration metadata must not abort the import it belongs to.
pub fn to_seconds(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };

    let Some(caps) = COMPACT_DURATION.captures(raw) else {
        tracing::trace!(raw, "Unrecognized duration format");
        return 0;
    };

    let component = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let (Some(hours), Some(minutes), Some(seconds)) = (component(1), component(2), component(3))
    else {
        return 0;
    };

    let total = hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds);
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Render seconds in the compact form, omitting zero components.
pub fn to_compact(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 || total_seconds == 0 {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_duration() {
        assert_eq!(to_seconds(Some("PT1H2M3S")), 3723);
    }

    #[test]
    fn test_partial_durations() {
        assert_eq!(to_seconds(Some("PT15M")), 900);
        assert_eq!(to_seconds(Some("PT45S")), 45);
        assert_eq!(to_seconds(Some("PT2H")), 7200);
        assert_eq!(to_seconds(Some("PT1H30S")), 3630);
        assert_eq!(to_seconds(Some("PT0S")), 0);
    }

    #[test]
    fn test_bad_input_is_zero() {
        assert_eq!(to_seconds(None), 0);
        assert_eq!(to_seconds(Some("")), 0);
        assert_eq!(to_seconds(Some("   ")), 0);
        assert_eq!(to_seconds(Some("12:34")), 0);
        assert_eq!(to_seconds(Some("P1DT2H")), 0);
        assert_eq!(to_seconds(Some("PT1.5S")), 0);
        assert_eq!(to_seconds(Some("PT-5M")), 0);
    }

    #[test]
    fn test_to_compact() {
        assert_eq!(to_compact(0), "PT0S");
        assert_eq!(to_compact(3723), "PT1H2M3S");
        assert_eq!(to_compact(600), "PT10M");
    }

    proptest! {
        #[test]
        fn prop_grammar_round_trip(h in 0u32..200, m in 0u32..60, s in 0u32..60) {
            let raw = format!("PT{h}H{m}M{s}S");
            prop_assert_eq!(to_seconds(Some(&raw)), h * 3600 + m * 60 + s);
        }

        #[test]
        fn prop_components_may_be_omitted(m in 0u32..10_000, s in 0u32..10_000) {
            let raw = format!("PT{m}M{s}S");
            prop_assert_eq!(to_seconds(Some(&raw)), m * 60 + s);
        }

        #[test]
        fn prop_compact_round_trip(total in 0u32..1_000_000) {
            prop_assert_eq!(to_seconds(Some(&to_compact(total))), total);
        }

        #[test]
        fn prop_strings_without_prefix_are_zero(raw in "[0-9HMS:. ]{0,12}") {
            prop_assert_eq!(to_seconds(Some(&raw)), 0);
        }
    }
}
