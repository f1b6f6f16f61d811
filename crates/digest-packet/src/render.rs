use crate::model::PageRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Time label for a page whose timestamp cannot be parsed.
pub const UNKNOWN_TIME: &str = "Unknown time";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Format the wall-clock `HH:MM` carried by an ISO-8601 timestamp.
///
/// Offset timestamps keep their own offset (`Z` is UTC, `+01:00` and
/// `+0100` are both accepted); naive timestamps are taken as-is and a bare
/// date is midnight. Anything else yields [`UNKNOWN_TIME`].
#[must_use]
pub fn format_time_label(timestamp: &str) -> String {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%H:%M").to_string();
    }

    let normalized = match timestamp.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => timestamp.to_string(),
    };

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
    {
        return dt.format("%H:%M").to_string();
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
    {
        return dt.format("%H:%M").to_string();
    }
    if NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").is_ok() {
        return "00:00".to_string();
    }
    UNKNOWN_TIME.to_string()
}

/// First `max_chars` characters of `content`, never splitting a code point.
#[must_use]
pub fn clip_content(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// Render one page as a browsing-log block.
#[must_use]
pub fn format_page_block(page: &PageRecord, max_content_chars: usize) -> String {
    format!(
        "\n---\n[{time}] {title}\nSource: {domain}\nContent: {content}\n",
        time = format_time_label(page.timestamp()),
        title = page.title(),
        domain = page.domain(),
        content = clip_content(page.content(), max_content_chars),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_label_utc() {
        assert_eq!(format_time_label("2025-01-19T09:00:00Z"), "09:00");
        assert_eq!(format_time_label("2025-01-19T23:59:59.123Z"), "23:59");
    }

    #[test]
    fn test_time_label_keeps_offset() {
        assert_eq!(format_time_label("2025-01-19T19:45:00+01:00"), "19:45");
    }

    #[test]
    fn test_time_label_naive() {
        assert_eq!(format_time_label("2025-01-19T07:05:00"), "07:05");
        assert_eq!(format_time_label("2025-01-19T07:05"), "07:05");
        assert_eq!(format_time_label("2025-01-19 07:05:00.5"), "07:05");
    }

    #[test]
    fn test_time_label_minutes_with_offset() {
        assert_eq!(format_time_label("2025-01-19T09:00Z"), "09:00");
        assert_eq!(format_time_label("2025-01-19T09:00+01:00"), "09:00");
        assert_eq!(format_time_label("2025-01-19 09:00-05:00"), "09:00");
    }

    #[test]
    fn test_time_label_offset_without_colon() {
        assert_eq!(format_time_label("2025-01-19T09:00:00+0100"), "09:00");
        assert_eq!(format_time_label("2025-01-19T09:00:00.250+0530"), "09:00");
    }

    #[test]
    fn test_time_label_date_only_is_midnight() {
        assert_eq!(format_time_label("2025-01-19"), "00:00");
    }

    #[test]
    fn test_time_label_unparsable() {
        assert_eq!(format_time_label(""), UNKNOWN_TIME);
        assert_eq!(format_time_label("yesterday"), UNKNOWN_TIME);
        assert_eq!(format_time_label("2025-13-40T99:00:00Z"), UNKNOWN_TIME);
    }

    #[test]
    fn test_clip_content() {
        assert_eq!(clip_content("hello", 10), "hello");
        assert_eq!(clip_content("hello", 5), "hello");
        assert_eq!(clip_content("hello", 2), "he");
        assert_eq!(clip_content("hello", 0), "");
    }

    #[test]
    fn test_clip_content_counts_characters_not_bytes() {
        let text = "日本語のテキスト";
        assert_eq!(clip_content(text, 3), "日本語");
        assert_eq!(clip_content("café au lait", 4), "café");
    }

    #[test]
    fn test_page_block_layout() {
        let page = PageRecord {
            title: Some("A".into()),
            domain: Some("x.com".into()),
            content: Some("hello".into()),
            timestamp: Some("2025-01-19T09:00:00Z".into()),
            ..PageRecord::default()
        };
        assert_eq!(
            format_page_block(&page, 1000),
            "\n---\n[09:00] A\nSource: x.com\nContent: hello\n"
        );
    }

    #[test]
    fn test_page_block_defaults() {
        let block = format_page_block(&PageRecord::default(), 1000);
        assert_eq!(
            block,
            "\n---\n[Unknown time] Untitled\nSource: Unknown\nContent: \n"
        );
    }
}
