use serde::{Deserialize, Serialize};

/// Title used for a page exported without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Domain used for a page exported without one.
pub const DEFAULT_DOMAIN: &str = "Unknown";

/// Date used for an export without a `date` field.
pub const DEFAULT_DATE: &str = "Unknown date";

/// One visited page, as written by the browser-history exporter.
///
/// Every field is optional on the wire; the accessors apply defaults.
/// Other exporter fields, such as `url`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Estimated reading time in minutes.
    #[serde(default, rename = "readingTime", skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u64>,
}

impl PageRecord {
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(DEFAULT_DOMAIN)
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Timestamp used for ordering; a missing timestamp sorts first.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        self.timestamp.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn reading_time(&self) -> u64 {
        self.reading_time.unwrap_or(0)
    }
}

/// A day's browsing export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
    #[serde(default, rename = "totalPages", skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

impl DigestRequest {
    #[must_use]
    pub fn date(&self) -> &str {
        self.date.as_deref().unwrap_or(DEFAULT_DATE)
    }

    /// Page count reported by the exporter, or the number of pages present.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_pages.unwrap_or(self.pages.len() as u64)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Header statistics for the digest report.
    ///
    /// Reading time covers every exported page, including pages the budgeter
    /// later leaves out of the prompt.
    #[must_use]
    pub fn stats(&self) -> DigestStats {
        DigestStats {
            total_pages: self.total_pages(),
            total_reading_time: self.pages.iter().map(PageRecord::reading_time).sum(),
        }
    }
}

/// Figures printed in the digest header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestStats {
    pub total_pages: u64,
    /// Minutes.
    pub total_reading_time: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_defaults() {
        let page: PageRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page.title(), "Untitled");
        assert_eq!(page.domain(), "Unknown");
        assert_eq!(page.content(), "");
        assert_eq!(page.timestamp(), "");
        assert_eq!(page.reading_time(), 0);
    }

    #[test]
    fn test_page_wire_names() {
        let page: PageRecord = serde_json::from_value(json!({
            "title": "Rust book",
            "domain": "doc.rust-lang.org",
            "timestamp": "2025-01-15T14:05:00Z",
            "readingTime": 7,
            "url": "https://doc.rust-lang.org/book/",
            "favicon": "ignored"
        }))
        .unwrap();
        assert_eq!(page.title(), "Rust book");
        assert_eq!(page.reading_time(), 7);

        let back = serde_json::to_value(&page).unwrap();
        assert_eq!(back["readingTime"], 7);
        assert!(back.get("content").is_none());
        assert!(back.get("url").is_none());
    }

    #[test]
    fn test_request_defaults() {
        let request: DigestRequest =
            serde_json::from_value(json!({ "pages": [{}, {}] })).unwrap();
        assert_eq!(request.date(), "Unknown date");
        assert_eq!(request.total_pages(), 2);
        assert!(!request.is_empty());
    }

    #[test]
    fn test_stats_sum_reading_time_over_all_pages() {
        let request: DigestRequest = serde_json::from_value(json!({
            "date": "2025-01-15",
            "totalPages": 42,
            "pages": [
                { "readingTime": 3 },
                { "readingTime": 5 },
                { "title": "no reading time" }
            ]
        }))
        .unwrap();

        let stats = request.stats();
        assert_eq!(stats.total_pages, 42);
        assert_eq!(stats.total_reading_time, 8);
    }
}
