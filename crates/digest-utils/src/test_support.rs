//! Fixtures shared by unit and integration tests.

use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Check whether tests against a real local Ollama install should run.
///
/// `BROWSING_DIGEST_SKIP_OLLAMA_TESTS=1` always disables them.
/// `BROWSING_DIGEST_REAL_OLLAMA_TESTS=1` enables them.
#[must_use]
pub fn real_ollama_tests_enabled() -> bool {
    let flag = |name: &str| {
        std::env::var(name)
            .ok()
            .is_some_and(|value| value == "1" || value.eq_ignore_ascii_case("true"))
    };
    if flag("BROWSING_DIGEST_SKIP_OLLAMA_TESTS") {
        return false;
    }
    flag("BROWSING_DIGEST_REAL_OLLAMA_TESTS")
}

/// One page entry as the browser extension exports it.
#[must_use]
pub fn page(title: &str, domain: &str, timestamp: &str, content: &str, reading_time: u64) -> Value {
    json!({
        "title": title,
        "domain": domain,
        "url": format!("https://{domain}/"),
        "timestamp": timestamp,
        "content": content,
        "readingTime": reading_time,
    })
}

/// A realistic three-page export for 2025-01-15, deliberately out of order.
#[must_use]
pub fn sample_export() -> Value {
    json!({
        "date": "2025-01-15",
        "totalPages": 3,
        "pages": [
            page(
                "Understanding Rust lifetimes",
                "doc.rust-lang.org",
                "2025-01-15T14:05:00Z",
                "Lifetimes ensure references are valid for as long as they are used.",
                4,
            ),
            page(
                "Morning news roundup",
                "news.example.com",
                "2025-01-15T08:30:00Z",
                "Markets opened higher; a storm is expected over the weekend.",
                2,
            ),
            page(
                "Sourdough starter guide",
                "bread.example.org",
                "2025-01-15T19:45:00+01:00",
                "Feed the starter twice a day and keep it somewhere warm.",
                3,
            ),
        ],
    })
}

/// An export whose `pages` list is empty.
#[must_use]
pub fn empty_export() -> Value {
    json!({ "date": "2025-01-15", "pages": [], "totalPages": 0 })
}

/// An export with `count` pages, each carrying `content_len` characters of content.
#[must_use]
pub fn export_with_pages(count: usize, content_len: usize) -> Value {
    let pages: Vec<Value> = (0..count)
        .map(|i| {
            page(
                &format!("Page {i}"),
                "example.com",
                &format!("2025-01-15T{:02}:{:02}:00Z", (i / 60) % 24, i % 60),
                &"x".repeat(content_len),
                1,
            )
        })
        .collect();
    json!({ "date": "2025-01-15", "pages": pages, "totalPages": count })
}

/// Write `export` as pretty JSON to `dir/name` and return the path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_export(dir: &Path, name: &str, export: &Value) -> PathBuf {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(export).expect("serialize export fixture");
    std::fs::write(&path, text).expect("write export fixture");
    path
}
