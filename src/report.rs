//! Markdown digest report.

use camino::Utf8Path;
use chrono::{DateTime, Local};
use digest_packet::DigestStats;
use std::path::{Path, PathBuf};

use crate::DigestError;
use digest_utils::atomic_write::write_file_atomic;

/// Characters of the digest shown after a successful run.
pub const PREVIEW_CHARS: usize = 500;

/// Render the digest report: a fixed header followed by the model's text.
#[must_use]
pub fn render_digest_report(
    date: &str,
    stats: &DigestStats,
    digest: &str,
    generated_at: DateTime<Local>,
) -> String {
    format!(
        "# 📚 Browsing Digest - {date}

**Generated**: {generated}
**Pages analyzed**: {pages}
**Estimated reading time**: {minutes} minutes

---

{digest}

---

*Generated locally using Ollama. No data left your machine.*
",
        generated = generated_at.format("%Y-%m-%d %H:%M"),
        pages = stats.total_pages,
        minutes = stats.total_reading_time,
    )
}

/// `digest-{date}.md` in the current directory.
///
/// Path separators in the date are replaced so the report never lands in
/// another directory.
#[must_use]
pub fn default_output_path(date: &str) -> PathBuf {
    let safe: String = date
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    PathBuf::from(format!("digest-{safe}.md"))
}

/// Atomically write `report` to `path`.
pub fn write_digest_report(path: &Path, report: &str) -> Result<(), DigestError> {
    let utf8 = Utf8Path::from_path(path).ok_or_else(|| DigestError::ReportWrite {
        path: path.display().to_string(),
        reason: "path is not valid UTF-8".to_string(),
    })?;

    let result = write_file_atomic(utf8, report).map_err(|e| DigestError::ReportWrite {
        path: utf8.to_string(),
        reason: format!("{e:#}"),
    })?;
    for warning in &result.warnings {
        tracing::warn!(path = %utf8, "{warning}");
    }
    tracing::info!(path = %utf8, bytes = result.bytes_written, "digest written");
    Ok(())
}

/// First [`PREVIEW_CHARS`] characters of `digest`, with `...` when cut.
#[must_use]
pub fn preview(digest: &str) -> String {
    match digest.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &digest[..idx]),
        None => digest.to_string(),
    }
}
