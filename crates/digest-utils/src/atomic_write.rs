//! Atomic file writes for digest reports.
//!
//! A digest is written to a sibling temporary file, fsynced, and then
//! renamed over the target. A reader never observes a half-written report,
//! and an interrupted run leaves any previous digest for the same date intact.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(target_os = "windows")]
use std::{thread, time::Duration};

/// Outcome of [`write_file_atomic`].
#[derive(Debug, Clone, Default)]
pub struct AtomicWriteResult {
    /// Bytes written after line-ending normalization
    pub bytes_written: usize,
    /// Number of rename retries (Windows only)
    pub rename_retry_count: u32,
    /// Warnings worth surfacing in verbose logs
    pub warnings: Vec<String>,
}

/// Atomically write UTF-8 `content` to `path` with LF line endings.
///
/// Missing parent directories are created.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<AtomicWriteResult> {
    let normalized = normalize_line_endings(content);

    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {dir}"))?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {dir}"))?;
    temp_file
        .write_all(normalized.as_bytes())
        .context("Failed to write temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to fsync temporary file")?;

    let rename_retry_count = persist(temp_file, path.as_std_path())
        .with_context(|| format!("Failed to atomically write file: {path}"))?;

    let mut result = AtomicWriteResult {
        bytes_written: normalized.len(),
        rename_retry_count,
        warnings: Vec::new(),
    };
    if rename_retry_count > 0 {
        result.warnings.push(format!(
            "Rename required {rename_retry_count} retries due to transient file locks"
        ));
    }

    tracing::debug!(path = %path, bytes = result.bytes_written, "wrote file atomically");
    Ok(result)
}

/// CRLF becomes LF. A lone CR is content and is kept.
fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

/// Rename the temp file over `target`, retrying briefly while another
/// process (an editor, an indexer) holds the old file open.
#[cfg(target_os = "windows")]
fn persist(mut temp_file: NamedTempFile, target: &Path) -> Result<u32> {
    use std::io::ErrorKind;

    const MAX_RETRIES: u32 = 5;
    const INITIAL_DELAY_MS: u64 = 10;

    let mut retry_count = 0;
    loop {
        match temp_file.persist(target) {
            Ok(_) => return Ok(retry_count),
            Err(err) => {
                let retryable = matches!(err.error.kind(), ErrorKind::PermissionDenied);
                if !retryable || retry_count >= MAX_RETRIES {
                    return Err(anyhow::anyhow!(err.error));
                }
                thread::sleep(Duration::from_millis(INITIAL_DELAY_MS << retry_count));
                retry_count += 1;
                temp_file = err.file;
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn persist(temp_file: NamedTempFile, target: &Path) -> Result<u32> {
    temp_file
        .persist(target)
        .map(|_| 0)
        .map_err(|e| anyhow::anyhow!(e.error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn utf8_dir(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\nc\r\n"), "a\nb\nc\n");
        assert_eq!(normalize_line_endings("plain"), "plain");
    }

    #[test]
    fn test_lone_carriage_return_is_kept() {
        assert_eq!(
            normalize_line_endings("line1\r\nprogress\rdone"),
            "line1\nprogress\rdone"
        );
    }

    #[test]
    fn test_write_creates_file_and_parent() {
        let temp = TempDir::new().unwrap();
        let path = utf8_dir(&temp).join("reports/2025-01-15/digest.md");

        let result = write_file_atomic(&path, "# Digest\r\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# Digest\n");
        assert_eq!(result.bytes_written, "# Digest\n".len());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = utf8_dir(&temp).join("digest.md");

        write_file_atomic(&path, "old").unwrap();
        write_file_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let dir = utf8_dir(&temp);
        write_file_atomic(&dir.join("digest.md"), "content").unwrap();

        let names: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["digest.md".to_string()]);
    }

    #[test]
    fn test_write_unicode_content() {
        let temp = TempDir::new().unwrap();
        let path = utf8_dir(&temp).join("digest.md");
        let content = "Résumé of today: 日本語の記事, café ☕";

        write_file_atomic(&path, content).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_write_into_directory_path_fails() {
        let temp = TempDir::new().unwrap();
        let dir = utf8_dir(&temp);
        fs::create_dir(dir.join("taken")).unwrap();

        assert!(write_file_atomic(&dir.join("taken"), "x").is_err());
    }
}
