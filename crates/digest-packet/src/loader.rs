use crate::model::DigestRequest;
use digest_utils::error::InputError;
use std::path::Path;
use tracing::debug;

/// Load a browsing export from `path`.
///
/// The file must exist and carry a `.json` extension; its content must be a
/// JSON object shaped like [`DigestRequest`]. An empty `pages` list is
/// accepted here and rejected by the caller.
pub fn load_digest_request(path: &Path) -> Result<DigestRequest, InputError> {
    let shown = path.display().to_string();

    if !path.exists() {
        return Err(InputError::NotFound { path: shown });
    }

    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        return Err(InputError::WrongExtension {
            path: shown,
            extension,
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| InputError::Unreadable {
        path: shown.clone(),
        reason: e.to_string(),
    })?;

    let request = parse_digest_request(&text).map_err(|reason| InputError::InvalidJson {
        path: shown.clone(),
        reason,
    })?;

    debug!(
        path = %shown,
        pages = request.pages.len(),
        date = %request.date(),
        "loaded browsing export"
    );
    Ok(request)
}

/// Parse export text, returning the serde error message on failure.
pub fn parse_digest_request(text: &str) -> Result<DigestRequest, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}
