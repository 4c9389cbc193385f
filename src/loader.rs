use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

const PLAIN_TEXT: &[&str] = &["txt", "text", "md"];

/// Decoded text ready for analysis, named after the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub name: String,
    pub text: String,
}

/// Read a plain-text announcement. PDF and word-processor files are rejected;
/// convert them to text first.
pub fn load(path: &Path) -> Result<LoadedDocument, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !PLAIN_TEXT.contains(&extension.as_str()) {
        return Err(LoadError::Unsupported { path: path.to_path_buf(), extension });
    }

    let bytes = std::fs::read(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let raw = String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8 { path: path.to_path_buf() })?;
    let text = raw.trim_start_matches('\u{feff}').replace("\r\n", "\n");

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(path = %path.display(), bytes = text.len(), "loaded document");

    Ok(LoadedDocument { name, text })
}
