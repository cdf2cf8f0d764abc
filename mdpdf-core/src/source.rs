//! Source documents and decoding

use crate::error::ConvertError;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// A source document: its text plus the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// File name without its extension, used as the last-resort title.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Read and decode a source document.
pub fn read_source(path: &Path) -> Result<SourceDocument, ConvertError> {
    let bytes = fs::read(path).map_err(|e| ConvertError::InputInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let text = decode_text(&bytes);
    if let Cow::Owned(_) = &text {
        log::debug!("Decoded {} with a non UTF-8 fallback", path.display());
    }
    Ok(SourceDocument::new(path, text.into_owned()))
}

/// Decode bytes as UTF-8 (BOM stripped), falling back to Windows-1252.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
