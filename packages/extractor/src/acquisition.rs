//! Text acquisition: turn a document on disk into plain text.

use std::any::Any;
use std::fs;
use std::panic;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::{ExtractorError, Result};

/// Source of plain document text.
///
/// The pipeline only sees this trait, so tests and callers can plug in
/// sources that do not touch PDF files.
pub trait TextSource {
    /// Extract the full plain text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String>;

    /// Whether this source can read the document at `path`.
    fn supports(&self, path: &Path) -> bool;
}

/// Reads `.pdf` files through `pdf-extract` and `.txt` files as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextSource;

impl FileTextSource {
    pub fn new() -> Self {
        Self
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "PDF parser panicked".to_string()
    }
}

fn read_pdf(path: &Path) -> Result<String> {
    // pdf-extract panics on some malformed files instead of returning an error.
    match panic::catch_unwind(|| pdf_extract::extract_text(path)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(err)) => Err(ExtractorError::acquisition(path, err.to_string())),
        Err(payload) => Err(ExtractorError::acquisition(
            path,
            panic_message(payload.as_ref()),
        )),
    }
}

fn read_plain_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| ExtractorError::acquisition(path, err.to_string()))
}

impl TextSource for FileTextSource {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let raw = match extension_of(path).as_deref() {
            Some("pdf") => read_pdf(path)?,
            Some("txt") => read_plain_text(path)?,
            _ => {
                return Err(ExtractorError::acquisition(
                    path,
                    "unsupported document type",
                ))
            }
        };

        let text = normalize_text(&raw);
        tracing::debug!(path = %path.display(), chars = text.chars().count(), "Extracted text");
        Ok(text)
    }

    fn supports(&self, path: &Path) -> bool {
        matches!(extension_of(path).as_deref(), Some("pdf" | "txt"))
    }
}

/// Normalize extracted text for pattern matching.
///
/// Composes characters to Unicode NFC, so a decomposed `o` + combining acute
/// becomes `ó`, and converts `\r\n` and lone `\r` line endings to `\n`.
///
/// # Examples
/// ```
/// use legal_extractor::acquisition::normalize_text;
///
/// assert_eq!(normalize_text("Resoluci\u{6f}\u{301}n\r\n12"), "Resolución\n12");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .nfc()
        .collect()
}
