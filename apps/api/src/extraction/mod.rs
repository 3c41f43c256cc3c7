//! Uploaded document → plain text.
//!
//! Never fails: a structured parser is tried first (PDF, DOCX), then the raw
//! bytes decoded as UTF-8 (invalid sequences replaced), and finally [`EXTRACTION_FAILED`] is returned so downstream
//! analysis always has something to work with.
//! CPU-bound; call it through `tokio::task::spawn_blocking`.

pub mod docx;

use std::borrow::Cow;
use std::panic::{catch_unwind, AssertUnwindSafe};

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub const EXTRACTION_FAILED: &str =
    "Extraction failed; content may be unreadable. Please provide a text-friendly file.";

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    /// MIME type sent to the model alongside the attachment.
    pub fn mime_type(&self) -> &str {
        if self.content_type.trim().is_empty() {
            "application/octet-stream"
        } else {
            &self.content_type
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("extractor panicked")]
    Panicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn detect(content_type: &str, filename: &str) -> Option<Self> {
        let mime = content_type.to_ascii_lowercase();
        let name = filename.to_ascii_lowercase();
        if mime.contains("pdf") || name.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if mime.contains("word") || mime.contains("officedocument") || name.ends_with(".docx")
        {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }

    fn extract(self, bytes: &[u8]) -> Result<String, ExtractError> {
        // pdf-extract panics on some malformed inputs
        let outcome = catch_unwind(AssertUnwindSafe(|| match self {
            DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| ExtractError::Pdf(e.to_string())),
            DocumentFormat::Docx => docx::extract_docx_text(bytes),
        }));
        outcome.unwrap_or(Err(ExtractError::Panicked))
    }
}

pub fn extract_text(doc: &UploadedDocument) -> String {
    if let Some(format) = DocumentFormat::detect(&doc.content_type, &doc.filename) {
        match format.extract(&doc.bytes) {
            Ok(text) if !text.trim().is_empty() => return text,
            Ok(_) => debug!(
                "{format:?} extractor found no text in '{}', trying raw bytes",
                doc.filename
            ),
            Err(e) => {
                warn!("Extraction failed for '{}': {e}", doc.filename);
                return EXTRACTION_FAILED.to_string();
            }
        }
    }

    let text = String::from_utf8_lossy(&doc.bytes);
    if let Cow::Owned(_) = text {
        debug!("'{}' has invalid UTF-8 sequences, replaced them", doc.filename);
    }
    if text.trim().is_empty() {
        EXTRACTION_FAILED.to_string()
    } else {
        text.into_owned()
    }
}
