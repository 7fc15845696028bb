//! Text extraction. Turns an uploaded resume document into raw text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`. Production uses
//! `PdfTextExtractor`; an empty extraction is a failure, never passed on to
//! the analysis pipeline.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("Document contains no extractable text")]
    Empty,

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Synchronous, CPU-bound extraction. Call through `extract_document_text`
/// so it runs on the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, document: &[u8]) -> Result<String, ExtractionError>;
}

/// Extracts text from searchable PDFs with `pdf-extract`.
///
/// The upload is spooled to a temp file inside `upload_dir`; the file is
/// removed when the guard drops, on success, error or panic alike.
pub struct PdfTextExtractor {
    upload_dir: PathBuf,
}

impl PdfTextExtractor {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, document: &[u8]) -> Result<String, ExtractionError> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile_in(&self.upload_dir)?;
        file.write_all(document)?;
        file.flush()?;

        debug!("Extracting text from {}", file.path().display());
        let text = pdf_extract::extract_text(file.path())
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        non_empty(text)
    }
}

fn non_empty(text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        Err(ExtractionError::Empty)
    } else {
        Ok(text)
    }
}

/// Runs `extractor` on the blocking thread pool.
/// A panic inside the extractor surfaces as `ExtractionError::Task`.
pub async fn extract_document_text(
    extractor: Arc<dyn TextExtractor>,
    document: Bytes,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extractor.extract_text(&document)).await?
}

/// Treats the upload as UTF-8 text. Lets router tests skip real PDFs.
#[cfg(test)]
pub(crate) struct PlainTextExtractor;

#[cfg(test)]
impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, document: &[u8]) -> Result<String, ExtractionError> {
        let text = String::from_utf8(document.to_vec())
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
        non_empty(text)
    }
}
