//! Source text intake: turns an uploaded resume file into plain text.
//!
//! Each supported source format is served by one `TextExtractor` held in an
//! `ExtractorRegistry`. A format with no registered extractor fails fast with
//! `UnavailableCapability`; nothing probes for alternatives at runtime.

pub mod docx_text;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

pub use docx_text::DocxTextExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    PlainText,
    Docx,
}

impl SourceFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Result<Self, IntakeError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".txt") {
            Ok(SourceFormat::PlainText)
        } else if lower.ends_with(".docx") {
            Ok(SourceFormat::Docx)
        } else {
            Err(IntakeError::UnsupportedSourceFormat(file_name.to_string()))
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::PlainText => f.write_str("plain text"),
            SourceFormat::Docx => f.write_str("docx"),
        }
    }
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Unsupported file type '{0}': upload a .docx or .txt file")]
    UnsupportedSourceFormat(String),

    #[error("No text extractor is available for {0} files")]
    UnavailableCapability(SourceFormat),

    #[error("Could not read file: {0}")]
    Malformed(String),

    #[error("Could not extract any text from the file")]
    EmptyExtraction,
}

/// Capability interface for pulling plain text out of one source format.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IntakeError>;
}

/// UTF-8 text, decoded lossily. A leading byte-order mark is dropped.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IntakeError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(text.trim_start_matches('\u{FEFF}').to_string())
    }
}

#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<SourceFormat, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Plain text always; docx only when `enable_docx` is set.
    pub fn with_defaults(enable_docx: bool) -> Self {
        let registry = Self::default().register(SourceFormat::PlainText, Arc::new(PlainTextExtractor));
        if enable_docx {
            registry.register(SourceFormat::Docx, Arc::new(DocxTextExtractor::default()))
        } else {
            registry
        }
    }

    pub fn register(mut self, format: SourceFormat, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractors.insert(format, extractor);
        self
    }

    pub fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<String, IntakeError> {
        let format = SourceFormat::from_file_name(file_name)?;
        let extractor = self
            .extractors
            .get(&format)
            .ok_or(IntakeError::UnavailableCapability(format))?;

        let text = extractor.extract_text(bytes)?;
        if text.trim().is_empty() {
            return Err(IntakeError::EmptyExtraction);
        }
        tracing::debug!(%format, chars = text.len(), "extracted source text");
        Ok(text)
    }
}
