// Document export pipeline.
// text → segmenter → classifier → model (BlockSequence) → docx | pdf.
// Pure and synchronous: callers on the async runtime wrap `export` in spawn_blocking.

pub mod classifier;
pub mod docx;
pub mod font_metrics;
pub mod model;
pub mod pdf;
pub mod segmenter;
pub mod style;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classifier::DocumentKind;
pub use model::build_document;
pub use pdf::PageGeometry;
pub use style::{template_meta, TemplateId, TemplateMeta};

/// Output format: the word-package (`.docx`) or the page format (`.pdf`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {format} document: {message}")]
    Serialization {
        format: ExportFormat,
        message: String,
    },
}

impl ExportError {
    pub fn serialization(format: ExportFormat, message: impl fmt::Display) -> Self {
        ExportError::Serialization {
            format,
            message: message.to_string(),
        }
    }
}

/// Finished artifact: bytes plus what a caller needs to offer it as a download.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}

/// `tailored-resume-<template>.<ext>` or `cover-letter-<template>.<ext>`.
pub fn artifact_file_name(kind: DocumentKind, template: TemplateId, format: ExportFormat) -> String {
    let stem = match kind {
        DocumentKind::Resume => "tailored-resume",
        DocumentKind::CoverLetter => "cover-letter",
    };
    format!("{stem}-{}.{}", template.as_str(), format.extension())
}

/// Builds a fresh `BlockSequence` from the inputs and serializes it in `format`.
pub fn export(
    raw_text: &str,
    kind: DocumentKind,
    template: TemplateId,
    format: ExportFormat,
    geometry: &PageGeometry,
) -> Result<ExportedDocument, ExportError> {
    let doc = build_document(raw_text, kind, template);
    let bytes = match format {
        ExportFormat::Docx => docx::write_docx(&doc)?,
        ExportFormat::Pdf => pdf::write_pdf(&doc, geometry)?,
    };

    tracing::info!(
        kind = ?kind,
        template = template.as_str(),
        format = format.extension(),
        blocks = doc.blocks.len(),
        bytes = bytes.len(),
        "document exported"
    );

    Ok(ExportedDocument {
        bytes,
        content_type: format.content_type(),
        file_name: artifact_file_name(kind, template, format),
    })
}
