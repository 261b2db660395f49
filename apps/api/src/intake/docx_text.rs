//! Raw text extraction from `.docx` packages.
//!
//! Reads `word/document.xml` and emits one line per `w:p`. Runs inside a
//! paragraph are concatenated; `w:tab` becomes a tab and `w:br` a line break.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::intake::{IntakeError, TextExtractor};

/// Upper bound on the decompressed size of `word/document.xml`.
/// The upload limit only bounds the compressed package.
pub const DEFAULT_MAX_DOCUMENT_XML_BYTES: u64 = 16 * 1024 * 1024;

pub struct DocxTextExtractor {
    max_document_bytes: u64,
}

impl DocxTextExtractor {
    pub fn with_limit(max_document_bytes: u64) -> Self {
        Self { max_document_bytes }
    }

    fn too_large(&self) -> IntakeError {
        IntakeError::Malformed(format!(
            "word/document.xml exceeds {} bytes when decompressed",
            self.max_document_bytes
        ))
    }
}

impl Default for DocxTextExtractor {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_DOCUMENT_XML_BYTES)
    }
}

impl TextExtractor for DocxTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IntakeError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| IntakeError::Malformed(format!("not a docx package: {e}")))?;

        let file = archive
            .by_name("word/document.xml")
            .map_err(|e| IntakeError::Malformed(format!("missing word/document.xml: {e}")))?;
        if file.size() > self.max_document_bytes {
            return Err(self.too_large());
        }

        // The declared size can lie; never read past the limit.
        let mut xml = String::new();
        file.take(self.max_document_bytes + 1)
            .read_to_string(&mut xml)
            .map_err(|e| IntakeError::Malformed(format!("unreadable word/document.xml: {e}")))?;
        if xml.len() as u64 > self.max_document_bytes {
            return Err(self.too_large());
        }

        document_text(&xml)
    }
}

fn document_text(xml: &str) -> Result<String, IntakeError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" | b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| IntakeError::Malformed(format!("bad text node: {e}")))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(IntakeError::Malformed(format!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::classifier::DocumentKind;
    use crate::document::docx::write_docx;
    use crate::document::model::build_document;
    use crate::document::style::TemplateId;

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C &amp; D</w:t></w:r></w:p>
        </w:body></w:document>"#;
        assert_eq!(document_text(xml).unwrap(), "Jane Doe\n\nA\tB\nC & D");
    }

    #[test]
    fn test_whitespace_between_elements_is_ignored() {
        let xml = "<w:p>\n  <w:r>\n    <w:t>Skills</w:t>\n  </w:r>\n</w:p>";
        assert_eq!(document_text(xml).unwrap(), "Skills");
    }

    #[test]
    fn test_reads_back_exported_package() {
        let doc = build_document(
            "Jane Doe\nEngineer\n\nSkills:\nRust, Go",
            DocumentKind::Resume,
            TemplateId::Modern,
        );
        let bytes = write_docx(&doc).unwrap();
        let text = DocxTextExtractor::default().extract_text(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nEngineer\n\nSKILLS\nRust, Go");
    }

    fn package_with_document_xml(xml: &[u8]) -> Vec<u8> {
        use std::io::Write;
        use zip::write::SimpleFileOptions;
        use zip::{CompressionMethod, ZipWriter};

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_oversized_document_xml_is_rejected() {
        // 4 MiB of whitespace deflates to a few KiB.
        let bytes = package_with_document_xml(&vec![b' '; 4 * 1024 * 1024]);
        assert!(bytes.len() < 64 * 1024);

        let err = DocxTextExtractor::with_limit(64 * 1024)
            .extract_text(&bytes)
            .unwrap_err();
        match err {
            IntakeError::Malformed(msg) => assert!(msg.contains("exceeds 65536 bytes"), "{msg}"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_document_xml_within_limit_is_read() {
        let xml = br#"<w:document xmlns:w="x"><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p></w:body></w:document>"#;
        let bytes = package_with_document_xml(xml);
        let text = DocxTextExtractor::with_limit(xml.len() as u64)
            .extract_text(&bytes)
            .unwrap();
        assert_eq!(text, "Jane Doe");
    }

    #[test]
    fn test_non_zip_input_is_malformed() {
        assert!(matches!(
            DocxTextExtractor::default().extract_text(b"plain text, not a zip"),
            Err(IntakeError::Malformed(_))
        ));
    }
}
