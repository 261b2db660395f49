//! Word-Package Serializer: renders a `BlockSequence` as a `.docx` package.
//!
//! The package holds the minimum parts a word processor needs: content types,
//! the package relationship, and one `word/document.xml` with a single section.
//! Every zip entry carries the same fixed timestamp so output is byte-stable.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::document::model::{Alignment, Block, BlockContent, BlockSequence};
use crate::document::{ExportError, ExportFormat};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

// A4 with 1" margins, in twentieths of a point.
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#;

const DOCUMENT_CLOSE: &str = "</w:body></w:document>";

/// Serializes the sequence into `.docx` bytes. Fails as a whole or not at all.
pub fn write_docx(doc: &BlockSequence) -> Result<Vec<u8>, ExportError> {
    let document_xml = document_xml(doc);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let parts: [(&str, &str); 4] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("word/document.xml", &document_xml),
    ];
    for (name, body) in parts {
        zip.start_file(name, options).map_err(fail)?;
        zip.write_all(body.as_bytes()).map_err(fail)?;
    }

    let cursor = zip.finish().map_err(fail)?;
    Ok(cursor.into_inner())
}

fn fail(e: impl std::fmt::Display) -> ExportError {
    ExportError::serialization(ExportFormat::Docx, e)
}

/// Builds `word/document.xml` for the sequence.
pub(crate) fn document_xml(doc: &BlockSequence) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);
    for block in &doc.blocks {
        write_paragraph(&mut xml, block);
    }
    xml.push_str(SECTION_PROPERTIES);
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

fn write_paragraph(xml: &mut String, block: &Block) {
    let text = match &block.content {
        BlockContent::BlankLine => {
            xml.push_str("<w:p/>");
            return;
        }
        BlockContent::SectionHeading(t) => t.to_uppercase(),
        BlockContent::NameHeader(t) | BlockContent::Subtitle(t) | BlockContent::BodyLine(t) => {
            t.clone()
        }
    };
    let style = &block.style;

    xml.push_str("<w:p><w:pPr>");
    xml.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        style.spacing.before, style.spacing.after
    ));
    if style.alignment == Alignment::Center {
        xml.push_str(r#"<w:jc w:val="center"/>"#);
    }
    xml.push_str("</w:pPr><w:r><w:rPr>");
    if style.bold {
        xml.push_str("<w:b/><w:bCs/>");
    }
    if let Some(color) = style.color {
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, color.to_hex()));
    }
    xml.push_str(&format!(
        r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
        style.font_size
    ));
    xml.push_str("</w:rPr>");
    for (i, segment) in xml_safe(&text).split('\t').enumerate() {
        if i > 0 {
            xml.push_str("<w:tab/>");
        }
        if !segment.is_empty() {
            xml.push_str(r#"<w:t xml:space="preserve">"#);
            xml.push_str(&escape(segment));
            xml.push_str("</w:t>");
        }
    }
    xml.push_str("</w:r></w:p>");
}

/// Drops characters XML 1.0 cannot carry: controls other than tab, and the
/// noncharacters U+FFFE and U+FFFF.
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|c| match c {
            '\t' => true,
            '\u{FFFE}' | '\u{FFFF}' => false,
            c => !c.is_control(),
        })
        .collect()
}
