//! Page Serializer: renders a `BlockSequence` as a fixed-layout `.pdf`.
//!
//! Layout runs first and produces positioned lines per page; emission then
//! writes them with the base-14 Helvetica faces. Resume name/subtitle blocks
//! are centered using measured widths. Everything else is rejoined into one
//! text blob, wrapped to the content width and drawn left-aligned.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::document::classifier::DocumentKind;
use crate::document::font_metrics::{get_metrics, winansi_code, FontFace};
use crate::document::model::{BlockContent, BlockSequence};
use crate::document::{ExportError, ExportFormat};

pub const MM_TO_PT: f32 = 72.0 / 25.4;

const NAME_ADVANCE_MM: f32 = 8.0;
const SUBTITLE_ADVANCE_MM: f32 = 10.0;
const BODY_OFFSET_MM: f32 = 4.0;
const LINE_HEIGHT_FACTOR: f32 = 1.15;

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed page geometry in points. The bottom margin mirrors the top one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub content_width: f32,
}

impl PageGeometry {
    /// A4 portrait, 20 mm left/top margins, 170 mm text column.
    pub fn a4() -> Self {
        Self {
            page_width: 210.0 * MM_TO_PT,
            page_height: 297.0 * MM_TO_PT,
            margin_left: 20.0 * MM_TO_PT,
            margin_top: 20.0 * MM_TO_PT,
            content_width: 170.0 * MM_TO_PT,
        }
    }

    fn bottom_limit(&self) -> f32 {
        self.page_height - self.margin_top
    }

    fn validate(&self) -> Result<(), ExportError> {
        let ok = self.page_width > 0.0
            && self.page_height > 0.0
            && self.content_width > 0.0
            && self.margin_left >= 0.0
            && self.margin_top >= 0.0
            && self.margin_left + self.content_width <= self.page_width
            && self.margin_top * 2.0 < self.page_height;
        if ok {
            Ok(())
        } else {
            Err(ExportError::serialization(
                ExportFormat::Pdf,
                format!("invalid page geometry: {self:?}"),
            ))
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// One line of text at a fixed position. `y` is the baseline measured from the page top.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub face: FontFace,
    pub size_pt: f32,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Positions every line of the document; returns one entry per page.
pub fn layout_pages(doc: &BlockSequence, geometry: &PageGeometry) -> Vec<Vec<PlacedLine>> {
    let scale = doc.profile.page;
    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut cursor = geometry.margin_top;

    let header_count = doc.blocks.iter().take_while(|b| b.is_header()).count();
    for block in &doc.blocks[..header_count] {
        let (face, size_pt, advance_mm) = match block.content {
            BlockContent::NameHeader(_) => (FontFace::HelveticaBold, scale.name_pt, NAME_ADVANCE_MM),
            _ => (FontFace::Helvetica, scale.subtitle_pt, SUBTITLE_ADVANCE_MM),
        };
        let width = get_metrics(face).text_width_pt(block.text(), size_pt);
        pages[0].push(PlacedLine {
            face,
            size_pt,
            x: (geometry.page_width - width) / 2.0,
            y: cursor,
            text: block.text().to_string(),
        });
        cursor += advance_mm * MM_TO_PT;
    }

    let body_pt = match doc.kind {
        DocumentKind::Resume => {
            cursor += BODY_OFFSET_MM * MM_TO_PT;
            scale.resume_body_pt
        }
        DocumentKind::CoverLetter => scale.letter_body_pt,
    };

    let remaining = doc.blocks[header_count..]
        .iter()
        .map(|b| b.text())
        .collect::<Vec<_>>()
        .join("\n");
    let wrapped = get_metrics(FontFace::Helvetica).wrap_text(&remaining, body_pt, geometry.content_width);
    let line_height = body_pt * LINE_HEIGHT_FACTOR;

    for line in wrapped {
        // Only a line that draws something may open a page.
        if !line.is_empty() {
            if cursor > geometry.bottom_limit() {
                pages.push(Vec::new());
                cursor = geometry.margin_top;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    face: FontFace::Helvetica,
                    size_pt: body_pt,
                    x: geometry.margin_left,
                    y: cursor,
                    text: line,
                });
            }
        }
        cursor += line_height;
    }
    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Emission
// ────────────────────────────────────────────────────────────────────────────

/// Serializes the sequence into `.pdf` bytes. Fails as a whole or not at all.
pub fn write_pdf(doc: &BlockSequence, geometry: &PageGeometry) -> Result<Vec<u8>, ExportError> {
    geometry.validate()?;
    let pages = layout_pages(doc, geometry);

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let fonts: Vec<(FontFace, Ref)> = [FontFace::Helvetica, FontFace::HelveticaBold]
        .into_iter()
        .map(|face| (face, alloc()))
        .collect();
    let page_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);

    for (face, font_ref) in &fonts {
        pdf.type1_font(*font_ref)
            .base_font(Name(face.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (i, lines) in pages.iter().enumerate() {
        let mut content = Content::new();
        for line in lines {
            content
                .begin_text()
                .set_font(Name(line.face.resource_name()), line.size_pt)
                .next_line(line.x, geometry.page_height - line.y)
                .show(Str(&to_winansi_bytes(&line.text)))
                .end_text();
        }
        let data = content.finish();
        pdf.stream(content_ids[i], &data);

        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.page_width, geometry.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        {
            let mut resources = page.resources();
            let mut font_dict = resources.fonts();
            for (face, font_ref) in &fonts {
                font_dict.pair(Name(face.resource_name()), *font_ref);
            }
        }
    }

    tracing::debug!(pages = pages.len(), "page layout complete");
    Ok(pdf.finish())
}

/// Encodes text for the standard fonts' WinAnsi encoding; unmapped characters become `?`.
pub fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| winansi_code(c).unwrap_or(b'?')).collect()
}
