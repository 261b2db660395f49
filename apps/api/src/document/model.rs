//! Document Model Builder: fuses classified lines with a style profile.
//!
//! The resulting `BlockSequence` is the only thing the serializers see. They
//! never look at raw text or re-run classification.

use crate::document::classifier::{classify, heading_display_text, DocumentKind, Role};
use crate::document::segmenter::segment;
use crate::document::style::{resolve, Rgb, Spacing, StyleProfile, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// Style attributes resolved for a single block at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    /// Half-points.
    pub font_size: u32,
    pub bold: bool,
    /// `None` leaves the serializer's default text color.
    pub color: Option<Rgb>,
    pub spacing: Spacing,
    pub alignment: Alignment,
}

impl BlockStyle {
    fn plain(font_size: u32, spacing: Spacing) -> Self {
        Self {
            font_size,
            bold: false,
            color: None,
            spacing,
            alignment: Alignment::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    NameHeader(String),
    Subtitle(String),
    SectionHeading(String),
    BodyLine(String),
    BlankLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub content: BlockContent,
    pub style: BlockStyle,
}

impl Block {
    /// Display text; empty for `BlankLine`.
    pub fn text(&self) -> &str {
        match &self.content {
            BlockContent::NameHeader(t)
            | BlockContent::Subtitle(t)
            | BlockContent::SectionHeading(t)
            | BlockContent::BodyLine(t) => t,
            BlockContent::BlankLine => "",
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(
            self.content,
            BlockContent::NameHeader(_) | BlockContent::Subtitle(_)
        )
    }
}

/// One document's blocks plus the profile they were styled with.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSequence {
    pub kind: DocumentKind,
    pub profile: StyleProfile,
    pub blocks: Vec<Block>,
}

/// Segments, classifies and styles `raw_text`. Total over all inputs.
pub fn build_document(raw_text: &str, kind: DocumentKind, template: TemplateId) -> BlockSequence {
    let profile = resolve(template);
    let lines = segment(raw_text);
    let blocks = classify(&lines, kind)
        .into_iter()
        .map(|c| build_block(c.role, &c.line.trimmed, kind, &profile))
        .collect();

    BlockSequence {
        kind,
        profile,
        blocks,
    }
}

fn build_block(role: Role, text: &str, kind: DocumentKind, profile: &StyleProfile) -> Block {
    let body_spacing = match kind {
        DocumentKind::Resume => profile.body_spacing,
        DocumentKind::CoverLetter => profile.letter_body_spacing,
    };

    match role {
        Role::Name => Block {
            content: BlockContent::NameHeader(text.to_string()),
            style: BlockStyle {
                font_size: profile.name_size,
                bold: true,
                color: None,
                spacing: profile.name_spacing,
                alignment: Alignment::Center,
            },
        },
        Role::Subtitle => Block {
            content: BlockContent::Subtitle(text.to_string()),
            style: BlockStyle {
                font_size: profile.subtitle_size,
                bold: false,
                color: Some(profile.subtitle_color),
                spacing: profile.subtitle_spacing,
                alignment: Alignment::Center,
            },
        },
        Role::Heading => Block {
            content: BlockContent::SectionHeading(heading_display_text(text).to_string()),
            style: BlockStyle {
                font_size: profile.heading_size,
                bold: true,
                color: Some(profile.heading_color),
                spacing: profile.heading_spacing,
                alignment: Alignment::Left,
            },
        },
        Role::Body => Block {
            content: BlockContent::BodyLine(text.to_string()),
            style: BlockStyle::plain(profile.body_size, body_spacing),
        },
        Role::Blank => Block {
            content: BlockContent::BlankLine,
            style: BlockStyle::plain(profile.body_size, Spacing::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::discriminant;

    fn contents(text: &str, kind: DocumentKind) -> Vec<BlockContent> {
        build_document(text, kind, TemplateId::Modern)
            .blocks
            .into_iter()
            .map(|b| b.content)
            .collect()
    }

    #[test]
    fn test_name_only_resume() {
        assert_eq!(
            contents("Jane Doe", DocumentKind::Resume),
            vec![BlockContent::NameHeader("Jane Doe".into())]
        );
    }

    #[test]
    fn test_full_resume_block_sequence() {
        assert_eq!(
            contents(
                "Jane Doe\nSoftware Engineer\nSKILLS\nPython, Go",
                DocumentKind::Resume
            ),
            vec![
                BlockContent::NameHeader("Jane Doe".into()),
                BlockContent::Subtitle("Software Engineer".into()),
                BlockContent::SectionHeading("SKILLS".into()),
                BlockContent::BodyLine("Python, Go".into()),
            ]
        );
    }

    #[test]
    fn test_colon_heading_is_stripped() {
        let blocks = contents("Jane Doe\nEngineer\nLanguages:\nEnglish", DocumentKind::Resume);
        assert_eq!(blocks[2], BlockContent::SectionHeading("Languages".into()));
    }

    #[test]
    fn test_cover_letter_is_body_and_blank_only() {
        assert_eq!(
            contents("SKILLS\nPython\n\nThanks", DocumentKind::CoverLetter),
            vec![
                BlockContent::BodyLine("SKILLS".into()),
                BlockContent::BodyLine("Python".into()),
                BlockContent::BlankLine,
                BlockContent::BodyLine("Thanks".into()),
            ]
        );
    }

    #[test]
    fn test_empty_resume_is_single_blank_block() {
        assert_eq!(contents("", DocumentKind::Resume), vec![BlockContent::BlankLine]);
    }

    #[test]
    fn test_structure_is_template_independent() {
        let text = "Jane Doe\nEngineer\n\nSUMMARY\nBuilds things.\nProjects:\n- kv store";
        for kind in [DocumentKind::Resume, DocumentKind::CoverLetter] {
            let shapes: Vec<Vec<_>> = TemplateId::ALL
                .iter()
                .map(|t| {
                    build_document(text, kind, *t)
                        .blocks
                        .iter()
                        .map(|b| (discriminant(&b.content), b.text().to_string()))
                        .collect()
                })
                .collect();
            assert_eq!(shapes[0], shapes[1]);
            assert_eq!(shapes[1], shapes[2]);
        }
    }

    #[test]
    fn test_styles_differ_across_templates() {
        let text = "Jane Doe\nEngineer\nSKILLS\nRust";
        let modern = build_document(text, DocumentKind::Resume, TemplateId::Modern);
        let corporate = build_document(text, DocumentKind::Resume, TemplateId::Corporate);
        assert_ne!(modern.blocks[2].style.color, corporate.blocks[2].style.color);
        assert_eq!(corporate.blocks[3].style.spacing.after, 50);
        assert_eq!(modern.blocks[3].style.spacing.after, 40);
    }

    #[test]
    fn test_header_styles() {
        let doc = build_document("Jane Doe\nEngineer", DocumentKind::Resume, TemplateId::Minimal);
        let name = &doc.blocks[0].style;
        assert!(name.bold);
        assert_eq!(name.font_size, 44);
        assert_eq!(name.alignment, Alignment::Center);
        let subtitle = &doc.blocks[1].style;
        assert!(!subtitle.bold);
        assert_eq!(subtitle.color, Some(Rgb::NEAR_BLACK));
        assert!(doc.blocks.iter().all(|b| b.is_header()));
    }

    #[test]
    fn test_cover_letter_uses_letter_spacing() {
        let doc = build_document("Dear team,", DocumentKind::CoverLetter, TemplateId::Corporate);
        assert_eq!(doc.blocks[0].style.spacing.after, 140);
        assert_eq!(doc.blocks[0].style.font_size, 22);
    }

    #[test]
    fn test_body_text_is_trimmed() {
        let doc = build_document("Jane\nEngineer\n   - shipped  ", DocumentKind::Resume, TemplateId::Modern);
        assert_eq!(doc.blocks[2].text(), "- shipped");
    }
}
