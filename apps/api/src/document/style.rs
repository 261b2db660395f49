//! Template Style Resolver: maps a template to its concrete style profile.
//!
//! Word-package values use the units the package format stores natively:
//! font sizes in half-points, paragraph spacing in twentieths of a point.
//! The page format has its own, smaller type scale in points (`PageTypeScale`).

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Template identifiers
// ────────────────────────────────────────────────────────────────────────────

/// The three export templates. Closed set: every variant resolves to a full profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    /// Bold name header, grey section titles, balanced spacing.
    Modern,
    /// ATS-friendly: plain black typography, tight spacing.
    Minimal,
    /// Blue section headings, slightly more spacious body.
    Corporate,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Modern, TemplateId::Minimal, TemplateId::Corporate];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Minimal => "minimal",
            TemplateId::Corporate => "corporate",
        }
    }
}

/// Display metadata for the template picker.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateMeta {
    pub id: TemplateId,
    pub name: &'static str,
    pub tag: &'static str,
    pub description: &'static str,
}

pub fn template_meta(id: TemplateId) -> TemplateMeta {
    let (name, tag, description) = match id {
        TemplateId::Modern => (
            "Modern Professional",
            "Default",
            "Bold name header with clean grey section titles and balanced spacing.",
        ),
        TemplateId::Minimal => (
            "Clean ATS",
            "ATS-friendly",
            "Ultra-simple typography with tight spacing and no visual noise.",
        ),
        TemplateId::Corporate => (
            "Executive Blue",
            "Leadership",
            "Blue section headings and a more spacious, corporate-style layout.",
        ),
    };
    TemplateMeta {
        id,
        name,
        tag,
        description,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style values
// ────────────────────────────────────────────────────────────────────────────

/// 24-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const GREY: Rgb = Rgb(0x4B, 0x55, 0x63);
    pub const NEAR_BLACK: Rgb = Rgb(0x11, 0x18, 0x27);
    pub const BLUE: Rgb = Rgb(0x1D, 0x4E, 0xD8);

    /// Upper-case hex without a leading `#`, e.g. `4B5563`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Paragraph spacing in twentieths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

/// Point sizes used by the page serializer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTypeScale {
    pub name_pt: f32,
    pub subtitle_pt: f32,
    pub resume_body_pt: f32,
    pub letter_body_pt: f32,
}

/// The resolved visual parameters for one template. Built once per export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProfile {
    pub name_size: u32,
    pub name_spacing: Spacing,
    pub subtitle_size: u32,
    pub subtitle_color: Rgb,
    pub subtitle_spacing: Spacing,
    pub heading_size: u32,
    pub heading_color: Rgb,
    pub heading_spacing: Spacing,
    pub body_size: u32,
    pub body_spacing: Spacing,
    pub letter_body_spacing: Spacing,
    pub page: PageTypeScale,
}

/// Pure, total lookup from template to profile.
pub fn resolve(template: TemplateId) -> StyleProfile {
    let minimal = template == TemplateId::Minimal;
    let corporate = template == TemplateId::Corporate;

    let heading_color = match template {
        TemplateId::Modern => Rgb::GREY,
        TemplateId::Minimal => Rgb::BLACK,
        TemplateId::Corporate => Rgb::BLUE,
    };

    StyleProfile {
        name_size: if minimal { 44 } else { 56 },
        name_spacing: Spacing { before: 0, after: 200 },
        subtitle_size: 24,
        subtitle_color: if minimal { Rgb::NEAR_BLACK } else { Rgb::GREY },
        subtitle_spacing: Spacing { before: 0, after: 260 },
        heading_size: 24,
        heading_color,
        heading_spacing: if minimal {
            Spacing { before: 160, after: 60 }
        } else {
            Spacing { before: 200, after: 80 }
        },
        body_size: if minimal { 20 } else { 22 },
        body_spacing: Spacing {
            before: 0,
            after: if corporate { 50 } else { 40 },
        },
        letter_body_spacing: Spacing {
            before: 0,
            after: if corporate { 140 } else { 120 },
        },
        page: PageTypeScale {
            name_pt: if minimal { 14.0 } else { 16.0 },
            subtitle_pt: 11.0,
            resume_body_pt: if minimal { 10.0 } else { 11.0 },
            letter_body_pt: 11.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_resolves() {
        for id in TemplateId::ALL {
            let profile = resolve(id);
            assert!(profile.name_size > profile.body_size);
            assert!(profile.page.name_pt > profile.page.resume_body_pt);
        }
    }

    #[test]
    fn test_heading_colors_per_template() {
        assert_eq!(resolve(TemplateId::Modern).heading_color.to_hex(), "4B5563");
        assert_eq!(resolve(TemplateId::Minimal).heading_color.to_hex(), "000000");
        assert_eq!(resolve(TemplateId::Corporate).heading_color.to_hex(), "1D4ED8");
    }

    #[test]
    fn test_minimal_is_tighter_and_smaller() {
        let minimal = resolve(TemplateId::Minimal);
        let modern = resolve(TemplateId::Modern);
        assert_eq!(minimal.name_size, 44, "22pt name");
        assert_eq!(modern.name_size, 56, "28pt name");
        assert!(minimal.body_size < modern.body_size);
        assert!(minimal.heading_spacing.before < modern.heading_spacing.before);
        assert!(minimal.heading_spacing.after < modern.heading_spacing.after);
        assert_eq!(minimal.subtitle_color, Rgb::NEAR_BLACK);
    }

    #[test]
    fn test_corporate_body_spacing_is_larger() {
        let corporate = resolve(TemplateId::Corporate);
        let modern = resolve(TemplateId::Modern);
        assert!(corporate.body_spacing.after > modern.body_spacing.after);
        assert!(corporate.letter_body_spacing.after > modern.letter_body_spacing.after);
        assert_eq!(corporate.name_size, modern.name_size);
    }

    #[test]
    fn test_page_scale_minimal() {
        let page = resolve(TemplateId::Minimal).page;
        assert_eq!(page.name_pt, 14.0);
        assert_eq!(page.resume_body_pt, 10.0);
        assert_eq!(page.letter_body_pt, 11.0);
    }

    #[test]
    fn test_rgb_hex_is_zero_padded() {
        assert_eq!(Rgb(0x0A, 0x00, 0xFF).to_hex(), "0A00FF");
    }

    #[test]
    fn test_template_serde_snake_case() {
        let id: TemplateId = serde_json::from_str(r#""corporate""#).unwrap();
        assert_eq!(id, TemplateId::Corporate);
        assert_eq!(serde_json::to_string(&TemplateId::Minimal).unwrap(), r#""minimal""#);
        assert!(serde_json::from_str::<TemplateId>(r#""fancy""#).is_err());
    }

    #[test]
    fn test_template_meta_names() {
        assert_eq!(template_meta(TemplateId::Minimal).name, "Clean ATS");
        assert_eq!(template_meta(TemplateId::Corporate).tag, "Leadership");
    }
}
