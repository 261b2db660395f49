//! Structural Classifier: assigns each line a semantic role.
//!
//! Resumes get a name line, an optional subtitle, and section headings picked
//! out by `HEADING_RULES`. Cover letters are body text and blanks only.

use serde::{Deserialize, Serialize};

use crate::document::segmenter::Line;

/// Which kind of document the text is. Governs header/heading detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Name,
    Subtitle,
    Heading,
    Body,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub line: &'a Line,
    pub role: Role,
}

static EMPTY_LINE: Line = Line {
    raw: String::new(),
    trimmed: String::new(),
    is_empty: true,
};

// ────────────────────────────────────────────────────────────────────────────
// Heading rule table
// ────────────────────────────────────────────────────────────────────────────

/// One predicate over the upper-cased, trimmed line.
#[derive(Debug, Clone, Copy)]
enum HeadingRule {
    Exact(&'static str),
    Prefix(&'static str),
    ColonSuffix,
}

impl HeadingRule {
    fn matches(&self, upper: &str) -> bool {
        match self {
            HeadingRule::Exact(word) => upper == *word,
            HeadingRule::Prefix(word) => upper.starts_with(word),
            HeadingRule::ColonSuffix => upper.ends_with(':'),
        }
    }
}

/// Checked in order; the colon rule is last and the most permissive.
const HEADING_RULES: &[HeadingRule] = &[
    HeadingRule::Exact("PROFESSIONAL SUMMARY"),
    HeadingRule::Exact("SUMMARY"),
    HeadingRule::Exact("SKILLS"),
    HeadingRule::Exact("EXPERIENCE"),
    HeadingRule::Exact("WORK EXPERIENCE"),
    HeadingRule::Exact("EDUCATION"),
    HeadingRule::Exact("CERTIFICATIONS"),
    HeadingRule::Exact("PROJECTS"),
    HeadingRule::Prefix("CORE SKILLS"),
    HeadingRule::ColonSuffix,
];

/// True when a non-blank line reads as a resume section heading.
pub fn is_section_heading(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    let upper = trimmed.to_uppercase();
    HEADING_RULES.iter().any(|rule| rule.matches(&upper))
}

/// Heading text as displayed: trimmed, one trailing colon removed.
pub fn heading_display_text(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed.strip_suffix(':').unwrap_or(trimmed)
}

// ────────────────────────────────────────────────────────────────────────────
// Classification
// ────────────────────────────────────────────────────────────────────────────

pub fn classify(lines: &[Line], kind: DocumentKind) -> Vec<ClassifiedLine<'_>> {
    match kind {
        DocumentKind::CoverLetter => lines.iter().map(body_or_blank).collect(),
        DocumentKind::Resume => classify_resume(lines),
    }
}

fn body_or_blank(line: &Line) -> ClassifiedLine<'_> {
    let role = if line.is_empty { Role::Blank } else { Role::Body };
    ClassifiedLine { line, role }
}

fn classify_resume(lines: &[Line]) -> Vec<ClassifiedLine<'_>> {
    let Some(name_idx) = lines.iter().position(|l| !l.is_empty) else {
        let line = lines.first().unwrap_or(&EMPTY_LINE);
        return vec![ClassifiedLine {
            line,
            role: Role::Blank,
        }];
    };

    let mut out = Vec::with_capacity(lines.len() - name_idx);
    out.push(ClassifiedLine {
        line: &lines[name_idx],
        role: Role::Name,
    });

    let mut next = name_idx + 1;
    if let Some(candidate) = lines.get(next) {
        if !candidate.is_empty && !is_section_heading(&candidate.trimmed) {
            out.push(ClassifiedLine {
                line: candidate,
                role: Role::Subtitle,
            });
            next += 1;
        }
    }

    for line in &lines[next..] {
        let role = if line.is_empty {
            Role::Blank
        } else if is_section_heading(&line.trimmed) {
            Role::Heading
        } else {
            Role::Body
        };
        out.push(ClassifiedLine { line, role });
    }
    out
}
