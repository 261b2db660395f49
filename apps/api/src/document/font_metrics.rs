//! Static font-metric tables for the two page-format faces.
//!
//! Widths are in em units (relative to font size), taken from the Helvetica
//! and Helvetica-Bold AFM files for the base-14 fonts, so measurements match
//! what a viewer renders without embedding anything.
//! Each table covers ASCII 0x20..=0x7E (index = code - 32) plus the upper
//! half of WinAnsiEncoding, 0x80..=0xFF (index = code - 0x80). Characters
//! outside WinAnsi are drawn as `?` and measured as `?`.

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// PostScript name of the standard font.
    pub fn base_font(&self) -> &'static [u8] {
        match self {
            FontFace::Helvetica => b"Helvetica",
            FontFace::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static [u8] {
        match self {
            FontFace::Helvetica => b"F1",
            FontFace::HelveticaBold => b"F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// WinAnsi 0x80..=0xFF. Codes the encoding leaves undefined hold 0.0.
    winansi_widths: [f32; 128],
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Rendered width in points at `size_pt`.
    pub fn text_width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    fn char_width(&self, c: char) -> f32 {
        let code = winansi_code(c).unwrap_or(b'?') as usize;
        match code {
            0x20..=0x7E => self.widths[code - 0x20],
            0x80..=0xFF => self.winansi_widths[code - 0x80],
            _ => 0.0,
        }
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_pt`.
    ///
    /// Every `\n` starts a new line and an empty paragraph stays an empty line.
    /// Words wider than the whole line are split between characters.
    pub fn wrap_text(&self, text: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let max_em = max_width_pt / size_pt;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure_str(word);
                if current.is_empty() {
                    current_width = self.push_word(&mut lines, &mut current, word, word_w, max_em);
                } else if current_width + self.space_width + word_w <= max_em {
                    current.push(' ');
                    current.push_str(word);
                    current_width += self.space_width + word_w;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current_width = self.push_word(&mut lines, &mut current, word, word_w, max_em);
                }
            }
            lines.push(current);
        }
        lines
    }

    /// Starts `current` with `word`, flushing character chunks when the word alone overflows.
    /// Returns the width of what remains in `current`.
    fn push_word(
        &self,
        lines: &mut Vec<String>,
        current: &mut String,
        word: &str,
        word_w: f32,
        max_em: f32,
    ) -> f32 {
        if word_w <= max_em {
            current.push_str(word);
            return word_w;
        }
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.char_width(c);
            if !current.is_empty() && width + w > max_em {
                lines.push(std::mem::take(current));
                width = 0.0;
            }
            current.push(c);
            width += w;
        }
        width
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsiEncoding
// ────────────────────────────────────────────────────────────────────────────

/// Maps a character to its WinAnsiEncoding code. Tabs draw as spaces.
pub fn winansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '\t' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    #[rustfmt::skip]
    winansi_widths: [
        // 0x80: €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.000, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.000, 0.611, 0.000,
        // 0x90: -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.000, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.000, 0.500, 0.667,
        // 0xA0: nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0: °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0: À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0: Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0: à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0: ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    #[rustfmt::skip]
    winansi_widths: [
        // 0x80: €      -      ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      -      Ž      -
        0.556, 0.000, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.000, 0.611, 0.000,
        // 0x90: -      ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      -      ž      Ÿ
        0.000, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.000, 0.500, 0.667,
        // 0xA0: nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // 0xB0: °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // 0xC0: À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // 0xD0: Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // 0xE0: à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // 0xF0: ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
    space_width: 0.278,
};

/// Returns the static metric table for a given face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFace::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_winansi_punctuation_uses_afm_widths() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert!((metrics.measure_str("\u{2014}") - 1.000).abs() < 1e-4, "em dash");
        assert!((metrics.measure_str("…") - 1.000).abs() < 1e-4);
        assert!((metrics.measure_str("•") - 0.350).abs() < 1e-4);
        assert!((metrics.measure_str("é") - 0.556).abs() < 1e-4);
        let bold = get_metrics(FontFace::HelveticaBold);
        assert!((bold.measure_str("é") - 0.556).abs() < 1e-4);
        assert!((bold.measure_str("ñ") - 0.611).abs() < 1e-4);
    }

    #[test]
    fn test_unencodable_measured_as_question_mark() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.measure_str("日"), metrics.measure_str("?"));
    }

    #[test]
    fn test_every_winansi_code_has_a_width() {
        for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
            let metrics = get_metrics(face);
            for c in (0x20u32..=0x17F).filter_map(char::from_u32).chain("€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ".chars()) {
                if winansi_code(c).is_some() {
                    assert!(metrics.measure_str(&c.to_string()) > 0.0, "{face:?} {c:?}");
                }
            }
        }
    }

    #[test]
    fn test_wrap_with_dashes_respects_width() {
        let metrics = get_metrics(FontFace::Helvetica);
        let text = "Led migration \u{2014} cut costs \u{2014} shipped\u{2026} ".repeat(12);
        for line in metrics.wrap_text(&text, 11.0, 300.0) {
            assert!(metrics.text_width_pt(&line, 11.0) <= 300.0 + 1e-3, "{line:?} overflows");
        }
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Jane Doe";
        let regular = get_metrics(FontFace::Helvetica).text_width_pt(text, 16.0);
        let bold = get_metrics(FontFace::HelveticaBold).text_width_pt(text, 16.0);
        assert!(bold > regular, "bold {bold} should exceed regular {regular}");
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let metrics = get_metrics(FontFace::Helvetica);
        let at_10 = metrics.text_width_pt("Experience", 10.0);
        let at_20 = metrics.text_width_pt("Experience", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = get_metrics(FontFace::Helvetica).wrap_text("Python, Go", 11.0, 480.0);
        assert_eq!(lines, vec!["Python, Go".to_string()]);
    }

    #[test]
    fn test_wrap_keeps_empty_paragraphs() {
        let lines = get_metrics(FontFace::Helvetica).wrap_text("a\n\nb", 11.0, 480.0);
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let metrics = get_metrics(FontFace::Helvetica);
        let bullet = "Architected a distributed caching layer using Redis and consistent hashing, \
                      reducing p99 latency by 40% under 50k RPS peak load across three regions";
        let lines = metrics.wrap_text(bullet, 11.0, 200.0);
        assert!(lines.len() >= 3, "expected wrapping, got {lines:?}");
        for line in &lines {
            assert!(metrics.text_width_pt(line, 11.0) <= 200.0 + 1e-3, "{line:?} overflows");
        }
        assert_eq!(lines.join(" "), bullet.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let metrics = get_metrics(FontFace::Helvetica);
        let word = "x".repeat(200);
        let lines = metrics.wrap_text(&word, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(metrics.text_width_pt(line, 10.0) <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn test_face_names() {
        assert_eq!(FontFace::Helvetica.base_font(), b"Helvetica");
        assert_eq!(FontFace::HelveticaBold.base_font(), b"Helvetica-Bold");
        assert_ne!(
            FontFace::Helvetica.resource_name(),
            FontFace::HelveticaBold.resource_name()
        );
    }
}
