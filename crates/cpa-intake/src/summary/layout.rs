//! Glyph metrics and line breaking for the two standard fonts used in the summary.

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 0x20..=0x7E, in 1/1000 em.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for glyphs outside the ASCII tables (accented letters, dashes, quotes).
const FALLBACK_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    pub(crate) const fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Regular => b"F1",
            Self::Bold => b"F2",
        }
    }

    pub(crate) const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    fn glyph_width(self, ch: char) -> u16 {
        let table = match self {
            Self::Regular => &HELVETICA,
            Self::Bold => &HELVETICA_BOLD,
        };
        (ch as usize)
            .checked_sub(0x20)
            .and_then(|index| table.get(index))
            .copied()
            .unwrap_or(FALLBACK_WIDTH)
    }

    /// Rendered width of `text` in points at `size`.
    pub(crate) fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|ch| u32::from(self.glyph_width(ch))).sum();
        units as f32 * size / 1000.0
    }
}

/// Breaks text into lines no wider than `max_width`.
///
/// Explicit newlines always start a new line and blank input lines are kept.
/// Lines break at the last space that fits, which is dropped; every other
/// space is printed as supplied. Words longer than a full line are split at
/// character boundaries.
pub(crate) fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let raw_line = raw_line.trim_end_matches('\r');
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let chars: Vec<char> = raw_line.chars().collect();
        let mut start = 0;
        let mut index = 0;
        let mut last_space = None;
        let mut width = 0.0;

        while index < chars.len() {
            let ch = chars[index];
            if ch == ' ' {
                last_space = Some(index);
            }
            width += f32::from(face.glyph_width(ch)) * size / 1000.0;

            if width <= max_width {
                index += 1;
                continue;
            }

            match last_space {
                Some(space) if space > start => {
                    lines.push(chars[start..space].iter().collect());
                    start = space + 1;
                }
                _ => {
                    if index == start {
                        index += 1;
                    }
                    lines.push(chars[start..index].iter().collect());
                    start = index;
                }
            }
            index = start;
            last_space = None;
            width = 0.0;
        }

        if start < chars.len() {
            lines.push(chars[start..].iter().collect());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_with_font_specific_widths() {
        let regular = FontFace::Regular.text_width("il", 10.0);
        let bold = FontFace::Bold.text_width("il", 10.0);
        assert!((regular - 4.44).abs() < 0.001);
        assert!((bold - 5.56).abs() < 0.001);
    }

    #[test]
    fn short_lines_pass_through() {
        let lines = wrap_text("Timeline: soon", FontFace::Regular, 12.0, 500.0);
        assert_eq!(lines, vec!["Timeline: soon".to_string()]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        let lines = wrap_text("\nDate: today\n\nNext", FontFace::Regular, 12.0, 500.0);
        assert_eq!(lines, vec!["", "Date: today", "", "Next"]);
    }

    #[test]
    fn long_paragraphs_wrap_on_word_boundaries() {
        let text = "Dealing with a recent life event that may affect taxes for myself";
        let lines = wrap_text(text, FontFace::Regular, 12.0, 150.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
        for line in &lines {
            assert!(FontFace::Regular.text_width(line, 12.0) <= 150.0);
        }
    }

    #[test]
    fn inner_and_leading_spaces_are_kept() {
        let lines = wrap_text(
            "  Two  spaces   here\nPhone: (555)  123-4567",
            FontFace::Regular,
            12.0,
            500.0,
        );
        assert_eq!(lines, vec!["  Two  spaces   here", "Phone: (555)  123-4567"]);
    }

    #[test]
    fn wrapping_drops_only_the_breaking_space() {
        let text = "alpha  beta gamma delta";
        let lines = wrap_text(text, FontFace::Regular, 12.0, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn oversized_words_are_split() {
        let word = "x".repeat(80);
        let lines = wrap_text(&word, FontFace::Regular, 12.0, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
