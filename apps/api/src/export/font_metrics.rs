//! Per-family glyph advance tables used by the built-in layout surface.
//!
//! Widths are in em units and cover printable ASCII (0x20..=0x7E); index is
//! `(char as usize) - 32`. Anything outside that range measures as the
//! family's average width, which keeps accented names and bullet glyphs from
//! collapsing to zero.

use serde::{Deserialize, Serialize};

use crate::latex::templates::TemplateId;

// ────────────────────────────────────────────────────────────────────────────
// Font family
// ────────────────────────────────────────────────────────────────────────────

/// Typeface families the preview templates are set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Modern template, humanist sans-serif.
    Inter,
    /// Elegant template, old-style serif.
    EbGaramond,
    /// Classic template, the TeX default face.
    ComputerModern,
}

impl FontFamily {
    pub fn for_template(id: TemplateId) -> Self {
        match id {
            TemplateId::Classic => FontFamily::ComputerModern,
            TemplateId::Modern => FontFamily::Inter,
            TemplateId::Elegant => FontFamily::EbGaramond,
        }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        match self {
            FontFamily::Inter => &INTER_TABLE,
            FontFamily::EbGaramond => &EB_GARAMOND_TABLE,
            FontFamily::ComputerModern => &COMPUTER_MODERN_TABLE,
        }
    }
}

/// Bold faces run a little wider than the regular cut.
const BOLD_WIDTH_FACTOR: f32 = 1.06;

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback for codepoints outside printable ASCII.
    pub average_char_width: f32,
    pub space_width: f32,
}

/// One word after wrapping, offset from the start of its line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub x_offset: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrappedLine {
    pub words: Vec<PlacedWord>,
    pub width: f32,
}

impl FontMetricTable {
    /// Width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of `s` in pixels at `size_px`.
    pub fn measure_px(&self, s: &str, size_px: f32, bold: bool) -> f32 {
        let weight = if bold { BOLD_WIDTH_FACTOR } else { 1.0 };
        self.measure_str(s) * size_px * weight
    }

    pub fn space_px(&self, size_px: f32, bold: bool) -> f32 {
        let weight = if bold { BOLD_WIDTH_FACTOR } else { 1.0 };
        self.space_width * size_px * weight
    }

    /// Greedy word wrap at `max_width_px`.
    ///
    /// A single word wider than the line gets a line to itself and overflows;
    /// words are never split. Blank input yields no lines.
    pub fn wrap(&self, text: &str, max_width_px: f32, size_px: f32, bold: bool) -> Vec<WrappedLine> {
        let space = self.space_px(size_px, bold);
        let mut lines: Vec<WrappedLine> = Vec::new();
        let mut current = WrappedLine::default();

        for word in text.split_whitespace() {
            let width = self.measure_px(word, size_px, bold);
            let start = if current.words.is_empty() {
                0.0
            } else {
                current.width + space
            };

            if !current.words.is_empty() && start + width > max_width_px {
                lines.push(std::mem::take(&mut current));
                current.words.push(PlacedWord {
                    text: word.to_string(),
                    x_offset: 0.0,
                    width,
                });
                current.width = width;
            } else {
                current.words.push(PlacedWord {
                    text: word.to_string(),
                    x_offset: start,
                    width,
                });
                current.width = start + width;
            }
        }
        if !current.words.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Inter.
static INTER_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// EB Garamond, roughly 85% of Inter.
static EB_GARAMOND_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.21, 0.26, 0.32, 0.48, 0.48, 0.76, 0.57, 0.19, 0.28, 0.28, 0.33, 0.50, 0.24, 0.28, 0.24, 0.26,
        // 0     1     2     3     4     5     6     7     8     9
        0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48,
        // :     ;     <     =     >     ?     @
        0.24, 0.24, 0.50, 0.50, 0.50, 0.43, 0.87,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.57, 0.52, 0.52, 0.57, 0.48, 0.43, 0.57, 0.57, 0.21, 0.33, 0.52, 0.45, 0.66,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.57, 0.61, 0.48, 0.61, 0.52, 0.43, 0.48, 0.57, 0.57, 0.76, 0.52, 0.52, 0.48,
        // [     \     ]     ^     _     `
        0.24, 0.26, 0.24, 0.40, 0.48, 0.29,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.48, 0.48, 0.43, 0.48, 0.48, 0.26, 0.48, 0.48, 0.19, 0.19, 0.45, 0.19, 0.71,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.48, 0.48, 0.48, 0.48, 0.28, 0.37, 0.33, 0.48, 0.43, 0.61, 0.43, 0.43, 0.37,
        // {     |     }     ~
        0.28, 0.22, 0.28, 0.50,
    ],
    average_char_width: 0.44,
    space_width: 0.21,
};

/// Computer Modern, roughly 90% of Inter.
static COMPUTER_MODERN_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.23, 0.27, 0.34, 0.50, 0.50, 0.80, 0.60, 0.20, 0.30, 0.30, 0.35, 0.53, 0.25, 0.30, 0.25, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.53, 0.53, 0.53, 0.45, 0.92,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.60, 0.55, 0.55, 0.60, 0.50, 0.45, 0.60, 0.60, 0.23, 0.35, 0.55, 0.48, 0.70,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.60, 0.65, 0.50, 0.65, 0.55, 0.45, 0.50, 0.60, 0.60, 0.80, 0.55, 0.55, 0.50,
        // [     \     ]     ^     _     `
        0.25, 0.28, 0.25, 0.42, 0.50, 0.31,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.50, 0.50, 0.45, 0.50, 0.50, 0.28, 0.50, 0.50, 0.20, 0.20, 0.48, 0.20, 0.75,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.50, 0.50, 0.50, 0.30, 0.40, 0.35, 0.50, 0.45, 0.65, 0.45, 0.45, 0.40,
        // {     |     }     ~
        0.30, 0.23, 0.30, 0.53,
    ],
    average_char_width: 0.47,
    space_width: 0.23,
};
