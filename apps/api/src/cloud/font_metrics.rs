//! Text measurement for the layout engine.
//!
//! The engine only needs `(word, font_size) -> (width, height)` in pixels, so
//! measurement sits behind the `TextMeasurer` trait. Closures implement it too,
//! which keeps tests and alternative renderers cheap to plug in.
//!
//! `MetricMeasurer` is the built-in implementation: static per-character em
//! widths covering ASCII 0x20..=0x7E (index = `(char as usize) - 32`), with
//! non-ASCII characters falling back to an average width. Good enough to keep
//! server-side placements close to what a browser renders for the same font.

use serde::{Deserialize, Serialize};

/// Rendered size of a word in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Maps a word at a font size to its rendered pixel extent.
pub trait TextMeasurer {
    fn measure(&self, word: &str, font_size: u32) -> TextExtent;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, u32) -> TextExtent,
{
    fn measure(&self, word: &str, font_size: u32) -> TextExtent {
        self(word, font_size)
    }
}

/// Font families the built-in measurer has tables for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Humanist sans-serif, measured with Inter widths.
    #[default]
    Sans,
    /// Book serif, measured with Computer Modern widths.
    Serif,
}

impl std::str::FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sans" | "sans-serif" | "sans_serif" => Ok(FontFamily::Sans),
            "serif" => Ok(FontFamily::Serif),
            other => Err(format!("unknown font family '{other}' (expected sans or serif)")),
        }
    }
}

/// Rendered line box height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Static character-width table for a font family, in em units.
pub struct FontMetricTable {
    widths: [f64; 95],
    /// Fallback width for non-ASCII characters.
    pub average_char_width: f64,
}

impl FontMetricTable {
    /// Width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f64 {
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
}

/// Measures words from a static metric table.
#[derive(Debug, Clone, Copy)]
pub struct MetricMeasurer {
    pub font: FontFamily,
    pub line_height: f64,
}

impl MetricMeasurer {
    pub fn new(font: FontFamily) -> Self {
        Self {
            font,
            line_height: LINE_HEIGHT,
        }
    }
}

impl TextMeasurer for MetricMeasurer {
    fn measure(&self, word: &str, font_size: u32) -> TextExtent {
        let size = f64::from(font_size);
        TextExtent {
            width: get_metrics(self.font).measure_em(word) * size,
            height: size * self.line_height,
        }
    }
}

/// Inter, humanist sans-serif.
static SANS_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0-9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A-M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N-Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a-m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n-z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
};

/// Computer Modern, the TeX serif. Approx. 90% of Inter.
static SERIF_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.23, 0.27, 0.34, 0.50, 0.50, 0.80, 0.60, 0.20, 0.30, 0.30, 0.35, 0.53, 0.25, 0.30, 0.25, 0.28,
        // 0-9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.53, 0.53, 0.53, 0.45, 0.92,
        // A-M
        0.60, 0.55, 0.55, 0.60, 0.50, 0.45, 0.60, 0.60, 0.23, 0.35, 0.55, 0.48, 0.70,
        // N-Z
        0.60, 0.65, 0.50, 0.65, 0.55, 0.45, 0.50, 0.60, 0.60, 0.80, 0.55, 0.55, 0.50,
        // [     \     ]     ^     _     `
        0.25, 0.28, 0.25, 0.42, 0.50, 0.31,
        // a-m
        0.50, 0.50, 0.45, 0.50, 0.50, 0.28, 0.50, 0.50, 0.20, 0.20, 0.48, 0.20, 0.75,
        // n-z
        0.50, 0.50, 0.50, 0.50, 0.30, 0.40, 0.35, 0.50, 0.45, 0.65, 0.45, 0.45, 0.40,
        // {     |     }     ~
        0.30, 0.23, 0.30, 0.53,
    ],
    average_char_width: 0.47,
};

/// Returns the static metric table for a font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Sans => &SANS_TABLE,
        FontFamily::Serif => &SERIF_TABLE,
    }
}
