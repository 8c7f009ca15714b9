//! Spiral Packing Layout Engine.
//!
//! Greedy, deterministic placement of ranked words inside an elliptical
//! boundary. Words are placed highest-count first; each walks an Archimedean
//! spiral out from the container center and takes the first candidate whose
//! box fits the container, keeps its center inside the ellipse, and overlaps
//! nothing already accepted. No backtracking, at most `max_candidates` checks
//! per word.
//!
//! A word that exhausts its candidates is pinned to `(0, 0)` and records a
//! zero-size box, so it never blocks later words. Several such words can stack
//! at the origin; that is accepted best-effort behavior.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cloud::font_metrics::TextMeasurer;
use crate::cloud::frequency::WordCount;
use crate::cloud::geometry::{Ellipse, Rect, Spiral};

/// Fixed palette cycled by rank index.
pub const PALETTE: [&str; 8] = [
    "#1a1a1a", "#b22222", "#c45c26", "#6b4423", "#1a4d8c", "#2d5a27", "#5a3d7a", "#0d6b5c",
];

/// Layout tunables. `Default` carries the production constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub min_font_px: u32,
    pub max_font_px: u32,
    /// Inset between the container edge and the ellipse, on every side.
    pub padding_px: f64,
    pub max_candidates: usize,
    /// Radius growth coefficient: `radius = spiral_step * sqrt(i)`.
    pub spiral_step: f64,
    /// Radians between consecutive candidates.
    pub angle_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_font_px: 12,
            max_font_px: 72,
            padding_px: 24.0,
            max_candidates: 8_000,
            spiral_step: 6.0,
            angle_step: 0.5,
        }
    }
}

/// A ranked word with its font size and rendered extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredWord {
    pub word: String,
    pub count: u32,
    pub font_size: u32,
    pub width: f64,
    pub height: f64,
}

/// Final screen-space placement of one word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub count: u32,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: u32,
    pub color: String,
    /// No spiral candidate was accepted; the word sits at the origin.
    pub fallback: bool,
}

impl PlacedWord {
    /// The box this placement occupies in the accepted set.
    pub fn bounds(&self) -> Rect {
        if self.fallback {
            return Rect {
                left: 0.0,
                top: 0.0,
                width: 0.0,
                height: 0.0,
            };
        }
        Rect {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }
}

/// Palette color for a rank index.
pub fn color_for_rank(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Linear font size between the configured bounds by `count / max_count`.
pub fn font_size_for(count: u32, max_count: u32, config: &LayoutConfig) -> u32 {
    let ratio = if max_count == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(max_count)
    };
    let min = f64::from(config.min_font_px);
    let max = f64::from(config.max_font_px);
    (min + ratio * (max - min)).round() as u32
}

/// Assigns font sizes and measures every word, preserving rank order.
pub fn measure_words<M: TextMeasurer + ?Sized>(
    words: &[WordCount],
    measurer: &M,
    config: &LayoutConfig,
) -> Vec<MeasuredWord> {
    let max_count = words.iter().map(|wc| wc.count).max().unwrap_or(0);
    words
        .iter()
        .map(|wc| {
            let font_size = font_size_for(wc.count, max_count, config);
            let extent = measurer.measure(&wc.word, font_size);
            MeasuredWord {
                word: wc.word.clone(),
                count: wc.count,
                font_size,
                width: extent.width,
                height: extent.height,
            }
        })
        .collect()
}

/// Lays out ranked words in a `width` × `height` container.
///
/// Returns one placement per input word, in input order. Zero, negative, or
/// non-finite container dimensions mean "not ready" and yield an empty list.
pub fn layout_words<M: TextMeasurer + ?Sized>(
    words: &[WordCount],
    width: f64,
    height: f64,
    measurer: &M,
    config: &LayoutConfig,
) -> Vec<PlacedWord> {
    if !has_area(width, height) || words.is_empty() {
        return Vec::new();
    }
    let measured = measure_words(words, measurer, config);
    place_measured(&measured, width, height, config)
}

/// Packing pass over already-measured words.
pub fn place_measured(
    words: &[MeasuredWord],
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Vec<PlacedWord> {
    if !has_area(width, height) {
        return Vec::new();
    }

    let ellipse = Ellipse::inset(width, height, config.padding_px);
    let mut accepted: Vec<Rect> = Vec::with_capacity(words.len());
    let mut placed = Vec::with_capacity(words.len());

    for (index, word) in words.iter().enumerate() {
        let spot = find_spot(word, width, height, &ellipse, &accepted, config);
        if spot.is_none() {
            debug!(word = %word.word, "no spiral candidate accepted, using fallback");
        }
        let (left, top) = spot.map_or((0.0, 0.0), |rect| (rect.left, rect.top));
        let placement = PlacedWord {
            word: word.word.clone(),
            count: word.count,
            left,
            top,
            width: word.width,
            height: word.height,
            font_size: word.font_size,
            color: color_for_rank(index).to_string(),
            fallback: spot.is_none(),
        };
        accepted.push(placement.bounds());
        placed.push(placement);
    }

    placed
}

fn has_area(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

fn find_spot(
    word: &MeasuredWord,
    width: f64,
    height: f64,
    ellipse: &Ellipse,
    accepted: &[Rect],
    config: &LayoutConfig,
) -> Option<Rect> {
    Spiral::new(
        (ellipse.cx, ellipse.cy),
        config.spiral_step,
        config.angle_step,
        ellipse.max_radius(),
        config.max_candidates,
    )
    .map(|(x, y)| Rect::centered_at(x, y, word.width, word.height))
    .find(|candidate| {
        let (cx, cy) = candidate.center();
        ellipse.contains(cx, cy)
            && candidate.fits_within(width, height)
            && !accepted.iter().any(|other| candidate.intersects(other))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::font_metrics::{FontFamily, MetricMeasurer, TextExtent};
    use crate::cloud::frequency::build_word_counts;

    fn wc(word: &str, count: u32) -> WordCount {
        WordCount {
            word: word.to_string(),
            count,
        }
    }

    fn sample_words() -> Vec<WordCount> {
        let captions: Vec<String> = (0..60)
            .map(|i| {
                let mut caption = String::from("cloud cloud rust");
                for j in 0..(i % 7) {
                    caption.push_str(&format!(" topic{j} extra{}", i % 13));
                }
                caption
            })
            .collect();
        build_word_counts(&captions)
    }

    fn assert_no_overlaps(placed: &[PlacedWord]) {
        let boxes: Vec<Rect> = placed
            .iter()
            .filter(|p| !p.fallback)
            .map(PlacedWord::bounds)
            .collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                assert!(!a.intersects(b), "overlap between {a:?} and {b:?}");
            }
        }
    }

    #[test]
    fn test_font_size_interpolates() {
        let config = LayoutConfig::default();
        assert_eq!(font_size_for(10, 10, &config), 72);
        assert_eq!(font_size_for(5, 10, &config), 42);
        assert_eq!(font_size_for(1, 3, &config), 32);
        assert_eq!(font_size_for(0, 0, &config), 12);
    }

    #[test]
    fn test_color_cycles_by_rank() {
        assert_eq!(color_for_rank(0), "#1a1a1a");
        assert_eq!(color_for_rank(7), "#0d6b5c");
        assert_eq!(color_for_rank(8), "#1a1a1a");
        assert_eq!(color_for_rank(17), "#b22222");
    }

    #[test]
    fn test_empty_word_list_is_empty() {
        let measurer = MetricMeasurer::new(FontFamily::Sans);
        let placed = layout_words(&[], 800.0, 600.0, &measurer, &LayoutConfig::default());
        assert!(placed.is_empty());
    }

    #[test]
    fn test_zero_area_container_is_empty() {
        let measurer = MetricMeasurer::new(FontFamily::Sans);
        let words = vec![wc("cloud", 3)];
        let config = LayoutConfig::default();
        assert!(layout_words(&words, 0.0, 600.0, &measurer, &config).is_empty());
        assert!(layout_words(&words, 800.0, 0.0, &measurer, &config).is_empty());
        assert!(layout_words(&words, -5.0, 600.0, &measurer, &config).is_empty());
        assert!(layout_words(&words, f64::NAN, 600.0, &measurer, &config).is_empty());
    }

    #[test]
    fn test_top_word_lands_at_center() {
        let measurer = MetricMeasurer::new(FontFamily::Sans);
        let placed = layout_words(
            &[wc("cloud", 5), wc("rust", 1)],
            800.0,
            600.0,
            &measurer,
            &LayoutConfig::default(),
        );
        let first = &placed[0];
        assert!(!first.fallback);
        assert_eq!(first.font_size, 72);
        let (cx, cy) = first.bounds().center();
        assert!((cx - 400.0).abs() < 1e-9 && (cy - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_placement_per_word_in_rank_order() {
        let words = sample_words();
        let measurer = MetricMeasurer::new(FontFamily::Sans);
        let placed = layout_words(&words, 900.0, 600.0, &measurer, &LayoutConfig::default());
        assert_eq!(placed.len(), words.len());
        for (i, (p, w)) in placed.iter().zip(&words).enumerate() {
            assert_eq!(p.word, w.word);
            assert_eq!(p.count, w.count);
            assert_eq!(p.color, color_for_rank(i));
        }
    }

    #[test]
    fn test_no_overlaps_and_centers_inside_ellipse() {
        let words = sample_words();
        let measurer = MetricMeasurer::new(FontFamily::Serif);
        let config = LayoutConfig::default();
        let (width, height) = (640.0, 420.0);
        let placed = layout_words(&words, width, height, &measurer, &config);

        assert_no_overlaps(&placed);
        let ellipse = Ellipse::inset(width, height, config.padding_px);
        for p in placed.iter().filter(|p| !p.fallback) {
            let (cx, cy) = p.bounds().center();
            assert!(ellipse.contains(cx, cy), "{} centered outside ellipse", p.word);
            assert!(p.bounds().fits_within(width, height));
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let words = sample_words();
        let measurer = MetricMeasurer::new(FontFamily::Sans);
        let config = LayoutConfig::default();
        let first = layout_words(&words, 700.0, 500.0, &measurer, &config);
        let second = layout_words(&words, 700.0, 500.0, &measurer, &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_oversized_word_falls_back_to_origin() {
        let wide = |_: &str, _: u32| TextExtent {
            width: 5_000.0,
            height: 40.0,
        };
        let placed = layout_words(
            &[wc("enormous", 1)],
            400.0,
            300.0,
            &wide,
            &LayoutConfig::default(),
        );
        assert_eq!(placed.len(), 1);
        assert!(placed[0].fallback);
        assert_eq!((placed[0].left, placed[0].top), (0.0, 0.0));
    }

    #[test]
    fn test_fallback_does_not_block_later_words() {
        let measurer = |word: &str, _: u32| {
            if word == "enormous" {
                TextExtent {
                    width: 5_000.0,
                    height: 40.0,
                }
            } else {
                TextExtent {
                    width: 60.0,
                    height: 20.0,
                }
            }
        };
        let placed = layout_words(
            &[wc("enormous", 4), wc("small", 2)],
            400.0,
            300.0,
            &measurer,
            &LayoutConfig::default(),
        );
        assert!(placed[0].fallback);
        assert!(!placed[1].fallback);
        // With the fallback box at zero size, the next word still gets the center.
        assert_eq!(placed[1].bounds().center(), (200.0, 150.0));
    }

    #[test]
    fn test_tiny_container_falls_back_without_failing() {
        let measurer = MetricMeasurer::new(FontFamily::Sans);
        // 40x40 with 24px padding leaves a degenerate ellipse.
        let placed = layout_words(
            &[wc("cloud", 2), wc("rust", 1)],
            40.0,
            40.0,
            &measurer,
            &LayoutConfig::default(),
        );
        assert_eq!(placed.len(), 2);
        assert!(placed.iter().all(|p| p.fallback));
    }

    #[test]
    fn test_second_word_avoids_first() {
        let boxy = |_: &str, _: u32| TextExtent {
            width: 100.0,
            height: 30.0,
        };
        let placed = layout_words(
            &[wc("alpha", 2), wc("beta", 2)],
            600.0,
            400.0,
            &boxy,
            &LayoutConfig::default(),
        );
        assert!(!placed[0].fallback && !placed[1].fallback);
        assert!(!placed[0].bounds().intersects(&placed[1].bounds()));
    }
}
