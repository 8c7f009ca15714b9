//! Captions in, word cloud out: aggregation + measurement + packing in one call.
//!
//! `CloudEngine` is cheap to clone and carries no per-call state, so handlers
//! clone it into `tokio::task::spawn_blocking` for the CPU-bound pass.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cloud::font_metrics::{FontFamily, MetricMeasurer};
use crate::cloud::frequency::{build_word_counts_with, AggregateOptions};
use crate::cloud::layout::{layout_words, LayoutConfig, PlacedWord};
use crate::errors::AppError;

/// A finished layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloud {
    pub words: Vec<PlacedWord>,
    /// Ranked words after filtering and top-N truncation.
    pub distinct_words: usize,
    pub fallback_count: usize,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CloudEngine {
    pub aggregate: AggregateOptions,
    pub layout: LayoutConfig,
    pub font: FontFamily,
}

impl CloudEngine {
    pub fn new(aggregate: AggregateOptions, font: FontFamily) -> Self {
        Self {
            aggregate,
            layout: LayoutConfig::default(),
            font,
        }
    }

    /// Synchronous pass. `font` overrides the engine default for this call only.
    pub fn render<S: AsRef<str>>(
        &self,
        captions: &[S],
        width: f64,
        height: f64,
        font: Option<FontFamily>,
    ) -> WordCloud {
        let counts = build_word_counts_with(captions, &self.aggregate);
        let measurer = MetricMeasurer::new(font.unwrap_or(self.font));
        let words = layout_words(&counts, width, height, &measurer, &self.layout);

        let fallback_count = words.iter().filter(|w| w.fallback).count();
        if fallback_count > 0 {
            warn!(
                fallback = fallback_count,
                placed = words.len(),
                "Word cloud: some words found no free spot and were pinned to the origin"
            );
        }
        info!(
            captions = captions.len(),
            distinct = counts.len(),
            placed = words.len(),
            width,
            height,
            "Word cloud layout complete"
        );

        WordCloud {
            distinct_words: counts.len(),
            fallback_count,
            words,
            width,
            height,
        }
    }

    /// Runs `render` on the blocking pool.
    pub async fn render_blocking(
        &self,
        captions: Vec<String>,
        width: f64,
        height: f64,
        font: Option<FontFamily>,
    ) -> Result<WordCloud, AppError> {
        let engine = self.clone();
        tokio::task::spawn_blocking(move || engine.render(&captions, width, height, font))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!(
                    "spawn_blocking failed in word cloud layout: {e}"
                ))
            })
    }
}
