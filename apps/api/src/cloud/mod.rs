// Word cloud: frequency aggregation, text measurement, spiral packing.
// The packing pass is CPU-bound; handlers run it through CloudEngine::render_blocking.

pub mod engine;
pub mod font_metrics;
pub mod frequency;
pub mod geometry;
pub mod handlers;
pub mod layout;

pub use engine::{CloudEngine, WordCloud};
pub use font_metrics::FontFamily;
pub use frequency::AggregateOptions;
