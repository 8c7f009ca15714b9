use std::sync::Arc;

use crate::cloud::CloudEngine;
use crate::store::CaptionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backend boundary for captions and votes. REST in production, in-process otherwise.
    pub store: Arc<dyn CaptionStore>,
    /// Stopwords, layout constants, and default font for every cloud request.
    pub engine: CloudEngine,
}
