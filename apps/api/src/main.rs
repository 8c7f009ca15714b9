mod captions;
mod cloud;
mod config;
mod errors;
mod models;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cloud::{AggregateOptions, CloudEngine};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{CaptionStore, MemoryCaptionStore, RestCaptionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting caption cloud API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config)?;

    let engine = CloudEngine::new(
        AggregateOptions::with_extra_stopwords(&config.extra_stopwords),
        config.cloud_font,
    );
    info!(
        "Word cloud engine: font {:?}, {} stopwords, top {}",
        engine.font,
        engine.aggregate.stopwords.len(),
        engine.aggregate.top_n
    );

    let state = AppState { store, engine };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origin once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// REST store when a backend is configured, in-process store otherwise.
fn build_store(config: &Config) -> Result<Arc<dyn CaptionStore>> {
    match (&config.backend_url, &config.backend_api_key) {
        (Some(url), Some(key)) => {
            let store = RestCaptionStore::new(url, key.clone())
                .context("Failed to build caption backend client")?;
            info!("Caption store: backend at {url}");
            Ok(Arc::new(store))
        }
        _ => {
            warn!("BACKEND_URL not set; captions and votes are kept in memory and lost on restart");
            Ok(Arc::new(MemoryCaptionStore::new()))
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::cloud::CloudEngine;
    use crate::models::caption::CaptionRow;
    use crate::state::AppState;
    use crate::store::MemoryCaptionStore;

    pub fn caption_row(id: i64, content: &str) -> CaptionRow {
        CaptionRow {
            id,
            content: content.to_string(),
            profile_id: None,
            created_at: None,
        }
    }

    pub fn test_state(rows: Vec<CaptionRow>) -> AppState {
        AppState {
            store: Arc::new(MemoryCaptionStore::with_captions(rows)),
            engine: CloudEngine::default(),
        }
    }
}
