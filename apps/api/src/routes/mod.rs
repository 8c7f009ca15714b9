pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::captions::handlers as captions;
use crate::cloud::handlers as cloud;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Captions and votes
        .route(
            "/api/v1/captions",
            get(captions::handle_list_captions).post(captions::handle_submit_caption),
        )
        .route("/api/v1/captions/:id/vote", post(captions::handle_vote))
        .route("/api/v1/captions/:id/votes", get(captions::handle_vote_tally))
        // Word cloud
        .route("/api/v1/cloud", get(cloud::handle_get_cloud))
        .route("/api/v1/cloud/layout", post(cloud::handle_layout))
        .with_state(state)
}
