use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::cloud::{FontFamily, WordCloud};
use crate::errors::AppError;
use crate::state::AppState;

/// Upper bound on captions accepted in a single layout request body.
pub const MAX_LAYOUT_CAPTIONS: usize = 10_000;

#[derive(Debug, Deserialize)]
pub struct CloudQuery {
    pub width: f64,
    pub height: f64,
    pub font: Option<FontFamily>,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub captions: Vec<String>,
    pub width: f64,
    pub height: f64,
    pub font: Option<FontFamily>,
}

/// GET /api/v1/cloud
/// Word cloud over every stored caption.
pub async fn handle_get_cloud(
    State(state): State<AppState>,
    Query(params): Query<CloudQuery>,
) -> Result<Json<WordCloud>, AppError> {
    let captions: Vec<String> = state
        .store
        .list_captions()
        .await?
        .into_iter()
        .map(|row| row.content)
        .collect();

    let cloud = state
        .engine
        .render_blocking(captions, params.width, params.height, params.font)
        .await?;
    Ok(Json(cloud))
}

/// POST /api/v1/cloud/layout
/// Word cloud over captions supplied by the caller. No store access.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(req): Json<LayoutRequest>,
) -> Result<Json<WordCloud>, AppError> {
    if req.captions.len() > MAX_LAYOUT_CAPTIONS {
        return Err(AppError::Validation(format!(
            "at most {MAX_LAYOUT_CAPTIONS} captions per layout request, got {}",
            req.captions.len()
        )));
    }

    let cloud = state
        .engine
        .render_blocking(req.captions, req.width, req.height, req.font)
        .await?;
    Ok(Json(cloud))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{caption_row, test_state};

    #[tokio::test]
    async fn test_get_cloud_uses_stored_captions() {
        let state = test_state(vec![
            caption_row(1, "The cat sat."),
            caption_row(2, "The CAT ran!"),
        ]);
        let Json(cloud) = handle_get_cloud(
            State(state),
            Query(CloudQuery {
                width: 800.0,
                height: 600.0,
                font: None,
            }),
        )
        .await
        .unwrap();

        let words: Vec<&str> = cloud.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["cat", "sat", "ran"]);
        assert_eq!(cloud.words[0].count, 2);
    }

    #[tokio::test]
    async fn test_layout_zero_container_is_empty_not_error() {
        let Json(cloud) = handle_layout(
            State(test_state(Vec::new())),
            Json(LayoutRequest {
                captions: vec!["spiral packing works".into()],
                width: 0.0,
                height: 0.0,
                font: Some(FontFamily::Serif),
            }),
        )
        .await
        .unwrap();
        assert!(cloud.words.is_empty());
    }

    #[tokio::test]
    async fn test_layout_rejects_oversized_batches() {
        let err = handle_layout(
            State(test_state(Vec::new())),
            Json(LayoutRequest {
                captions: vec!["word".into(); MAX_LAYOUT_CAPTIONS + 1],
                width: 400.0,
                height: 300.0,
                font: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
