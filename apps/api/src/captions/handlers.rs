use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::caption::{sort_newest_first, CaptionRow, NewCaption};
use crate::models::vote::{CaptionVoteRow, VoteDirection, VoteTally};
use crate::state::AppState;
use crate::store::StoreError;

/// Longest caption accepted, in characters, after trimming.
pub const MAX_CAPTION_CHARS: usize = 280;

#[derive(Debug, Deserialize)]
pub struct SubmitCaptionRequest {
    pub profile_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub profile_id: Uuid,
    pub direction: VoteDirection,
}

/// Trims and bounds caption text.
pub fn validate_caption(content: &str) -> Result<String, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("caption must not be empty".into()));
    }
    let chars = trimmed.chars().count();
    if chars > MAX_CAPTION_CHARS {
        return Err(AppError::Validation(format!(
            "caption is {chars} characters; the limit is {MAX_CAPTION_CHARS}"
        )));
    }
    Ok(trimmed.to_string())
}

/// GET /api/v1/captions
pub async fn handle_list_captions(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaptionRow>>, AppError> {
    let mut rows = state.store.list_captions().await?;
    sort_newest_first(&mut rows);
    Ok(Json(rows))
}

/// POST /api/v1/captions
pub async fn handle_submit_caption(
    State(state): State<AppState>,
    Json(req): Json<SubmitCaptionRequest>,
) -> Result<(StatusCode, Json<CaptionRow>), AppError> {
    let content = validate_caption(&req.content)?;
    let row = state
        .store
        .insert_caption(&NewCaption {
            profile_id: req.profile_id,
            content,
        })
        .await?;
    tracing::info!(caption_id = row.id, profile_id = %req.profile_id, "Caption submitted");
    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/v1/captions/:id/vote
pub async fn handle_vote(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .upsert_vote(&CaptionVoteRow {
            caption_id: id,
            profile_id: req.profile_id,
            vote_value: req.direction.value(),
        })
        .await
        .map_err(|e| match e {
            StoreError::UnknownCaption(id) => AppError::NotFound(format!("Caption {id} not found")),
            other => AppError::Store(other),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/captions/:id/votes
pub async fn handle_vote_tally(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VoteTally>, AppError> {
    let votes = state.store.list_votes(id).await?;
    Ok(Json(VoteTally::from_votes(id, &votes)))
}
