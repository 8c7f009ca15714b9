use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the backend's `captions` relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRow {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub profile_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for `captions`. The backend assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCaption {
    pub profile_id: Uuid,
    pub content: String,
}

/// Newest first when any row carries a timestamp; rows without one go last.
/// Without timestamps the backend's order is kept.
pub fn sort_newest_first(rows: &mut [CaptionRow]) {
    if rows.iter().any(|r| r.created_at.is_some()) {
        // Option orders None < Some, so reversing puts untimed rows at the end.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}
