//! Caption store — the boundary to the external backend that owns captions and votes.
//!
//! Handlers only see `Arc<dyn CaptionStore>`. `RestCaptionStore` talks to the
//! backend's REST interface; `MemoryCaptionStore` keeps everything in process
//! for local runs without a backend and for tests.

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::caption::{CaptionRow, NewCaption};
use crate::models::vote::CaptionVoteRow;

pub use memory::MemoryCaptionStore;
pub use rest::RestCaptionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Backend returned no representation for {relation}")]
    EmptyRepresentation { relation: &'static str },

    #[error("Caption {0} does not exist")]
    UnknownCaption(i64),
}

#[async_trait]
pub trait CaptionStore: Send + Sync {
    /// All captions, in the backend's order.
    async fn list_captions(&self) -> Result<Vec<CaptionRow>, StoreError>;

    async fn insert_caption(&self, caption: &NewCaption) -> Result<CaptionRow, StoreError>;

    /// Upserts the vote for `(caption_id, profile_id)`; a second vote replaces the first.
    async fn upsert_vote(&self, vote: &CaptionVoteRow) -> Result<(), StoreError>;

    async fn list_votes(&self, caption_id: i64) -> Result<Vec<CaptionVoteRow>, StoreError>;
}
