use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::caption::{CaptionRow, NewCaption};
use crate::models::vote::CaptionVoteRow;
use crate::store::{CaptionStore, StoreError};

#[derive(Default)]
struct Tables {
    captions: Vec<CaptionRow>,
    votes: Vec<CaptionVoteRow>,
    next_id: i64,
}

/// In-process store. Used when no backend is configured, and by tests.
#[derive(Default)]
pub struct MemoryCaptionStore {
    tables: RwLock<Tables>,
}

impl MemoryCaptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds rows as-is (ids and timestamps included).
    #[cfg(test)]
    pub fn with_captions(rows: Vec<CaptionRow>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            tables: RwLock::new(Tables {
                captions: rows,
                votes: Vec::new(),
                next_id,
            }),
        }
    }
}

#[async_trait]
impl CaptionStore for MemoryCaptionStore {
    async fn list_captions(&self) -> Result<Vec<CaptionRow>, StoreError> {
        Ok(self.tables.read().await.captions.clone())
    }

    async fn insert_caption(&self, caption: &NewCaption) -> Result<CaptionRow, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_id += 1;
        let row = CaptionRow {
            id: tables.next_id,
            content: caption.content.clone(),
            profile_id: Some(caption.profile_id),
            created_at: Some(Utc::now()),
        };
        tables.captions.push(row.clone());
        Ok(row)
    }

    async fn upsert_vote(&self, vote: &CaptionVoteRow) -> Result<(), StoreError> {
        let mut guard = self.tables.write().await;
        let tables = &mut *guard;
        if !tables.captions.iter().any(|c| c.id == vote.caption_id) {
            return Err(StoreError::UnknownCaption(vote.caption_id));
        }
        match tables
            .votes
            .iter_mut()
            .find(|v| v.caption_id == vote.caption_id && v.profile_id == vote.profile_id)
        {
            Some(existing) => existing.vote_value = vote.vote_value,
            None => tables.votes.push(vote.clone()),
        }
        Ok(())
    }

    async fn list_votes(&self, caption_id: i64) -> Result<Vec<CaptionVoteRow>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .votes
            .iter()
            .filter(|v| v.caption_id == caption_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryCaptionStore::new();
        let profile_id = Uuid::new_v4();
        let first = store
            .insert_caption(&NewCaption {
                profile_id,
                content: "first".into(),
            })
            .await
            .unwrap();
        let second = store
            .insert_caption(&NewCaption {
                profile_id,
                content: "second".into(),
            })
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at.is_some());
        assert_eq!(store.list_captions().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_vote_is_upserted_per_profile() {
        let store = MemoryCaptionStore::new();
        let profile_id = Uuid::new_v4();
        let caption = store
            .insert_caption(&NewCaption {
                profile_id,
                content: "vote on me".into(),
            })
            .await
            .unwrap();

        let mut vote = CaptionVoteRow {
            caption_id: caption.id,
            profile_id,
            vote_value: 1,
        };
        store.upsert_vote(&vote).await.unwrap();
        vote.vote_value = -1;
        store.upsert_vote(&vote).await.unwrap();

        let votes = store.list_votes(caption.id).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].vote_value, -1);
    }

    #[tokio::test]
    async fn test_vote_on_unknown_caption_fails() {
        let store = MemoryCaptionStore::new();
        let err = store
            .upsert_vote(&CaptionVoteRow {
                caption_id: 42,
                profile_id: Uuid::new_v4(),
                vote_value: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownCaption(42)));
    }
}
