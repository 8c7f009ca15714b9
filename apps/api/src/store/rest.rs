//! REST caption store — PostgREST-style access to the backend's relations.
//!
//! Every request carries the service key as both `apikey` and bearer token.
//! Relations used: `captions`, `caption_votes`. Row-level access policy is the
//! backend's job; this client only reports what the backend says.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::models::caption::{CaptionRow, NewCaption};
use crate::models::vote::CaptionVoteRow;
use crate::store::{CaptionStore, StoreError};

const REST_PREFIX: &str = "/rest/v1";
const CAPTIONS: &str = "captions";
const CAPTION_VOTES: &str = "caption_votes";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Error body shape returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct RestCaptionStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestCaptionStore {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn relation_url(&self, relation: &str) -> String {
        format!("{}{}/{}", self.base_url, REST_PREFIX, relation)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Sends the request and turns non-2xx statuses into `StoreError::Backend`.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<BackendErrorBody>(&raw)
            .map(|body| body.message)
            .unwrap_or(raw);
        warn!(status = status.as_u16(), %message, "Backend request failed");
        Err(StoreError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        relation: &'static str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        debug!(relation, "Selecting rows from backend");
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());
        let response = self
            .send(self.client.get(self.relation_url(relation)).query(&query))
            .await?;
        Ok(response.json::<Vec<T>>().await?)
    }
}

#[async_trait]
impl CaptionStore for RestCaptionStore {
    async fn list_captions(&self) -> Result<Vec<CaptionRow>, StoreError> {
        self.fetch_rows(CAPTIONS, &[]).await
    }

    async fn insert_caption(&self, caption: &NewCaption) -> Result<CaptionRow, StoreError> {
        debug!(profile_id = %caption.profile_id, "Inserting caption");
        let response = self
            .send(
                self.client
                    .post(self.relation_url(CAPTIONS))
                    .header("Prefer", "return=representation")
                    .json(&[caption]),
            )
            .await?;
        response
            .json::<Vec<CaptionRow>>()
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::EmptyRepresentation { relation: CAPTIONS })
    }

    async fn upsert_vote(&self, vote: &CaptionVoteRow) -> Result<(), StoreError> {
        debug!(caption_id = vote.caption_id, value = vote.vote_value, "Upserting vote");
        self.send(
            self.client
                .post(self.relation_url(CAPTION_VOTES))
                .query(&[("on_conflict", "caption_id,profile_id")])
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&[vote]),
        )
        .await
        .map_err(|e| match e {
            // Foreign-key violation on caption_id.
            StoreError::Backend { status: 409, .. } => StoreError::UnknownCaption(vote.caption_id),
            other => other,
        })?;
        Ok(())
    }

    async fn list_votes(&self, caption_id: i64) -> Result<Vec<CaptionVoteRow>, StoreError> {
        self.fetch_rows(CAPTION_VOTES, &[("caption_id", format!("eq.{caption_id}"))])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_url_trims_trailing_slash() {
        let store = RestCaptionStore::new("https://backend.example.co/", "key".into()).unwrap();
        assert_eq!(
            store.relation_url(CAPTIONS),
            "https://backend.example.co/rest/v1/captions"
        );
    }

    #[test]
    fn test_backend_error_body_parses_message() {
        let body: BackendErrorBody = serde_json::from_str(
            r#"{"code":"42501","details":null,"hint":null,"message":"permission denied for table captions"}"#,
        )
        .unwrap();
        assert_eq!(body.message, "permission denied for table captions");
    }
}
