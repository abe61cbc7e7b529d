//! Qdrant-backed store — HTTP client for the vector engine REST API.
//!
//! Talks to Qdrant over its REST interface (default `http://localhost:6333`).
//! Only the subset this service depends on is implemented: collection
//! recreate, point upsert, top-k search, and collection info.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use super::{AddReceipt, DocumentStore, StoreError, StoreStatus, SEARCH_LIMIT};
use crate::embedding::{Embedder, EMBEDDING_DIM};

/// Document store delegating similarity search to a Qdrant collection.
pub struct QdrantStore {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    embedder: Embedder,
}

impl QdrantStore {
    /// Connect to the engine and (re)provision the collection.
    ///
    /// The collection is dropped and recreated with a fixed configuration:
    /// vector size [`EMBEDDING_DIM`], cosine distance. Any failure here is
    /// fatal for this backend and propagates to backend selection.
    pub async fn connect(
        base_url: &str,
        collection: &str,
        embedder: Embedder,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let store = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            embedder,
        };

        store.recreate_collection().await?;
        Ok(store)
    }

    /// Idempotent recreate: delete (404 is fine), then create.
    async fn recreate_collection(&self) -> Result<(), StoreError> {
        // A missing collection is not an error; anything else (including an
        // unreachable engine) is.
        self.http
            .delete(self.collection_url())
            .send()
            .await?;

        let resp = self
            .http
            .put(self.collection_url())
            .json(&serde_json::json!({
                "vectors": {
                    "size": EMBEDDING_DIM,
                    "distance": "Cosine",
                }
            }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::EngineStatus(resp.status()))
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }
}

#[async_trait]
impl DocumentStore for QdrantStore {
    async fn add(&self, text: &str) -> Result<AddReceipt, StoreError> {
        let vector = self.embedder.embed(text);
        let doc_id = Uuid::new_v4().to_string();

        // wait=true so the point is queryable as soon as the call returns.
        let resp = self
            .http
            .put(format!("{}/points?wait=true", self.collection_url()))
            .json(&serde_json::json!({
                "points": [{
                    "id": doc_id,
                    "vector": vector,
                    "payload": { "text": text },
                }]
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(StoreError::EngineStatus(resp.status()));
        }

        tracing::debug!(id = %doc_id, "upserted document into Qdrant");

        Ok(AddReceipt {
            id: doc_id,
            status: "added (qdrant)".to_string(),
        })
    }

    /// Top-2 nearest points by cosine similarity, payload texts in
    /// descending-score order.
    async fn search(&self, query: &str) -> Result<Vec<String>, StoreError> {
        let vector = self.embedder.embed(query);

        let resp = self
            .http
            .post(format!("{}/points/search", self.collection_url()))
            .json(&serde_json::json!({
                "vector": vector,
                "limit": SEARCH_LIMIT,
                "with_payload": true,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(StoreError::EngineStatus(resp.status()));
        }

        let body: SearchResponse = resp.json().await?;

        let mut texts = Vec::with_capacity(body.result.len());
        for point in body.result {
            match point.payload.and_then(|p| p.text) {
                Some(text) => texts.push(text),
                // Points are always upserted with a text payload; a hole
                // here means someone wrote to the collection out-of-band.
                None => tracing::warn!("search hit without text payload — skipping"),
            }
        }
        Ok(texts)
    }

    /// Live collection snapshot. Engine errors fold into `not ready` rather
    /// than failing the status call.
    async fn status(&self) -> StoreStatus {
        let info = async {
            let resp = self.http.get(self.collection_url()).send().await?;
            if !resp.status().is_success() {
                return Err(StoreError::EngineStatus(resp.status()));
            }
            Ok::<_, StoreError>(resp.json::<CollectionInfoResponse>().await?)
        }
        .await;

        match info {
            Ok(body) => StoreStatus {
                backend_ready: true,
                doc_count: body.result.points_count.unwrap_or(0) as usize,
            },
            Err(e) => {
                tracing::warn!("Qdrant status check failed: {e}");
                StoreStatus {
                    backend_ready: false,
                    doc_count: 0,
                }
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "qdrant"
    }
}

// ============================================================================
// Wire types (Qdrant REST subset)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    #[allow(dead_code)]
    score: f32,
    payload: Option<PointPayload>,
}

#[derive(Debug, Deserialize)]
struct PointPayload {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CollectionInfoResponse {
    result: CollectionInfo,
}

#[derive(Debug, Deserialize)]
struct CollectionInfo {
    points_count: Option<u64>,
}
