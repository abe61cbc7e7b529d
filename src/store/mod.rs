//! Document storage backends.
//!
//! Abstracts document persistence and retrieval behind one trait so the
//! answer pipeline never knows which backend it is talking to:
//! - `QdrantStore`: similarity search delegated to an external Qdrant engine
//! - `MemoryStore`: linear substring scan over a process-held list
//!
//! Backend selection happens once at startup via [`select_backend`]: try
//! Qdrant, fall back to memory if the engine is unreachable.

mod memory;
mod qdrant;

pub use memory::MemoryStore;
pub use qdrant::QdrantStore;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::embedding::Embedder;

/// Maximum number of hits requested from the vector engine per query.
pub const SEARCH_LIMIT: usize = 2;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("vector engine returned status {0}")]
    EngineStatus(reqwest::StatusCode),
    #[error("unexpected engine payload: {0}")]
    BadPayload(String),
}

/// Result of a successful `add` call.
#[derive(Debug, Clone, Serialize)]
pub struct AddReceipt {
    /// Freshly generated document id (UUID v4).
    pub id: String,
    /// Backend-tagged status string, e.g. `"added (memory)"`.
    pub status: String,
}

/// Point-in-time backend snapshot, recomputed on every call — never cached.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreStatus {
    /// Whether the backend can currently serve requests.
    pub backend_ready: bool,
    /// Number of stored documents (collection size or list length).
    pub doc_count: usize,
}

/// Trait for pluggable document storage backends.
///
/// Implementations must be thread-safe (Send + Sync) for shared access
/// across async request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `text`, returning a fresh unique id and a backend-tagged status.
    ///
    /// Must not silently drop the document: any failure surfaces as `Err`.
    async fn add(&self, text: &str) -> Result<AddReceipt, StoreError>;

    /// Return texts judged relevant to `query`, most relevant first where
    /// the backend can rank them.
    async fn search(&self, query: &str) -> Result<Vec<String>, StoreError>;

    /// Live readiness + document count snapshot.
    async fn status(&self) -> StoreStatus;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Pick the storage backend, once, before serving begins.
///
/// Attempts Qdrant first (unless `memory_only` is set) and falls back to the
/// in-memory store only on **construction** failure — runtime errors after
/// selection propagate to callers and never re-trigger this fallback.
pub async fn select_backend(config: &AppConfig, embedder: Embedder) -> Arc<dyn DocumentStore> {
    if config.memory_only {
        tracing::info!("Backend: in-memory store (--memory-only)");
        return Arc::new(MemoryStore::new());
    }

    match QdrantStore::connect(&config.qdrant_url, &config.collection, embedder).await {
        Ok(store) => {
            tracing::info!(
                url = %config.qdrant_url,
                collection = %config.collection,
                "Backend: Qdrant"
            );
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Qdrant not available ({e}). Falling back to in-memory list.");
            Arc::new(MemoryStore::new())
        }
    }
}
