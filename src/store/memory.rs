//! In-memory fallback store.
//!
//! Append-only list of raw texts behind a single `RwLock`, used when the
//! vector engine is unreachable at startup. Not durable — everything is
//! lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AddReceipt, DocumentStore, StoreError, StoreStatus};

/// Linear-scan document store.
///
/// The whole list sits behind one lock; each `add` holds the write guard and
/// each `search` the read guard for the full operation, so concurrent
/// requests never observe a half-applied append.
pub struct MemoryStore {
    docs: RwLock<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add(&self, text: &str) -> Result<AddReceipt, StoreError> {
        let doc_id = Uuid::new_v4().to_string();
        self.docs.write().await.push(text.to_string());

        tracing::debug!(id = %doc_id, "stored document in memory");

        // The id is returned to the caller but not indexed — the memory
        // backend retrieves by content, never by id.
        Ok(AddReceipt {
            id: doc_id,
            status: "added (memory)".to_string(),
        })
    }

    /// Case-insensitive substring scan, in storage order.
    ///
    /// Fallback: when nothing matches and the store is non-empty, the
    /// first-ever stored document is returned instead of an empty list.
    /// This masks "no results found" with a possibly unrelated document;
    /// kept for compatibility with the original behavior. Do not extend it.
    async fn search(&self, query: &str) -> Result<Vec<String>, StoreError> {
        let needle = query.to_lowercase();
        let docs = self.docs.read().await;

        let mut results: Vec<String> = docs
            .iter()
            .filter(|doc| doc.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if results.is_empty() {
            if let Some(first) = docs.first() {
                results = vec![first.clone()];
            }
        }

        Ok(results)
    }

    async fn status(&self) -> StoreStatus {
        StoreStatus {
            backend_ready: true,
            doc_count: self.docs.read().await.len(),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_substring_match_in_storage_order() {
        let store = MemoryStore::new();
        store.add("the cat sat").await.unwrap();
        store.add("a dog ran").await.unwrap();

        let hits = store.search("cat").await.unwrap();
        assert_eq!(hits, vec!["the cat sat".to_string()]);
    }

    #[tokio::test]
    async fn test_match_is_case_insensitive() {
        let store = MemoryStore::new();
        store.add("Paris is the capital of France").await.unwrap();

        let hits = store.search("PARIS").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_no_match_falls_back_to_first_document() {
        let store = MemoryStore::new();
        store.add("the cat sat").await.unwrap();
        store.add("a dog ran").await.unwrap();

        let hits = store.search("zzz").await.unwrap();
        assert_eq!(hits, vec!["the cat sat".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty() {
        let store = MemoryStore::new();
        let hits = store.search("zzz").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_add_returns_distinct_ids() {
        let store = MemoryStore::new();
        let mut ids = std::collections::HashSet::new();
        for _ in 0..50 {
            let receipt = store.add("same text every time").await.unwrap();
            assert_eq!(receipt.status, "added (memory)");
            assert!(ids.insert(receipt.id), "duplicate id returned");
        }
    }

    #[tokio::test]
    async fn test_status_counts_every_add() {
        let store = MemoryStore::new();
        for i in 0..7 {
            store.add(&format!("doc {i}")).await.unwrap();
        }

        let status = store.status().await;
        assert!(status.backend_ready);
        assert_eq!(status.doc_count, 7);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add(&format!("doc {i}")).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.status().await.doc_count, 20);
    }
}
