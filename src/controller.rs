//! Request façade between the HTTP layer and the core services.
//!
//! Routes add/ask/status calls to the document store and the answer
//! pipeline. Carries no business logic of its own.

use std::sync::Arc;

use serde::Serialize;

use crate::store::{AddReceipt, DocumentStore, StoreError};
use crate::workflow::{AskOutcome, RagWorkflow};

/// Combined status of the storage backend and the answer pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Whether the vector engine is serving this process. False when the
    /// in-memory fallback is active or the engine stopped responding.
    pub qdrant_ready: bool,
    /// Documents currently stored in the active backend.
    pub docs_count: usize,
    /// Whether the pipeline stage graph was constructed.
    pub graph_ready: bool,
}

/// Controls the flow of data between the external API layer and the
/// internal services.
pub struct Controller {
    workflow: Arc<RagWorkflow>,
    store: Arc<dyn DocumentStore>,
}

impl Controller {
    pub fn new(workflow: Arc<RagWorkflow>, store: Arc<dyn DocumentStore>) -> Self {
        Self { workflow, store }
    }

    /// Store a new document, returning its id and a backend-tagged status.
    pub async fn handle_add(&self, text: &str) -> Result<AddReceipt, StoreError> {
        self.store.add(text).await
    }

    /// Run a question through the retrieve → answer pipeline.
    pub async fn handle_ask(&self, question: &str) -> Result<AskOutcome, StoreError> {
        self.workflow.run_query(question).await
    }

    /// Snapshot backend readiness, document count, and pipeline readiness.
    ///
    /// The `qdrant_ready` flag reports vector-engine readiness even when the
    /// memory backend is active (it is then simply false) — the field name is
    /// part of the wire contract.
    pub async fn handle_status(&self) -> StatusReport {
        let storage = self.store.status().await;
        StatusReport {
            qdrant_ready: storage.backend_ready && self.store.backend_name() == "qdrant",
            docs_count: storage.doc_count,
            graph_ready: self.workflow.is_ready(),
        }
    }

    /// Active backend name, for logging and the health probe.
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn memory_controller() -> Controller {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let workflow = Arc::new(RagWorkflow::new(store.clone()));
        Controller::new(workflow, store)
    }

    #[tokio::test]
    async fn test_status_reports_memory_backend_as_not_qdrant() {
        let controller = memory_controller();
        let report = controller.handle_status().await;

        assert!(!report.qdrant_ready);
        assert!(report.graph_ready);
        assert_eq!(report.docs_count, 0);
    }

    #[tokio::test]
    async fn test_add_then_ask_round_trip() {
        let controller = memory_controller();

        let receipt = controller
            .handle_add("Paris is the capital of France")
            .await
            .unwrap();
        assert_eq!(receipt.status, "added (memory)");

        let outcome = controller.handle_ask("capital of France").await.unwrap();
        assert_eq!(
            outcome.answer,
            "I found this: 'Paris is the capital of France...'"
        );

        let report = controller.handle_status().await;
        assert_eq!(report.docs_count, 1);
    }
}
