//! ragd: retrieval-augmented answer daemon.
//!
//! Answers natural-language questions by retrieving previously stored text
//! snippets and composing a templated answer from them.
//!
//! ## Architecture
//!
//! - **Embedder**: deterministic placeholder text → vector function
//! - **DocumentStore**: pluggable storage — Qdrant or in-memory fallback
//! - **RagWorkflow**: linear retrieve → answer pipeline
//! - **Controller**: façade routing HTTP calls to store and pipeline

pub mod api;
pub mod config;
pub mod controller;
pub mod embedding;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use config::AppConfig;
pub use controller::{Controller, StatusReport};
pub use embedding::{Embedder, EMBEDDING_DIM};
pub use store::{AddReceipt, DocumentStore, MemoryStore, QdrantStore, StoreError, StoreStatus};
pub use workflow::{AskOutcome, RagWorkflow};
