//! Application configuration.
//!
//! Resolution order, per field: CLI flag → `RAGD_*` environment variable →
//! built-in default. There is no config file; the whole surface is four
//! values.

/// Runtime configuration assembled at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Base URL of the Qdrant REST endpoint.
    pub qdrant_url: String,
    /// Qdrant collection name this process owns.
    pub collection: String,
    /// Skip the vector backend entirely and serve from memory.
    pub memory_only: bool,
}

impl AppConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8000";
    pub const DEFAULT_QDRANT_URL: &'static str = "http://localhost:6333";
    pub const DEFAULT_COLLECTION: &'static str = "demo_collection";

    /// Build configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("RAGD_ADDR", Self::DEFAULT_BIND_ADDR),
            qdrant_url: env_or("RAGD_QDRANT_URL", Self::DEFAULT_QDRANT_URL),
            collection: env_or("RAGD_COLLECTION", Self::DEFAULT_COLLECTION),
            memory_only: std::env::var("RAGD_MEMORY_ONLY")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: Self::DEFAULT_BIND_ADDR.to_string(),
            qdrant_url: Self::DEFAULT_QDRANT_URL.to_string(),
            collection: Self::DEFAULT_COLLECTION.to_string(),
            memory_only: false,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
