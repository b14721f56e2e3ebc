//! The capability seams injected into the pipeline: the session backend
//! and the optional LLM text generator. Both are `async_trait` object-safe
//! traits so `scam-honeypot-pipeline` can be built against `Arc<dyn ..>`
//! without knowing which backend/provider it got.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::Session;

/// Abstract session backend. Implemented by the in-memory and shared-cache
/// backends in `scam-honeypot-persistence`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Session>>;
    async fn set(&self, id: &str, session: &Session) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<bool>;
    async fn exists(&self, id: &str) -> Result<bool>;
    /// Sweeps expired sessions and returns how many were removed.
    async fn cleanup_expired(&self) -> Result<usize>;
    /// The set of session ids currently considered live by this backend.
    async fn active_ids(&self) -> Result<Vec<String>>;
}

/// The optional LLM capability. Absent (no provider configured) means the
/// response generator always takes the template path.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}
