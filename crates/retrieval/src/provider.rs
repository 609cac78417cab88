use crate::error::ProviderError;
use async_trait::async_trait;

/// Boundary to an external embedding service.
///
/// Implementations turn text into a fixed-dimension vector. Failures are
/// reported as [`ProviderError`]; callers in this crate absorb them rather
/// than propagating, so one failed embed never takes down retrieval.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Boundary to an external text-generation service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, user_text: &str, context: &str) -> Result<String, ProviderError>;
}
