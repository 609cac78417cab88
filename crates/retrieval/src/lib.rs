//! # Ragbot Retrieval
//!
//! Retrieval-augmented chat responder core: embeds a user query, finds the
//! most similar passages in a [`ragbot_vector_index::VectorIndex`], and hands
//! them to a completion provider as context.
//!
//! ## Architecture
//!
//! ```text
//! seed texts ──> CorpusBootstrapper ──> VectorIndex <── IndexStore (disk)
//!                                           │
//! user query ──> EmbeddingProvider ──> VectorIndex::search
//!                                           │
//!                                    RetrievalService ──> ranked passages
//!                                           │
//!                                     ChatResponder ──> CompletionProvider
//! ```
//!
//! The index is shared behind [`SharedIndex`]; queries take the read side,
//! the bootstrapper owns the index exclusively before it is shared.

mod bootstrap;
mod config;
mod error;
mod openai;
mod preprocess;
mod provider;
mod responder;
mod retrieve;

pub use bootstrap::CorpusBootstrapper;
pub use config::{Config, OpenAiConfig, DEFAULT_DIMENSION, DEFAULT_TOP_K};
pub use error::{ConfigError, ProviderError};
pub use openai::OpenAiClient;
pub use preprocess::preprocess;
pub use provider::{CompletionProvider, EmbeddingProvider};
pub use responder::{ChatResponder, FALLBACK_REPLY};
pub use retrieve::RetrievalService;

use ragbot_vector_index::VectorIndex;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The index as shared by every in-flight query.
///
/// Constructed once at startup, after bootstrap, and cloned into each
/// handler; nothing reloads it from disk per request.
pub type SharedIndex = Arc<RwLock<VectorIndex>>;

/// Wrap a bootstrapped index for concurrent use.
pub fn share_index(index: VectorIndex) -> SharedIndex {
    Arc::new(RwLock::new(index))
}
