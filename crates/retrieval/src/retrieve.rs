use crate::preprocess::preprocess;
use crate::provider::EmbeddingProvider;
use crate::SharedIndex;
use std::sync::Arc;

/// Query-time retrieval: embed the query, search the shared index, map hits
/// back to passage texts.
///
/// Retrieval never fails: a provider error, an empty embedding, or a
/// mismatched embedding width all degrade to an empty context so the caller
/// can still produce some response. `retrieve` performs no mutation, so
/// abandoning a call mid-flight has no side effects.
pub struct RetrievalService {
    index: SharedIndex,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl RetrievalService {
    pub fn new(index: SharedIndex, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { index, embedder }
    }

    /// Return up to `k` passage texts ranked by similarity, best first.
    pub async fn retrieve(&self, query_text: &str, k: usize) -> Vec<String> {
        let processed = preprocess(query_text);

        let query_vector = match self.embedder.embed(&processed).await {
            Ok(vector) if !vector.is_empty() => vector,
            Ok(_) => {
                log::warn!("Query embedding is empty, returning no context");
                return Vec::new();
            }
            Err(err) => {
                log::warn!("Query embedding failed ({err}), returning no context");
                return Vec::new();
            }
        };

        let index = self.index.read().await;
        let hits = match index.search(&query_vector, k) {
            Ok(hits) => hits,
            Err(err) => {
                log::warn!("Index search failed ({err}), returning no context");
                return Vec::new();
            }
        };
        log::debug!("Found {} hits for query", hits.len());

        hits.into_iter()
            .filter_map(|hit| match index.passage(hit.position) {
                Some(passage) => Some(passage.text.clone()),
                None => {
                    log::warn!(
                        "Search hit position {} has no passage, dropping it",
                        hit.position
                    );
                    None
                }
            })
            .collect()
    }
}
