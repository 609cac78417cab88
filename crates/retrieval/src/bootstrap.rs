use crate::preprocess::preprocess;
use crate::provider::EmbeddingProvider;
use ragbot_vector_index::{IndexError, IndexStore, Passage, VectorIndex};
use std::sync::Arc;

/// Populates the index from the configured seed corpus at process start.
///
/// Must run to completion before any query is served; the surrounding
/// process sequences that. Owns the index exclusively until it returns.
pub struct CorpusBootstrapper {
    store: IndexStore,
    embedder: Arc<dyn EmbeddingProvider>,
    dimension: usize,
}

impl CorpusBootstrapper {
    pub fn new(store: IndexStore, embedder: Arc<dyn EmbeddingProvider>, dimension: usize) -> Self {
        Self {
            store,
            embedder,
            dimension,
        }
    }

    /// Load the persisted index, embed every seed text not already present,
    /// append the successful embeddings in seed order, and persist.
    ///
    /// A seed whose embedding fails is logged and skipped; the remaining
    /// seeds keep their relative order. A corrupt snapshot on load and a
    /// failed save are both fatal here, since index state would be lost.
    /// Seeds whose exact text is already in the index are skipped, so
    /// repeated bootstraps across restarts do not duplicate entries.
    pub async fn bootstrap(&self, seed_texts: &[String]) -> Result<VectorIndex, IndexError> {
        let mut index = self.store.load(self.dimension).await?;
        let before = index.len();

        let mut passages = Vec::new();
        for text in seed_texts {
            if index.contains_text(text) {
                log::debug!("Seed text already indexed, skipping: {text}");
                continue;
            }

            let processed = preprocess(text);
            match self.embedder.embed(&processed).await {
                Ok(vector) if !vector.is_empty() => {
                    passages.push(Passage::new(text.clone(), vector));
                }
                Ok(_) => {
                    log::warn!("Empty embedding for seed text, skipping: {text}");
                }
                Err(err) => {
                    log::warn!("Failed to embed seed text ({err}), skipping: {text}");
                }
            }
        }

        index.add(passages)?;
        self.store.save(&index).await?;

        log::info!(
            "Bootstrap complete: {} seed texts, {} passages indexed ({} new)",
            seed_texts.len(),
            index.len(),
            index.len() - before
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct MapEmbedder {
        vectors: HashMap<String, Vec<f32>>,
        calls: AtomicUsize,
    }

    impl MapEmbedder {
        fn new(pairs: &[(&str, Vec<f32>)]) -> Arc<Self> {
            Arc::new(Self {
                vectors: pairs
                    .iter()
                    .map(|(text, vector)| ((*text).to_string(), vector.clone()))
                    .collect(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MapEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.vectors
                .get(text)
                .cloned()
                .ok_or_else(|| ProviderError::MalformedResponse(format!("no embedding: {text}")))
        }
    }

    fn seeds(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| (*t).to_string()).collect()
    }

    #[tokio::test]
    async fn populates_empty_index_in_seed_order() {
        let tmp = TempDir::new().unwrap();
        let embedder = MapEmbedder::new(&[
            ("alpha", vec![1.0, 0.0]),
            ("beta", vec![0.0, 1.0]),
        ]);
        let bootstrapper = CorpusBootstrapper::new(
            IndexStore::new(tmp.path().join("index.json")),
            embedder,
            2,
        );

        let index = bootstrapper.bootstrap(&seeds(&["alpha", "beta"])).await.unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.passage(0).map(|p| p.text.as_str()), Some("alpha"));
        assert_eq!(index.passage(1).map(|p| p.text.as_str()), Some("beta"));

        // Persisted too.
        let reloaded = IndexStore::new(tmp.path().join("index.json"))
            .load(2)
            .await
            .unwrap();
        assert_eq!(reloaded.len(), 2);
    }

    #[tokio::test]
    async fn failed_embeddings_are_skipped_and_order_preserved() {
        let tmp = TempDir::new().unwrap();
        let embedder = MapEmbedder::new(&[
            ("first", vec![1.0, 0.0]),
            ("third", vec![0.0, 1.0]),
        ]);
        let bootstrapper = CorpusBootstrapper::new(
            IndexStore::new(tmp.path().join("index.json")),
            embedder,
            2,
        );

        let index = bootstrapper
            .bootstrap(&seeds(&["first", "unembeddable", "third"]))
            .await
            .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.passage(0).map(|p| p.text.as_str()), Some("first"));
        assert_eq!(index.passage(1).map(|p| p.text.as_str()), Some("third"));
    }

    #[tokio::test]
    async fn repeated_bootstrap_does_not_duplicate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        let embedder = MapEmbedder::new(&[
            ("alpha", vec![1.0, 0.0]),
            ("beta", vec![0.0, 1.0]),
        ]);

        let bootstrapper = CorpusBootstrapper::new(
            IndexStore::new(&path),
            Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
            2,
        );
        let first = bootstrapper.bootstrap(&seeds(&["alpha", "beta"])).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);

        // Fresh bootstrapper against the now-populated snapshot, as after a
        // process restart: no new entries, no embedding calls spent.
        let bootstrapper = CorpusBootstrapper::new(
            IndexStore::new(&path),
            Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
            2,
        );
        let second = bootstrapper.bootstrap(&seeds(&["alpha", "beta"])).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn new_seeds_append_after_existing_entries() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        let embedder = MapEmbedder::new(&[
            ("alpha", vec![1.0, 0.0]),
            ("gamma", vec![0.5, 0.5]),
        ]);

        let bootstrapper = CorpusBootstrapper::new(
            IndexStore::new(&path),
            Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
            2,
        );
        bootstrapper.bootstrap(&seeds(&["alpha"])).await.unwrap();

        let index = bootstrapper
            .bootstrap(&seeds(&["alpha", "gamma"]))
            .await
            .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.passage(0).map(|p| p.text.as_str()), Some("alpha"));
        assert_eq!(index.passage(1).map(|p| p.text.as_str()), Some("gamma"));
    }

    #[tokio::test]
    async fn zero_successful_embeddings_saves_unchanged_index() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        let embedder = MapEmbedder::new(&[]);
        let bootstrapper = CorpusBootstrapper::new(IndexStore::new(&path), embedder, 2);

        let index = bootstrapper.bootstrap(&seeds(&["nope"])).await.unwrap();
        assert!(index.is_empty());
        assert!(path.exists());
    }
}
