use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};

/// A stored text passage paired with its embedding vector.
///
/// Keeping the text and the vector in one record means a search hit can
/// always be mapped back to its source text; there is no separate corpus
/// list to fall out of sync with the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub vector: Vec<f32>,
}

impl Passage {
    pub fn new(text: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            vector,
        }
    }
}

/// A single search result: the passage position and its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub position: usize,
    pub score: f32,
}

/// Exact-search vector index over passages.
///
/// Positions are zero-based insertion order and are the sole identity of a
/// passage; they are stable and never reused (deletions are out of scope).
/// Every vector is L2-normalized on ingestion and every query is normalized
/// before scoring, so the inner product used for ranking equals cosine
/// similarity regardless of what the embedding provider returns.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    passages: Vec<Passage>,
}

impl VectorIndex {
    /// Create an empty index for `dimension`-wide vectors.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(IndexError::InvalidDimension(dimension));
        }
        Ok(Self {
            dimension,
            passages: Vec::new(),
        })
    }

    pub(crate) fn from_parts(dimension: usize, passages: Vec<Passage>) -> Result<Self> {
        let mut index = Self::new(dimension)?;
        index.add(passages)?;
        Ok(index)
    }

    /// Append passages in order, assigning each the next sequential position.
    ///
    /// Validates every vector's dimension before committing anything, so a
    /// mismatch in the middle of a batch leaves the index unchanged.
    pub fn add(&mut self, passages: Vec<Passage>) -> Result<()> {
        for passage in &passages {
            if passage.vector.len() != self.dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dimension,
                    actual: passage.vector.len(),
                });
            }
        }

        for mut passage in passages {
            l2_normalize(&mut passage.vector);
            self.passages.push(passage);
        }
        Ok(())
    }

    /// Search for the `k` nearest passages by cosine similarity.
    ///
    /// Returns `(position, score)` hits sorted by score descending, ties
    /// broken by lower position. `k` is clamped to the index size; an empty
    /// index returns no hits.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut query = query.to_vec();
        l2_normalize(&mut query);

        // Brute-force scoring, O(N * D). Fine for the small corpora this
        // index is meant for.
        let mut hits: Vec<SearchHit> = self
            .passages
            .iter()
            .enumerate()
            .map(|(position, passage)| SearchHit {
                position,
                score: dot(&query, &passage.vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Get the passage at `position`, if any.
    #[must_use]
    pub fn passage(&self, position: usize) -> Option<&Passage> {
        self.passages.get(position)
    }

    /// Whether any stored passage has exactly this text.
    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.passages.iter().any(|p| p.text == text)
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    #[must_use]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scale to unit length in place. Zero-norm vectors are left untouched and
/// score 0 against everything.
fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
