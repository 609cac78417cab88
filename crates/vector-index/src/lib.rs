//! # Ragbot Vector Index
//!
//! Exact-search vector index over pre-embedded text passages, with JSON
//! persistence.
//!
//! ## Features
//!
//! - **Exact k-NN search** by inner product over unit-normalized vectors
//! - **Paired records**: each stored vector travels with its source text, so
//!   index and corpus cannot drift apart
//! - **Persistent storage** with atomic JSON snapshots
//!
//! ## Example
//!
//! ```no_run
//! use ragbot_vector_index::{IndexStore, Passage, VectorIndex};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ragbot_vector_index::IndexError> {
//!     let store = IndexStore::new("index.json");
//!     let mut index = store.load(3).await?;
//!
//!     index.add(vec![Passage::new("Our office is in Bangkok.", vec![1.0, 0.0, 0.0])])?;
//!     store.save(&index).await?;
//!
//!     for hit in index.search(&[0.9, 0.1, 0.0], 1)? {
//!         println!("{}: {:.3}", hit.position, hit.score);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod index;
mod store;

pub use error::{IndexError, Result};
pub use index::{Passage, SearchHit, VectorIndex};
pub use store::IndexStore;
