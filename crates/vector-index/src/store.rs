use crate::error::{IndexError, Result};
use crate::index::{Passage, VectorIndex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const INDEX_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedIndex {
    schema_version: u32,
    dimension: usize,
    passages: Vec<Passage>,
}

/// Owns the on-disk snapshot of a [`VectorIndex`].
///
/// The snapshot is a single JSON file, overwritten on every save. Saves go
/// through a temporary file and a rename, so a concurrent reader never
/// observes a partially written snapshot.
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted index, or return a fresh empty index of the
    /// configured dimension when no snapshot exists yet.
    ///
    /// A snapshot that exists but cannot be read or parsed is an error; no
    /// valid index can be constructed from it and callers treat this as
    /// fatal at startup.
    pub async fn load(&self, dimension: usize) -> Result<VectorIndex> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let persisted: PersistedIndex =
                    serde_json::from_slice(&bytes).map_err(|source| IndexError::CorruptFile {
                        path: self.path.clone(),
                        source,
                    })?;
                if persisted.schema_version != INDEX_SCHEMA_VERSION {
                    return Err(IndexError::UnsupportedSchema {
                        found: persisted.schema_version,
                        expected: INDEX_SCHEMA_VERSION,
                    });
                }
                if persisted.dimension != dimension {
                    return Err(IndexError::DimensionMismatch {
                        expected: dimension,
                        actual: persisted.dimension,
                    });
                }
                let index = VectorIndex::from_parts(persisted.dimension, persisted.passages)?;
                log::info!(
                    "Loaded index with {} passages from {:?}",
                    index.len(),
                    self.path
                );
                Ok(index)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No index snapshot at {:?}, starting with an empty index",
                    self.path
                );
                VectorIndex::new(dimension)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Persist the full index state, creating missing parent directories.
    pub async fn save(&self, index: &VectorIndex) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let persisted = PersistedIndex {
            schema_version: INDEX_SCHEMA_VERSION,
            dimension: index.dimension(),
            passages: index.passages().to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&persisted)
            .map_err(|err| IndexError::IoError(std::io::Error::other(err)))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        log::info!("Saved index with {} passages to {:?}", index.len(), self.path);
        Ok(())
    }
}
