use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Invalid index dimension {0} (must be positive)")]
    InvalidDimension(usize),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt index file {path}: {source}")]
    CorruptFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unsupported index schema_version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
}
