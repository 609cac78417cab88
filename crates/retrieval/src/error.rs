use thiserror::Error;

/// Fatal startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {0}")]
    Missing(&'static str),
}

/// Failures at the embedding/completion provider boundary.
///
/// These never cross the retrieval boundary as errors; callers absorb them
/// into degraded results (empty context, fallback reply).
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}
