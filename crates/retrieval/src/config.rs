use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DIMENSION: usize = 1536;
pub const DEFAULT_TOP_K: usize = 3;

const DEFAULT_INDEX_PATH: &str = "index.json";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a support assistant. Answer the user's question using the provided context.";

/// Core configuration for the retrieval subsystem.
#[derive(Debug, Clone)]
pub struct Config {
    /// Embedding vector dimension, fixed at process start.
    pub dimension: usize,
    /// Where the index snapshot is persisted.
    pub index_path: PathBuf,
    /// Number of neighbors to retrieve per query.
    pub top_k: usize,
    /// Ordered seed corpus embedded at bootstrap.
    pub seed_texts: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Parse configuration through an injectable variable lookup, so tests
    /// do not have to mutate process-global environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dimension = match lookup("VECTOR_DIMENSION") {
            Some(raw) => parse_positive("VECTOR_DIMENSION", &raw)?,
            None => DEFAULT_DIMENSION,
        };

        let top_k = match lookup("RETRIEVAL_TOP_K") {
            Some(raw) => parse_positive("RETRIEVAL_TOP_K", &raw)?,
            None => DEFAULT_TOP_K,
        };

        let index_path =
            PathBuf::from(lookup("INDEX_PATH").unwrap_or_else(|| DEFAULT_INDEX_PATH.to_string()));

        let seed_texts = match lookup("INITIAL_TEXTS") {
            Some(raw) => {
                serde_json::from_str::<Vec<String>>(&raw).map_err(|err| {
                    ConfigError::InvalidValue {
                        name: "INITIAL_TEXTS",
                        value: raw,
                        reason: format!("expected a JSON array of strings: {err}"),
                    }
                })?
            }
            None => Vec::new(),
        };

        Ok(Self {
            dimension,
            index_path,
            top_k,
            seed_texts,
        })
    }
}

/// Settings for the OpenAI-backed providers, parsed separately so commands
/// that never call a provider do not require an API key.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
    pub system_prompt: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let temperature = match lookup("CHAT_TEMPERATURE") {
            Some(raw) => raw.parse::<f32>().map_err(|err| ConfigError::InvalidValue {
                name: "CHAT_TEMPERATURE",
                value: raw,
                reason: err.to_string(),
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let timeout_secs = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(raw) => parse_positive("OPENAI_TIMEOUT_SECS", &raw)? as u64,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            embedding_model: lookup("OPENAI_EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            chat_model: lookup("OPENAI_CHAT_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            temperature,
            system_prompt: lookup("CHAT_SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        Ok(_) => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: "must be positive".to_string(),
        }),
        Err(err) => Err(ConfigError::InvalidValue {
            name,
            value: raw.to_string(),
            reason: err.to_string(),
        }),
    }
}
