use crate::config::OpenAiConfig;
use crate::error::ProviderError;
use crate::provider::{CompletionProvider, EmbeddingProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI-backed implementation of both provider boundaries.
///
/// Every request carries the configured client-level timeout, so embedding
/// and completion calls are bounded suspension points.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let response = self
            .http
            .post(EMBEDDINGS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&EmbeddingRequest {
                input: text,
                model: &self.config.embedding_model,
            })
            .send()
            .await?
            .error_for_status()?;

        let body: EmbeddingResponse = response.json().await?;
        let embedding = body
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("embeddings response has no data".to_string())
            })?;

        log::debug!("Embedded text into {} dimensions", embedding.len());
        Ok(embedding)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, user_text: &str, context: &str) -> Result<String, ProviderError> {
        let context_message = format!("Relevant context: {context}");
        let request = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "system",
                    content: &context_message,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("chat response has no choices".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedding_response_parses() {
        let raw = r#"{
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, -0.2, 0.3]}],
            "model": "text-embedding-3-small"
        }"#;
        let parsed: EmbeddingResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data[0].embedding, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn chat_response_parses() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Bangkok."}}]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Bangkok.");
    }

    #[test]
    fn chat_request_serializes_messages_in_order() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "prompt",
                },
                ChatMessage {
                    role: "user",
                    content: "question",
                },
            ],
            temperature: 0.7,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "question");
        assert_eq!(value["model"], "gpt-4o-mini");
    }
}
