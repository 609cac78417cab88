use crate::provider::CompletionProvider;
use crate::retrieve::RetrievalService;
use std::sync::Arc;

/// Reply sent when the completion provider fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request.";

/// Full reply path: retrieve context passages for the user's message, then
/// ask the completion provider for an answer grounded in them.
pub struct ChatResponder {
    retrieval: RetrievalService,
    completion: Arc<dyn CompletionProvider>,
    top_k: usize,
}

impl ChatResponder {
    pub fn new(
        retrieval: RetrievalService,
        completion: Arc<dyn CompletionProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            retrieval,
            completion,
            top_k,
        }
    }

    /// Produce a reply. Never fails: a failed retrieval means an empty
    /// context, a failed completion means the fallback reply.
    pub async fn respond(&self, user_text: &str) -> String {
        let passages = self.retrieval.retrieve(user_text, self.top_k).await;
        log::info!("Responding with {} context passages", passages.len());

        let context = passages.join(". ");
        match self.completion.complete(user_text, &context).await {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Completion failed ({err}), sending fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
