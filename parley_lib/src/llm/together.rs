use serde_json::Value;
use crate::config::{ProviderKind, Settings};
use crate::error::Error;
use super::openai::{chat_completions_request, first_choice_content};
use super::provider::{ChatProvider, ChatRequest};
use super::Message;

const FALLBACK_MODEL: &str = "togethercomputer/llama-2-70b-chat";

/// Together chat completions (OpenAI-compatible, versioned path).
pub struct TogetherProvider;

impl ChatProvider for TogetherProvider {

    fn kind(&self) -> ProviderKind {
        ProviderKind::Together
    }

    fn build_request(&self, settings: &Settings, history: &[Message]) -> ChatRequest {
        chat_completions_request(self.kind(), settings, history, "v1/chat/completions", FALLBACK_MODEL)
    }

    fn extract_reply(&self, body: &Value) -> Result<String, Error> {
        first_choice_content(body)
    }
}
