use serde_json::{json, Value};
use crate::config::{ProviderKind, Settings};
use crate::error::Error;
use crate::val_as_str;
use super::provider::{ChatProvider, ChatRequest};
use super::util::{history_to_value, model_or};
use super::Message;

const FALLBACK_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat completions.
pub struct OpenAIProvider;

/// Chat completions request shared by OpenAI-compatible providers.
pub(super) fn chat_completions_request(provider: ProviderKind, settings: &Settings, history: &[Message], path: &str, fallback_model: &str) -> ChatRequest {
    let token = format!("Bearer {}", settings.api_key);

    let payload = json!({
        "model": model_or(&settings.default_model, fallback_model),
        "messages": history_to_value(provider, history),
        "stream": false,
    });

    ChatRequest {
        url: settings.url(path),
        headers: vec![("Authorization".to_owned(), token)],
        payload,
    }
}

/// Content of the first choice.
pub(super) fn first_choice_content(body: &Value) -> Result<String, Error> {
    let choice = body["choices"]
        .as_array()
        .ok_or(Error::Decoding("unexpected answer format, can't enumerate response choices."))?
        .first()
        .ok_or(Error::Decoding("response contains no choices."))?;

    Ok(val_as_str!(choice["message"]["content"], "message content").to_owned())
}

impl ChatProvider for OpenAIProvider {

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn build_request(&self, settings: &Settings, history: &[Message]) -> ChatRequest {
        chat_completions_request(self.kind(), settings, history, "chat/completions", FALLBACK_MODEL)
    }

    fn extract_reply(&self, body: &Value) -> Result<String, Error> {
        first_choice_content(body)
    }
}
