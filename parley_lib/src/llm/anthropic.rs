use serde_json::{json, Value};
use crate::config::{ProviderKind, Settings};
use crate::error::Error;
use crate::val_as_str;
use super::provider::{ChatProvider, ChatRequest};
use super::util::{history_to_value, model_or};
use super::Message;

const FALLBACK_MODEL: &str = "claude-2";
const API_VERSION: &str = "2023-06-01";

/// Anthropic messages API.
pub struct AnthropicProvider;

impl AnthropicProvider {

    // `content` is a plain string on older deployments, a list of blocks on the current API.
    fn content_text(content: &Value) -> Result<String, Error> {
        if let Some(text) = content.as_str() {
            if text.is_empty() {
                return Err(Error::Decoding("response contains no text content."));
            }
            return Ok(text.to_owned());
        }

        let blocks = content
            .as_array()
            .ok_or(Error::Decoding("can't enumerate messages in the response."))?;

        let mut text = String::new();
        for block in blocks {
            if block["type"] == "text" {
                text += val_as_str!(block["text"], "text");
            }
        }

        if text.is_empty() {
            return Err(Error::Decoding("response contains no text content."));
        }

        Ok(text)
    }
}

impl ChatProvider for AnthropicProvider {

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn build_request(&self, settings: &Settings, history: &[Message]) -> ChatRequest {
        let payload = json!({
            "model": model_or(&settings.default_model, FALLBACK_MODEL),
            "messages": history_to_value(self.kind(), history),
        });

        ChatRequest {
            url: settings.url("v1/messages"),
            headers: vec![
                ("X-API-Key".to_owned(), settings.api_key.clone()),
                ("anthropic-version".to_owned(), API_VERSION.to_owned()),
            ],
            payload,
        }
    }

    fn extract_reply(&self, body: &Value) -> Result<String, Error> {
        Self::content_text(&body["content"])
    }
}
