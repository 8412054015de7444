use serde_json::{json, Value};
use crate::config::ProviderKind;
use super::{Message, Role};

/// Get model-specific role for the provider.
pub fn role_to_llm(provider: ProviderKind, role: Role) -> &'static str {
    match provider {
        // Anthropic accepts user and assistant turns only.
        ProviderKind::Anthropic => if role == Role::Assistant { "assistant" } else { "user" },
        ProviderKind::OpenAI | ProviderKind::Together => match role {
            Role::User => "user",
            Role::Assistant => "assistant",
        },
    }
}

/// History in the provider's role vocabulary.
pub fn history_to_value(provider: ProviderKind, history: &[Message]) -> Value {
    Value::Array(history.iter()
        .map(|msg| json!({
            "role": role_to_llm(provider, msg.role),
            "content": msg.content,
        }))
        .collect())
}

/// Model name, or the provider fallback when none is configured.
pub fn model_or<'a>(default_model: &'a str, fallback: &'a str) -> &'a str {
    if default_model.is_empty() { fallback } else { default_model }
}

/// Best-effort error text of a failed response.
pub fn error_message(body: &Value) -> String {
    if let Some(msg) = body["error"]["message"].as_str() {
        msg.to_owned()
    } else if let Some(msg) = body["error"].as_str() {
        msg.to_owned()
    } else if let Some(text) = body.as_str() {
        text.to_owned()
    } else if body.is_null() {
        "empty response".to_owned()
    } else {
        body.to_string()
    }
}

/// Interpret value as str
#[macro_export(local_inner_macros)]
macro_rules! val_as_str {
    ($val:expr, $element:literal) => {
        $val
            .as_str()
            .ok_or(Error::Decoding(std::concat!("can't extract ", $element, " from API response.")))?
    }
}
