use tracing::{debug, warn};
use crate::config::Settings;
use crate::error::Error;
use crate::llm::util::error_message;
use crate::llm::{ChatRequest, Message, ProviderRegistry};
use crate::request::Client;

/// Chat history and the state of the last send.
pub struct ConversationManager {
    messages: Vec<Message>,
    loading: bool,
    error: Option<String>,
    client: Box<dyn Client>,
    providers: ProviderRegistry,
}

impl ConversationManager {

    /// Create manager with all known providers.
    pub fn new(client: Box<dyn Client>) -> Self {
        Self::with_providers(client, ProviderRegistry::default())
    }

    /// Create manager with a custom set of providers.
    pub fn with_providers(client: Box<dyn Client>, providers: ProviderRegistry) -> Self {
        ConversationManager {
            messages: vec![],
            loading: false,
            error: None,
            client,
            providers,
        }
    }

    /// Chat history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// A request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed send.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Append user message, send the whole history, append the reply.
    /// On failure the user message stays in the history.
    pub fn send_message(&mut self, settings: &Settings, content: &str) -> Result<&Message, Error> {
        if settings.api_endpoint.is_empty() {
            return Err(Error::Configuration("API endpoint is not set."));
        }
        if settings.api_key.is_empty() {
            return Err(Error::Configuration("API key is not set."));
        }

        self.messages.push(Message::user(content.to_owned()));

        self.loading = true;
        self.error = None;

        let result = self.exchange(settings);

        self.loading = false;

        match result {
            Ok(reply) => {
                self.messages.push(Message::assistant(reply));
                Ok(&self.messages[self.messages.len() - 1])
            }
            Err(err) => {
                warn!(provider = %settings.api_type, "send failed: {err}");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn exchange(&self, settings: &Settings) -> Result<String, Error> {
        let provider = self.providers.get(settings.api_type)?;

        let ChatRequest { url, headers, payload } = provider.build_request(settings, &self.messages);
        let headers: Vec<(&str, &str)> = headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        debug!(provider = %settings.api_type, messages = self.messages.len(), "sending chat request");

        let response = self.client.post_json(&url, payload, &headers)?;

        if !response.is_success() {
            return Err(Error::ApiRequest {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        provider.extract_reply(&response.body)
    }

    /// Drop the history and the last error.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use crate::config::ProviderKind;
    use crate::llm::{AnthropicProvider, OpenAIProvider, Role};
    use crate::request::stub::{Exchange, Reply, StubClient};
    use super::*;

    fn settings(endpoint: &str, key: &str, api_type: ProviderKind) -> Settings {
        Settings {
            api_endpoint: endpoint.to_owned(),
            api_key: key.to_owned(),
            api_type,
            default_model: String::new(),
        }
    }

    fn openai_settings() -> Settings {
        settings("https://api.openai.com/v1", "<api-key>", ProviderKind::OpenAI)
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    fn openai_exchange(messages: Value, reply: Reply) -> Exchange {
        Exchange::post(
            "https://api.openai.com/v1/chat/completions",
            &[("Authorization", "Bearer <api-key>")],
            json!({ "model": "gpt-3.5-turbo", "messages": messages, "stream": false }),
            reply,
        )
    }

    #[test]
    fn test_send_message_ok() {
        let client = StubClient::new(vec![
            openai_exchange(
                json!([{ "role": "user", "content": "hi" }]),
                Reply::Json(200, completion("hello")),
            ),
            openai_exchange(
                json!([
                    { "role": "user", "content": "hi" },
                    { "role": "assistant", "content": "hello" },
                    { "role": "user", "content": "how are you?" }
                ]),
                Reply::Json(200, completion("fine")),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));
        let settings = openai_settings();

        let reply = chat.send_message(&settings, "hi").expect("reply");
        assert_eq!(reply, &Message::assistant("hello".to_owned()));

        assert_eq!(chat.messages(), &[
            Message::user("hi".to_owned()),
            Message::assistant("hello".to_owned()),
        ]);
        assert!(!chat.is_loading());
        assert_eq!(chat.error(), None);

        chat.send_message(&settings, "how are you?").expect("reply");
        assert_eq!(chat.messages().len(), 4);
        assert_eq!(chat.messages()[3].role, Role::Assistant);
        assert_eq!(chat.messages()[3].content, "fine");
    }

    #[test]
    fn test_send_message_not_configured() {
        let mut chat = ConversationManager::new(Box::new(StubClient::unreachable()));

        let no_key = settings("https://api.openai.com/v1", "", ProviderKind::OpenAI);
        assert!(matches!(chat.send_message(&no_key, "hi"), Err(Error::Configuration(_))));

        let no_endpoint = settings("", "<api-key>", ProviderKind::OpenAI);
        assert!(matches!(chat.send_message(&no_endpoint, "hi"), Err(Error::Configuration(_))));

        assert!(chat.messages().is_empty());
        assert_eq!(chat.error(), None);
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_send_message_api_error() {
        let client = StubClient::new(vec![
            openai_exchange(
                json!([{ "role": "user", "content": "hi" }]),
                Reply::Json(429, json!({
                    "error": {
                        "code": "insufficient_quota",
                        "message": "You exceeded your current quota.",
                        "param": null,
                        "type": "insufficient_quota"
                    }
                })),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));

        let result = chat.send_message(&openai_settings(), "hi");

        match result {
            Err(Error::ApiRequest { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "You exceeded your current quota.");
            }
            _ => panic!("type mismatch"),
        }
        assert_eq!(chat.messages(), &[Message::user("hi".to_owned())]);
        assert!(chat.error().is_some_and(|e| !e.is_empty()));
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_send_message_transport_and_decoding_errors() {
        let client = StubClient::new(vec![
            openai_exchange(
                json!([{ "role": "user", "content": "a" }]),
                Reply::Fail("connection reset"),
            ),
            openai_exchange(
                json!([{ "role": "user", "content": "a" }, { "role": "user", "content": "b" }]),
                Reply::Json(200, json!({ "object": "chat.completion" })),
            ),
            openai_exchange(
                json!([
                    { "role": "user", "content": "a" },
                    { "role": "user", "content": "b" },
                    { "role": "user", "content": "c" }
                ]),
                Reply::Json(200, json!({ "choices": [{ "message": {} }] })),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));
        let settings = openai_settings();

        assert!(chat.send_message(&settings, "a").is_err());
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.error().is_some_and(|e| e.contains("connection reset")));

        assert!(matches!(chat.send_message(&settings, "b"), Err(Error::Decoding(_))));
        assert_eq!(chat.messages().len(), 2);
        assert!(chat.error().is_some_and(|e| e.contains("response choices")));

        assert!(matches!(chat.send_message(&settings, "c"), Err(Error::Decoding(_))));
        assert_eq!(chat.messages().len(), 3);
        assert!(chat.error().is_some_and(|e| e.contains("message content")));
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_error_cleared_by_next_success() {
        let client = StubClient::new(vec![
            openai_exchange(
                json!([{ "role": "user", "content": "hi" }]),
                Reply::Json(503, json!({ "error": { "message": "overloaded" } })),
            ),
            openai_exchange(
                json!([{ "role": "user", "content": "hi" }, { "role": "user", "content": "hi again" }]),
                Reply::Json(200, completion("hello")),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));
        let settings = openai_settings();

        assert!(chat.send_message(&settings, "hi").is_err());
        assert!(chat.error().is_some_and(|e| e.contains("overloaded")));

        chat.send_message(&settings, "hi again").expect("reply");
        assert_eq!(chat.error(), None);
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[2], Message::assistant("hello".to_owned()));
    }

    #[test]
    fn test_send_message_together() {
        let client = StubClient::new(vec![
            Exchange::post(
                "https://api.together.xyz/v1/chat/completions",
                &[("Authorization", "Bearer <api-key>")],
                json!({
                    "model": "togethercomputer/llama-2-70b-chat",
                    "messages": [{ "role": "user", "content": "hi" }],
                    "stream": false
                }),
                Reply::Json(200, completion("hello from llama")),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));
        let settings = settings("https://api.together.xyz/", "<api-key>", ProviderKind::Together);

        let reply = chat.send_message(&settings, "hi").expect("reply");
        assert_eq!(reply.content, "hello from llama");
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn test_send_message_empty_anthropic_reply() {
        let client = StubClient::new(vec![
            Exchange::post(
                "https://api.anthropic.com/v1/messages",
                &[("X-API-Key", "<api-key>"), ("anthropic-version", "2023-06-01")],
                json!({
                    "model": "claude-2",
                    "messages": [{ "role": "user", "content": "hi" }]
                }),
                Reply::Json(200, json!({ "role": "assistant", "content": [], "stop_reason": "end_turn" })),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));
        let settings = settings("https://api.anthropic.com", "<api-key>", ProviderKind::Anthropic);

        assert!(matches!(chat.send_message(&settings, "hi"), Err(Error::Decoding(_))));
        assert_eq!(chat.messages(), &[Message::user("hi".to_owned())]);
    }

    #[test]
    fn test_send_message_anthropic() {
        let client = StubClient::new(vec![
            Exchange::post(
                "https://api.anthropic.com/v1/messages",
                &[("X-API-Key", "<api-key>"), ("anthropic-version", "2023-06-01")],
                json!({
                    "model": "claude-3-5-haiku-latest",
                    "messages": [{ "role": "user", "content": "hi" }]
                }),
                Reply::Json(200, json!({
                    "role": "assistant",
                    "content": [{ "type": "text", "text": "hello from claude" }]
                })),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));
        let mut settings = settings("https://api.anthropic.com", "<api-key>", ProviderKind::Anthropic);
        settings.default_model = "claude-3-5-haiku-latest".to_owned();

        let reply = chat.send_message(&settings, "hi").expect("reply");
        assert_eq!(reply.content, "hello from claude");
    }

    #[test]
    fn test_send_message_unsupported_provider() {
        let mut providers = ProviderRegistry::empty();
        providers.register(Box::new(OpenAIProvider));
        providers.register(Box::new(AnthropicProvider));

        let mut chat = ConversationManager::with_providers(Box::new(StubClient::unreachable()), providers);
        let settings = settings("https://api.together.xyz", "<api-key>", ProviderKind::Together);

        let result = chat.send_message(&settings, "hi");

        assert!(matches!(result, Err(Error::UnsupportedProvider(name)) if name == "together"));
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.error().is_some());
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_clear_messages() {
        let client = StubClient::new(vec![
            openai_exchange(
                json!([{ "role": "user", "content": "hi" }]),
                Reply::Json(500, Value::String("Internal Server Error".to_owned())),
            ),
        ]);
        let mut chat = ConversationManager::new(Box::new(client));

        chat.clear_messages();
        assert!(chat.messages().is_empty());

        assert!(chat.send_message(&openai_settings(), "hi").is_err());
        assert!(chat.error().is_some_and(|e| e.contains("Internal Server Error")));

        chat.clear_messages();
        assert!(chat.messages().is_empty());
        assert_eq!(chat.error(), None);
    }
}
