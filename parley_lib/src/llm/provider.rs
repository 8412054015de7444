use std::collections::HashMap;
use serde_json::Value;
use crate::config::{ProviderKind, Settings};
use crate::error::Error;
use super::{AnthropicProvider, Message, OpenAIProvider, TogetherProvider};

/// Provider-specific HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Full URL.
    pub url: String,
    /// Extra headers (authentication).
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub payload: Value,
}

impl ChatRequest {
    /// Headers as borrowed pairs.
    pub fn header_pairs(&self) -> Vec<(&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

/// Translates the uniform history into a provider request and back.
pub trait ChatProvider {

    /// Provider this implementation serves.
    fn kind(&self) -> ProviderKind;

    /// Build the request for the whole history.
    fn build_request(&self, settings: &Settings, history: &[Message]) -> ChatRequest;

    /// Extract the assistant reply from a successful response body.
    fn extract_reply(&self, body: &Value) -> Result<String, Error>;
}

/// Request builders keyed by provider.
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Box<dyn ChatProvider>>,
}

impl ProviderRegistry {

    /// Create registry without providers.
    pub fn empty() -> Self {
        ProviderRegistry { providers: HashMap::new() }
    }

    /// Add or replace the builder for its provider.
    pub fn register(&mut self, provider: Box<dyn ChatProvider>) {
        self.providers.insert(provider.kind(), provider);
    }

    /// Find the builder for the provider.
    pub fn get(&self, kind: ProviderKind) -> Result<&dyn ChatProvider, Error> {
        self.providers
            .get(&kind)
            .map(|p| p.as_ref())
            .ok_or_else(|| Error::UnsupportedProvider(kind.to_string()))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut registry = ProviderRegistry::empty();
        registry.register(Box::new(OpenAIProvider));
        registry.register(Box::new(AnthropicProvider));
        registry.register(Box::new(TogetherProvider));
        registry
    }
}
