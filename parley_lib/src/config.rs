use std::fmt::Display;
use crate::error::Error;

/// Storage key of the API endpoint.
pub const API_ENDPOINT_KEY: &str = "apiEndpoint";
/// Storage key of the API key.
pub const API_KEY_KEY: &str = "apiKey";
/// Storage key of the detected provider.
pub const API_TYPE_KEY: &str = "apiType";
/// Storage key of the default model.
pub const DEFAULT_MODEL_KEY: &str = "defaultModel";

/// Model providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Open AI and compatible endpoints.
    #[default]
    OpenAI,
    /// Anthropic.
    Anthropic,
    /// Together.
    Together,
}

impl ProviderKind {
    /// Persisted name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Together => "together",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderKind {
    type Error = Error;

    fn try_from(val: &str) -> Result<Self, Self::Error> {
        match val {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "together" => Ok(ProviderKind::Together),
            _ => Err(Error::UnsupportedProvider(val.to_owned())),
        }
    }
}

/// Classify an endpoint by the provider host it contains.
/// Unknown hosts are treated as OpenAI-compatible.
pub fn detect_api_type(endpoint: &str) -> ProviderKind {
    const HOSTS: [(&str, ProviderKind); 3] = [
        ("api.openai.com", ProviderKind::OpenAI),
        ("api.anthropic.com", ProviderKind::Anthropic),
        ("api.together.xyz", ProviderKind::Together),
    ];

    HOSTS.iter()
        .find(|(host, _)| endpoint.contains(host))
        .map(|(_, kind)| *kind)
        .unwrap_or_default()
}

/// API settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    /// Base URL of the API.
    pub api_endpoint: String,
    /// API key.
    pub api_key: String,
    /// Provider, derived from the endpoint.
    pub api_type: ProviderKind,
    /// Model to use, empty for the provider default.
    pub default_model: String,
}

impl Settings {
    /// Both endpoint and key are set.
    pub fn is_configured(&self) -> bool {
        !self.api_endpoint.is_empty() && !self.api_key.is_empty()
    }

    /// Join the endpoint and a path without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_endpoint, path)
    }
}

pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}
