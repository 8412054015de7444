//! Provider-specific request builders.
mod messages;
mod provider;
mod openai;
mod anthropic;
mod together;
pub(crate) mod util;

pub use messages::Message;
pub use messages::Role;
pub use provider::ChatProvider;
pub use provider::ChatRequest;
pub use provider::ProviderRegistry;
pub use openai::OpenAIProvider;
pub use anthropic::AnthropicProvider;
pub use together::TogetherProvider;
