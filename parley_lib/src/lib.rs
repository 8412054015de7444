//! Parley-lib keeps a chat history and relays it to a hosted LLM API.
//! The divergent request/response shapes of the providers are hidden
//! behind a uniform list of messages.
//!
//! ### Providers
//!
//! - OpenAI (and any OpenAI-compatible endpoint)
//! - Anthropic (Claude models)
//! - Together
//!
//! ### Examples
//!
//! ```rust no_run
//! use parley_lib::request::get_reqwest_client;
//! use parley_lib::storage::MemoryStore;
//! use parley_lib::{ConversationManager, SettingsManager, SettingsUpdate};
//!
//! let mut settings = SettingsManager::load(
//!     Box::new(MemoryStore::new()),
//!     get_reqwest_client().expect("transport created"),
//! );
//!
//! settings.update_settings(SettingsUpdate {
//!     api_endpoint: "https://api.openai.com/v1".into(),
//!     api_key: "<api-key>".into(),
//! }).expect("settings validated");
//!
//! let mut chat = ConversationManager::new(get_reqwest_client().expect("transport created"));
//!
//! let reply = chat.send_message(settings.settings(), "Hi assistant!").expect("LLM response");
//! println!("{}", reply.content);
//! ```

#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

mod error;
mod config;
mod settings;
mod conversation;
pub mod llm;
pub mod request;
pub mod storage;

pub use error::Error;
pub use config::{detect_api_type, ProviderKind, Settings};
pub use settings::{SettingsManager, SettingsUpdate};
pub use conversation::ConversationManager;
