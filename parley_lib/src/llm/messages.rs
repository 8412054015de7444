use std::fmt::Display;
use serde::{Deserialize, Serialize};

/// Logical roles (provider-independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User.
    User,
    /// Model.
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        f.write_str(role)
    }
}

/// Chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role.
    pub role: Role,
    /// Message content.
    pub content: String,
}

impl Message {
    /// Create user message.
    pub fn user(content: String) -> Self {
        Message { role: Role::User, content }
    }

    /// Create assistant message.
    pub fn assistant(content: String) -> Self {
        Message { role: Role::Assistant, content }
    }
}
