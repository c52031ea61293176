use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::content_extraction::extract_text_from_content;

// ---------- Inbound (OpenAI-shaped request) ----------

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    System,
    #[default]
    User,
    Assistant,
}

impl From<String> for Role {
    /// Unknown or empty roles fall back to `user`
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Role::System,
            "assistant" => Role::Assistant,
            _ => Role::User,
        }
    }
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Raw message as clients send it: `content` may be a string or an array of parts
#[derive(Deserialize)]
pub struct WireMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "WireMessage")]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl From<WireMessage> for Message {
    fn from(m: WireMessage) -> Self {
        Self {
            role: m.role.map(Role::from).unwrap_or_default(),
            content: extract_text_from_content(&m.content),
        }
    }
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Next,
    Variant,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub stream: Option<bool>,
}

// ---------- Outbound (OpenAI-shaped response) ----------

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatChoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<Message>,
    pub message: Message,
}

/// One outbound frame. Streaming frames carry the same text in `delta` and `message`;
/// the aggregate reply only carries `message`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Text of the first choice's full message
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("")
    }
}
