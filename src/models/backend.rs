use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Conversation presets understood by the backend
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationStyle {
    #[default]
    Creative,
    Balanced,
    Precise,
}

impl ConversationStyle {
    pub const ALL: [ConversationStyle; 3] = [
        ConversationStyle::Creative,
        ConversationStyle::Balanced,
        ConversationStyle::Precise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConversationStyle::Creative => "Creative",
            ConversationStyle::Balanced => "Balanced",
            ConversationStyle::Precise => "Precise",
        }
    }

    /// Validate a raw style hint. Anything that is not an exact style name
    /// resolves to the default style instead of failing the request.
    pub fn resolve(hint: &str) -> Self {
        hint.parse().unwrap_or_else(|_| {
            log::debug!("🎨 Style hint '{}' not recognized, using {}", hint, Self::default().as_str());
            Self::default()
        })
    }
}

impl FromStr for ConversationStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|style| style.as_str() == s).ok_or(())
    }
}

/// Style selection derived from the model hint, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleMode {
    /// Hint matched a creative keyword
    ForcedCreative,
    /// Hint passed through verbatim, validated when the call starts
    Raw(String),
}

impl StyleMode {
    pub fn resolve(&self) -> ConversationStyle {
        match self {
            StyleMode::ForcedCreative => ConversationStyle::Creative,
            StyleMode::Raw(hint) => ConversationStyle::resolve(hint),
        }
    }
}

/// Native call shape for the conversational backend. Built once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCall {
    pub prompt: String,
    pub context: String,
    pub stream: bool,
    pub allow_search: bool,
    pub style_mode: StyleMode,
}

/// Events delivered by the backend while a call is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// Cumulative answer text produced so far (not a delta)
    UpdateAnswer { text: String },
    /// Any other event kind; carried for logging only
    Other { kind: String },
}

// ---------- Wire shapes of the HTTP backend ----------

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackendOptions {
    pub allow_search: bool,
    pub conversation_style: ConversationStyle,
}

#[derive(Serialize, Debug)]
pub struct BackendRequestBody<'a> {
    pub prompt: &'a str,
    pub context: &'a str,
    pub options: BackendOptions,
}

#[derive(Deserialize, Debug, Default)]
pub struct BackendAnswerData {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum BackendWireEvent {
    #[serde(rename = "UPDATE_ANSWER")]
    UpdateAnswer {
        #[serde(default)]
        data: BackendAnswerData,
    },
    #[serde(rename = "DONE")]
    Done,
    #[serde(rename = "ERROR")]
    Error {
        #[serde(default)]
        error: Option<String>,
    },
    #[serde(other)]
    Unknown,
}
