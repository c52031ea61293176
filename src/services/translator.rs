use thiserror::Error;

use crate::constants::{CREATIVE_STYLE_KEYWORDS, IDENTITY_PREFIX, SEARCH_MODE_KEYWORDS};
use crate::models::{BackendCall, ChatCompletionRequest, StyleMode};
use crate::services::context::build_context;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("messages can't be empty")]
    EmptyPrompt,
}

impl TranslateError {
    pub fn code(&self) -> &'static str {
        match self {
            TranslateError::EmptyPrompt => "empty_messages",
        }
    }
}

/// Prepend the persona-lock instruction. Applied to every prompt, whatever it says.
pub fn apply_identity_prefix(prompt: &str) -> String {
    let mut out = String::with_capacity(IDENTITY_PREFIX.len() + prompt.len());
    out.push_str(IDENTITY_PREFIX);
    out.push_str(prompt);
    out
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

pub fn allow_search_for(model_hint: &str) -> bool {
    contains_any(model_hint, &SEARCH_MODE_KEYWORDS)
}

pub fn style_mode_for(model_hint: &str) -> StyleMode {
    if contains_any(model_hint, &CREATIVE_STYLE_KEYWORDS) {
        StyleMode::ForcedCreative
    } else {
        StyleMode::Raw(model_hint.to_string())
    }
}

/// Build the backend call from an inbound request.
pub fn translate_request(request: &ChatCompletionRequest) -> Result<BackendCall, TranslateError> {
    let Some((last, history)) = request.messages.split_last() else {
        log::warn!("❌ Validation failed: empty messages");
        return Err(TranslateError::EmptyPrompt);
    };
    if last.content.is_empty() {
        log::warn!("❌ Validation failed: last message has no content");
        return Err(TranslateError::EmptyPrompt);
    }

    let call = BackendCall {
        prompt: apply_identity_prefix(&last.content),
        context: build_context(history),
        stream: request.stream.unwrap_or(false),
        allow_search: allow_search_for(&request.model),
        style_mode: style_mode_for(&request.model),
    };

    log::debug!(
        "📊 Translated {} messages: prompt={} chars, context={} chars, allow_search={}, style={:?}",
        request.messages.len(),
        call.prompt.chars().count(),
        call.context.chars().count(),
        call.allow_search,
        call.style_mode
    );
    Ok(call)
}
