use axum::response::sse::Event;

use crate::constants::DONE_SENTINEL;
use crate::models::{ChatChoice, ChatCompletionResponse, Message};

/// Streaming frame: the delta text appears both as `delta` and as `message`
pub fn delta_response(delta: &str) -> ChatCompletionResponse {
    let message = Message::assistant(delta);
    ChatCompletionResponse {
        choices: vec![ChatChoice {
            delta: Some(message.clone()),
            message,
        }],
    }
}

/// Non-streaming reply carrying the whole answer
pub fn full_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        choices: vec![ChatChoice {
            delta: None,
            message: Message::assistant(content),
        }],
    }
}

/// Units written by the stream driver to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Delta(ChatCompletionResponse),
    Aggregate(ChatCompletionResponse),
    Done,
}

impl Frame {
    /// Render as a `data: ...` SSE event
    pub fn to_sse_event(&self) -> Event {
        match self {
            Frame::Delta(body) | Frame::Aggregate(body) => match serde_json::to_string(body) {
                Ok(json) => Event::default().data(json),
                Err(e) => {
                    log::error!("❌ Failed to serialize frame: {}", e);
                    Event::default().data("{}")
                }
            },
            Frame::Done => Event::default().data(DONE_SENTINEL),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Frame::Aggregate(_) | Frame::Done)
    }
}
