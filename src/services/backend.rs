use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::constants::DONE_SENTINEL;
use crate::models::{BackendEvent, BackendRequestBody, BackendWireEvent};
use crate::services::streaming::SseEventParser;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Remote(String),
    #[error("backend call cancelled")]
    Cancelled,
}

/// The conversational backend: send one message, receive cumulative-text events
/// on `events` until the returned future resolves.
#[async_trait]
pub trait ConversationBackend: Send + Sync {
    async fn send_message(
        &self,
        endpoint: &str,
        body: BackendRequestBody<'_>,
        cancel: CancellationToken,
        events: mpsc::Sender<BackendEvent>,
    ) -> Result<(), BackendError>;
}

fn preview(data: &str) -> String {
    if data.chars().count() > 200 {
        format!("{}...", data.chars().take(200).collect::<String>())
    } else {
        data.to_string()
    }
}

/// Backend reached over HTTP, answering with a `text/event-stream` of JSON events.
pub struct HttpConversationBackend {
    client: Client,
}

impl HttpConversationBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Handle one SSE payload. Returns `Ok(false)` once the backend signalled the end.
    async fn dispatch(&self, payload: &str, events: &mpsc::Sender<BackendEvent>) -> Result<bool, BackendError> {
        let data = payload.trim();
        if data == DONE_SENTINEL {
            log::debug!("🏁 Received [DONE] marker from backend");
            return Ok(false);
        }
        if data.is_empty() {
            return Ok(true);
        }

        let value: Value = match serde_json::from_str(data) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("⚠️  JSON parse failed ({} chars): {} - preview: {}", data.len(), e, preview(data));
                return Ok(true);
            }
        };
        let kind = value.get("type").and_then(|t| t.as_str()).unwrap_or("").to_string();

        let event = match serde_json::from_value::<BackendWireEvent>(value) {
            Ok(ev) => ev,
            Err(e) => {
                log::warn!("⚠️  Unrecognized backend event '{}': {}", kind, e);
                return Ok(true);
            }
        };

        let forwarded = match event {
            BackendWireEvent::UpdateAnswer { data } => match data.text {
                Some(text) => BackendEvent::UpdateAnswer { text },
                None => return Ok(true),
            },
            BackendWireEvent::Done => return Ok(false),
            BackendWireEvent::Error { error } => {
                let msg = error.unwrap_or_else(|| "Unknown backend error".into());
                log::warn!("⚠️  Backend reported error: {}", msg);
                return Err(BackendError::Remote(msg));
            }
            BackendWireEvent::Unknown => BackendEvent::Other { kind },
        };

        // Receiver gone means the driver stopped listening
        events.send(forwarded).await.map_err(|_| BackendError::Cancelled)?;
        Ok(true)
    }
}

#[async_trait]
impl ConversationBackend for HttpConversationBackend {
    async fn send_message(
        &self,
        endpoint: &str,
        body: BackendRequestBody<'_>,
        cancel: CancellationToken,
        events: mpsc::Sender<BackendEvent>,
    ) -> Result<(), BackendError> {
        log::debug!("🚀 Sending message to backend at {}", endpoint);
        let req = self.client.post(endpoint).json(&body);

        let res = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(BackendError::Cancelled),
            res = req.send() => res.map_err(|e| {
                log::error!("❌ Backend connection failed: {}", e);
                e
            })?,
        };

        let status = res.status();
        log::debug!("📥 Backend response status: {}", status);
        if !status.is_success() {
            let body = res.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            log::error!(
                "❌ Backend returned error: {} {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                preview(&body)
            );
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let mut bytes_stream = res.bytes_stream();
        let mut sse_parser = SseEventParser::new();

        log::debug!("🌊 Begin processing SSE from backend");
        loop {
            let item = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(BackendError::Cancelled),
                item = bytes_stream.next() => item,
            };
            let Some(item) = item else { break };
            let chunk = item?;
            for payload in sse_parser.push_and_drain_events(&chunk) {
                if !self.dispatch(&payload, &events).await? {
                    return Ok(());
                }
            }
        }

        // Flush any trailing event if backend didn't send final blank line
        if let Some(payload) = sse_parser.flush() {
            self.dispatch(&payload, &events).await?;
        }
        Ok(())
    }
}
