//! In-memory backend used by driver and handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::models::{BackendEvent, BackendOptions, BackendRequestBody};
use crate::services::backend::{BackendError, ConversationBackend};

/// Replays a fixed list of cumulative texts, then succeeds, fails, or waits for cancellation.
#[derive(Default)]
pub struct ScriptedBackend {
    updates: Vec<String>,
    hang_after: Option<usize>,
    fail_with: Option<String>,
    pub calls: AtomicUsize,
    options: Mutex<Option<BackendOptions>>,
    prompt: Mutex<Option<String>>,
    token: Mutex<Option<CancellationToken>>,
}

impl ScriptedBackend {
    pub fn with_updates(updates: &[&str]) -> Self {
        Self {
            updates: updates.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Send this many updates, then block until the call is cancelled
    pub fn hanging_after(mut self, n: usize) -> Self {
        self.hang_after = Some(n);
        self
    }

    pub fn failing_with(mut self, msg: &str) -> Self {
        self.fail_with = Some(msg.to_string());
        self
    }

    pub fn last_options(&self) -> Option<BackendOptions> {
        *self.options.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompt.lock().unwrap().clone()
    }

    pub fn was_cancelled(&self) -> bool {
        self.token
            .lock()
            .unwrap()
            .as_ref()
            .map(|t| t.is_cancelled())
            .unwrap_or(false)
    }
}

#[async_trait]
impl ConversationBackend for ScriptedBackend {
    async fn send_message(
        &self,
        _endpoint: &str,
        body: BackendRequestBody<'_>,
        cancel: CancellationToken,
        events: mpsc::Sender<BackendEvent>,
    ) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.options.lock().unwrap() = Some(body.options);
        *self.prompt.lock().unwrap() = Some(body.prompt.to_string());
        *self.token.lock().unwrap() = Some(cancel.clone());

        for (i, text) in self.updates.iter().enumerate() {
            if self.hang_after == Some(i) {
                cancel.cancelled().await;
                return Err(BackendError::Cancelled);
            }
            events
                .send(BackendEvent::UpdateAnswer { text: text.clone() })
                .await
                .map_err(|_| BackendError::Cancelled)?;
        }

        match &self.fail_with {
            Some(msg) => Err(BackendError::Remote(msg.clone())),
            None => Ok(()),
        }
    }
}
