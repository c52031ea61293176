use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::constants::SSE_CHANNEL_BUFFER_SIZE;
use crate::models::{BackendCall, BackendEvent, BackendOptions, BackendRequestBody};
use crate::services::backend::{BackendError, ConversationBackend};
use crate::services::cancellation::CancellationBridge;
use crate::services::delta::DeltaTracker;
use crate::services::envelope::{delta_response, full_response, Frame};
use crate::services::error_formatting::{format_backend_error, merge_error_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Init,
    Calling,
    Updating,
    Finalizing,
    Done,
}

/// Why the backend call stopped
#[derive(Debug)]
enum Termination {
    Completed,
    Failed(BackendError),
    Cancelled,
}

impl From<Result<(), BackendError>> for Termination {
    fn from(result: Result<(), BackendError>) -> Self {
        match result {
            Ok(()) => Termination::Completed,
            Err(BackendError::Cancelled) => Termination::Cancelled,
            Err(e) => Termination::Failed(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    Completed,
    Failed,
    Cancelled,
}

/// Summary of one driven call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveReport {
    pub outcome: DriveOutcome,
    pub frames_written: usize,
    pub final_text: String,
}

/// Drives one backend call and renders its events as outbound frames.
///
/// `Init → Calling → Updating* → Finalizing → Done`. Finalization consumes the
/// driver, so it happens once whichever way the call ended.
pub struct StreamDriver {
    state: DriverState,
    stream: bool,
    tracker: DeltaTracker,
    frames: mpsc::Sender<Frame>,
    frames_written: usize,
    cancel: CancellationToken,
}

impl StreamDriver {
    pub fn new(stream: bool, frames: mpsc::Sender<Frame>) -> Self {
        Self {
            state: DriverState::Init,
            stream,
            tracker: DeltaTracker::new(),
            frames,
            frames_written: 0,
            cancel: CancellationToken::new(),
        }
    }

    fn transition(&mut self, next: DriverState) {
        log::debug!("🔀 Driver {:?} → {:?}", self.state, next);
        self.state = next;
    }

    pub async fn run(mut self, backend: &dyn ConversationBackend, endpoint: &str, call: &BackendCall) -> DriveReport {
        let options = BackendOptions {
            allow_search: call.allow_search,
            conversation_style: call.style_mode.resolve(),
        };
        log::info!(
            "💬 Calling backend: style={}, allow_search={}, stream={}",
            options.conversation_style.as_str(),
            options.allow_search,
            self.stream
        );
        let body = BackendRequestBody {
            prompt: &call.prompt,
            context: &call.context,
            options,
        };

        let _bridge = CancellationBridge::arm(&self.frames, self.cancel.clone());
        let cancel = self.cancel.clone();
        let (events_tx, mut events_rx) = mpsc::channel(SSE_CHANNEL_BUFFER_SIZE);

        self.transition(DriverState::Calling);
        let mut call_fut = backend.send_message(endpoint, body, cancel.clone(), events_tx);
        let mut call_result: Option<Result<(), BackendError>> = None;

        // Buffered events are drained before the call result is acted on; cancellation wins every race.
        let termination = loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break Termination::Cancelled,
                event = events_rx.recv() => match event {
                    Some(event) => self.on_event(event).await,
                    None => {
                        let result = match call_result.take() {
                            Some(result) => result,
                            None => tokio::select! {
                                biased;
                                () = cancel.cancelled() => break Termination::Cancelled,
                                result = &mut call_fut => result,
                            },
                        };
                        break Termination::from(result);
                    }
                },
                result = &mut call_fut, if call_result.is_none() => call_result = Some(result),
            }
        };
        drop(call_fut);

        self.finalize(termination).await
    }

    async fn on_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::UpdateAnswer { text } if !text.is_empty() => {
                if self.state == DriverState::Calling {
                    self.transition(DriverState::Updating);
                }
                let (delta, advanced) = self.tracker.compute_delta(&text);
                if advanced && self.stream {
                    self.write(Frame::Delta(delta_response(&delta))).await;
                }
            }
            BackendEvent::UpdateAnswer { .. } => {}
            BackendEvent::Other { kind } => {
                log::debug!("📎 Ignoring backend event '{}'", kind);
            }
        }
    }

    /// Write one frame; a closed transport cancels the call instead of failing.
    async fn write(&mut self, frame: Frame) -> bool {
        if self.frames.send(frame).await.is_err() {
            log::debug!("🔌 Transport closed, frame dropped");
            self.cancel.cancel();
            return false;
        }
        self.frames_written += 1;
        true
    }

    async fn finalize(mut self, termination: Termination) -> DriveReport {
        self.transition(DriverState::Finalizing);
        let mut final_text = self.tracker.last_text().to_string();

        let outcome = match termination {
            Termination::Completed => DriveOutcome::Completed,
            Termination::Cancelled => {
                log::info!("🛑 Call cancelled after {} frames", self.frames_written);
                DriveOutcome::Cancelled
            }
            Termination::Failed(err) => {
                log::warn!("⚠️  Backend call failed: {}", err);
                let merged = merge_error_text(&final_text, &format_backend_error(&err));
                if self.stream {
                    let appended = &merged[final_text.len()..];
                    self.write(Frame::Delta(delta_response(appended))).await;
                }
                final_text = merged;
                DriveOutcome::Failed
            }
        };

        if outcome == DriveOutcome::Cancelled || self.frames.is_closed() {
            log::debug!("🔌 Transport closed, skipping final frame");
        } else if self.stream {
            self.write(Frame::Done).await;
        } else {
            self.write(Frame::Aggregate(full_response(&final_text))).await;
        }

        log::debug!(
            "🏁 Driver finished: outcome={:?}, frames={}, emitted={} chars",
            outcome,
            self.frames_written,
            self.tracker.emitted_len()
        );
        self.transition(DriverState::Done);
        DriveReport {
            outcome,
            frames_written: self.frames_written,
            final_text,
        }
    }
}

/// Start a driver on its own task. Frames arrive on the returned receiver; dropping
/// the receiver cancels the backend call.
pub fn spawn_drive(
    backend: Arc<dyn ConversationBackend>,
    endpoint: String,
    call: BackendCall,
) -> (mpsc::Receiver<Frame>, JoinHandle<DriveReport>) {
    let (tx, rx) = mpsc::channel(SSE_CHANNEL_BUFFER_SIZE);
    let driver = StreamDriver::new(call.stream, tx);
    let handle = tokio::spawn(async move { driver.run(backend.as_ref(), &endpoint, &call).await });
    (rx, handle)
}
