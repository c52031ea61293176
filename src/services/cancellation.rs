use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Links the client transport to the backend call.
///
/// The transport is considered closed once every receiver of the frame channel is
/// gone (axum drops the response body when the client disconnects). Exactly one
/// watcher is spawned per call; dropping the bridge disarms it.
pub struct CancellationBridge {
    _disarm: DropGuard,
}

impl CancellationBridge {
    pub fn arm<T: Send + 'static>(frames: &mpsc::Sender<T>, cancel: CancellationToken) -> Self {
        let disarm = CancellationToken::new();
        let disarmed = disarm.clone();
        let watcher = frames.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = disarmed.cancelled() => {}
                () = watcher.closed() => fire(&cancel),
            }
        });

        Self {
            _disarm: disarm.drop_guard(),
        }
    }
}

/// Cancelling twice, or after the call already finished, changes nothing.
fn fire(cancel: &CancellationToken) {
    if cancel.is_cancelled() {
        log::debug!("🔌 Transport closed after cancellation, nothing to do");
        return;
    }
    log::info!("🔌 Client disconnected, cancelling backend call");
    cancel.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn dropping_the_receiver_cancels() {
        let (tx, rx) = mpsc::channel::<u8>(1);
        let cancel = CancellationToken::new();
        let _bridge = CancellationBridge::arm(&tx, cancel.clone());

        drop(rx);
        tokio::time::timeout(Duration::from_secs(1), cancel.cancelled())
            .await
            .expect("bridge should cancel once the receiver is gone");
    }

    #[tokio::test]
    async fn disarmed_bridge_never_cancels() {
        let (tx, rx) = mpsc::channel::<u8>(1);
        let cancel = CancellationToken::new();
        let bridge = CancellationBridge::arm(&tx, cancel.clone());

        drop(bridge);
        tokio::task::yield_now().await;
        drop(rx);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn firing_is_idempotent() {
        let cancel = CancellationToken::new();
        fire(&cancel);
        fire(&cancel);
        assert!(cancel.is_cancelled());
    }
}
