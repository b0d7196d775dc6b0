//! Copy-to-clipboard with a self-reverting "Copied!" acknowledgment.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;

/// How long the acknowledgment stays visible after the most recent copy.
pub const ACK_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),
    #[error("clipboard write rejected: {0}")]
    Rejected(#[source] arboard::Error),
}

pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard, opened on first use.
///
/// The handle is kept for the session: on X11 the copied text is only served while the owning
/// handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(ClipboardError::Unavailable)?,
        };
        let result = clipboard.set_text(text).map_err(ClipboardError::Rejected);
        self.clipboard = Some(clipboard);
        result
    }
}

/// Owns the acknowledgment flag and its single revert timer.
///
/// Each successful copy aborts the previous timer and starts a new one. Reverts are tagged with a
/// generation so an expiry that was already queued for an older copy cannot clear a newer
/// acknowledgment.
pub struct ClipboardEcho<W> {
    writer: W,
    acknowledged: bool,
    generation: u64,
    revert_task: Option<JoinHandle<()>>,
    app_event_tx: AppEventSender,
}

impl<W: ClipboardWriter> ClipboardEcho<W> {
    pub fn new(writer: W, app_event_tx: AppEventSender) -> Self {
        Self {
            writer,
            acknowledged: false,
            generation: 0,
            revert_task: None,
            app_event_tx,
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn copy(&mut self, text: &str) {
        self.cancel_revert();
        if let Err(err) = self.writer.write_text(text) {
            tracing::warn!("failed to copy translation to clipboard: {err}");
            self.acknowledged = false;
            return;
        }

        self.generation = self.generation.wrapping_add(1);
        self.acknowledged = true;

        let generation = self.generation;
        let deadline = Instant::now() + ACK_DURATION;
        let app_event_tx = self.app_event_tx.clone();
        self.revert_task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            app_event_tx.send(AppEvent::ClipboardAckExpired { generation });
        }));
    }

    pub fn on_ack_expired(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "ignoring stale ack expiry");
            return;
        }
        self.acknowledged = false;
        self.revert_task = None;
    }

    fn cancel_revert(&mut self) {
        if let Some(task) = self.revert_task.take() {
            task.abort();
        }
    }
}

impl<W> Drop for ClipboardEcho<W> {
    fn drop(&mut self) {
        if let Some(task) = self.revert_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingClipboard;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    fn echo_with(
        clipboard: RecordingClipboard,
    ) -> (ClipboardEcho<RecordingClipboard>, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        (ClipboardEcho::new(clipboard, AppEventSender::new(tx)), rx)
    }

    async fn apply_next_expiry(
        echo: &mut ClipboardEcho<RecordingClipboard>,
        rx: &mut UnboundedReceiver<AppEvent>,
    ) {
        match rx.recv().await {
            Some(AppEvent::ClipboardAckExpired { generation }) => echo.on_ack_expired(generation),
            other => panic!("expected ack expiry, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ack_reverts_two_seconds_after_copy() {
        let clipboard = RecordingClipboard::default();
        let (mut echo, mut rx) = echo_with(clipboard.clone());
        let copied_at = Instant::now();

        echo.copy("Hola");
        assert!(echo.is_acknowledged());
        assert_eq!(clipboard.writes(), vec!["Hola".to_string()]);

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());
        assert!(echo.is_acknowledged());

        apply_next_expiry(&mut echo, &mut rx).await;
        assert!(!echo.is_acknowledged());
        assert!(copied_at.elapsed() >= ACK_DURATION);
    }

    #[tokio::test(start_paused = true)]
    async fn new_copy_restarts_the_window() {
        let (mut echo, mut rx) = echo_with(RecordingClipboard::default());
        let start = Instant::now();

        echo.copy("Hola");
        tokio::time::advance(Duration::from_millis(1500)).await;
        echo.copy("Hola");

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
        assert!(echo.is_acknowledged());

        apply_next_expiry(&mut echo, &mut rx).await;
        assert!(!echo.is_acknowledged());
        assert!(start.elapsed() >= Duration::from_millis(3500));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_expiry_does_not_clear_newer_ack() {
        let (mut echo, _rx) = echo_with(RecordingClipboard::default());

        echo.copy("first");
        echo.copy("second");
        echo.on_ack_expired(1);

        assert!(echo.is_acknowledged());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_write_shows_no_ack() {
        let (mut echo, mut rx) = echo_with(RecordingClipboard::rejecting());

        echo.copy("Hola");

        assert!(!echo.is_acknowledged());
        tokio::time::advance(ACK_DURATION * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
