//! Fakes shared by the unit tests.

use std::sync::Arc;
use std::sync::Mutex;

use ratatui::buffer::Buffer;
use tokio::sync::Notify;
use translatica_protocol::TranslationOutcome;

use crate::clipboard_echo::ClipboardError;
use crate::clipboard_echo::ClipboardWriter;
use crate::translation_client::TranslationBackend;

/// Backend that records every call and answers with a fixed outcome, optionally waiting on a
/// gate first so a test can observe the pending phase.
pub(crate) struct FakeBackend {
    outcome: TranslationOutcome,
    calls: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub(crate) fn answering(outcome: TranslationOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub(crate) fn gated(outcome: TranslationOutcome, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::answering(outcome)
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl TranslationBackend for FakeBackend {
    async fn translate(&self, text: String) -> TranslationOutcome {
        self.calls.lock().expect("calls lock").push(text);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    reject: bool,
}

impl RecordingClipboard {
    pub(crate) fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub(crate) fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("writes lock").clone()
    }
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.reject {
            return Err(ClipboardError::Rejected(arboard::Error::ClipboardOccupied));
        }
        self.writes.lock().expect("writes lock").push(text.to_string());
        Ok(())
    }
}

/// Rows of a rendered buffer with trailing blanks trimmed.
pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}

pub(crate) fn buffer_text(buf: &Buffer) -> String {
    buffer_lines(buf).join("\n")
}
