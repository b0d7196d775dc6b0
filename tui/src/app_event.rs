//! Application-level events delivered back to the UI event loop.

use translatica_protocol::TranslationOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The in-flight translation request finished. Produced by the task spawned on dispatch;
    /// applying it is the only way out of the pending phase.
    TranslationSettled(TranslationOutcome),

    /// The acknowledgment window of the copy identified by `generation` elapsed.
    ClipboardAckExpired { generation: u64 },
}
