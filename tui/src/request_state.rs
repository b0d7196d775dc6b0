//! Lifecycle of a single translation attempt.
//!
//! `Idle | Settled -> Pending -> Settled`, with empty input short-circuiting straight to a
//! settled validation failure. Transitions are computed by [`RequestPhase::transition`], a pure
//! function; [`RequestStateMachine`] applies them and performs the dispatch side effect.

use std::sync::Arc;

use derive_more::IsVariant;
use translatica_protocol::TranslationOutcome;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::translation_client::TranslationBackend;

#[derive(Debug, Clone, Default, PartialEq, Eq, IsVariant)]
pub enum RequestPhase {
    /// Nothing submitted yet; the result region is hidden.
    #[default]
    Idle,
    /// A request is in flight. Further submissions are ignored until it settles.
    Pending,
    /// The last attempt finished with this outcome.
    Settled(TranslationOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    /// The user asked for a translation of the raw (untrimmed) input.
    Submit(String),
    /// The backend answered the in-flight request.
    Resolved(TranslationOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEffect {
    /// Send `text` (already trimmed, non-empty) to the translation backend.
    Dispatch { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub phase: RequestPhase,
    pub effect: Option<RequestEffect>,
}

impl Transition {
    fn to(phase: RequestPhase) -> Self {
        Self {
            phase,
            effect: None,
        }
    }
}

impl RequestPhase {
    pub fn transition(&self, event: RequestEvent) -> Transition {
        match (self, event) {
            (Self::Pending, RequestEvent::Submit(_)) => Transition::to(Self::Pending),
            (_, RequestEvent::Submit(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Transition::to(Self::Settled(TranslationOutcome::validation_failure()));
                }
                Transition {
                    phase: Self::Pending,
                    effect: Some(RequestEffect::Dispatch {
                        text: trimmed.to_string(),
                    }),
                }
            }
            (Self::Pending, RequestEvent::Resolved(outcome)) => {
                Transition::to(Self::Settled(outcome))
            }
            (phase, RequestEvent::Resolved(_)) => Transition::to(phase.clone()),
        }
    }

    pub fn outcome(&self) -> Option<&TranslationOutcome> {
        match self {
            Self::Settled(outcome) => Some(outcome),
            Self::Idle | Self::Pending => None,
        }
    }

    /// The translation that may be copied, present only after a successful attempt.
    pub fn copyable_translation(&self) -> Option<&str> {
        self.outcome().and_then(TranslationOutcome::translation)
    }

    pub fn accepts_submission(&self) -> bool {
        !self.is_pending()
    }

    pub fn shows_result_region(&self) -> bool {
        !self.is_idle()
    }
}

/// Drives [`RequestPhase`] against a real backend.
///
/// Dispatch spawns the request on the tokio runtime; its outcome comes back as
/// [`AppEvent::TranslationSettled`] and is applied on the UI loop through
/// [`RequestStateMachine::on_settled`].
pub struct RequestStateMachine<B> {
    phase: RequestPhase,
    backend: Arc<B>,
    app_event_tx: AppEventSender,
}

impl<B: TranslationBackend> RequestStateMachine<B> {
    pub fn new(backend: Arc<B>, app_event_tx: AppEventSender) -> Self {
        Self {
            phase: RequestPhase::Idle,
            backend,
            app_event_tx,
        }
    }

    pub fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    /// Submit the current input. A no-op while a request is pending, whichever control
    /// triggered it.
    pub fn submit(&mut self, text: &str) {
        if self.phase.is_pending() {
            tracing::trace!("ignoring submit while a translation is pending");
            return;
        }

        let Transition { phase, effect } =
            self.phase.transition(RequestEvent::Submit(text.to_string()));
        self.phase = phase;

        match effect {
            Some(RequestEffect::Dispatch { text }) => self.dispatch(text),
            None => tracing::debug!("rejected empty translation input"),
        }
    }

    pub fn on_settled(&mut self, outcome: TranslationOutcome) {
        if !self.phase.is_pending() {
            tracing::warn!(kind = outcome.kind(), "dropping outcome with no pending request");
            return;
        }
        tracing::info!(kind = outcome.kind(), "translation settled");
        let Transition { phase, .. } = self.phase.transition(RequestEvent::Resolved(outcome));
        self.phase = phase;
    }

    fn dispatch(&self, text: String) {
        tracing::debug!(chars = text.chars().count(), "dispatching translation request");
        let backend = Arc::clone(&self.backend);
        let app_event_tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.translate(text).await;
            app_event_tx.send(AppEvent::TranslationSettled(outcome));
        });
    }
}
