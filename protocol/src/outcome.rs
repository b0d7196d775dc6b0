/// Message shown when the user submits empty or whitespace-only text.
pub const VALIDATION_MESSAGE: &str = "Please enter some text to translate!";

/// Message shown for any failure that did not come with a server-provided explanation
/// (unreachable host, timeout, malformed body).
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to connect to translation service.";

/// The resolved result of one translation attempt.
///
/// Validation, server-reported, and transport failures all collapse into [`Failure`] and are
/// rendered the same way.
///
/// [`Failure`]: TranslationOutcome::Failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Success { translation: String },
    Failure { message: String },
}

impl TranslationOutcome {
    pub fn success(translation: impl Into<String>) -> Self {
        Self::Success {
            translation: translation.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Failure for empty input, detected before any network call.
    pub fn validation_failure() -> Self {
        Self::failure(VALIDATION_MESSAGE)
    }

    /// Failure synthesized by the client when the backend gave no usable answer.
    pub fn transport_failure() -> Self {
        Self::failure(TRANSPORT_FAILURE_MESSAGE)
    }

    pub fn translation(&self) -> Option<&str> {
        match self {
            Self::Success { translation } => Some(translation),
            Self::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failure { .. } => "failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixed_failures_carry_their_messages() {
        assert_eq!(
            TranslationOutcome::validation_failure(),
            TranslationOutcome::Failure {
                message: "Please enter some text to translate!".to_string()
            }
        );
        assert_eq!(
            TranslationOutcome::transport_failure(),
            TranslationOutcome::Failure {
                message: "Failed to connect to translation service.".to_string()
            }
        );
    }

    #[test]
    fn translation_is_only_exposed_for_success() {
        assert_eq!(TranslationOutcome::success("Hola").translation(), Some("Hola"));
        assert_eq!(TranslationOutcome::failure("nope").translation(), None);
    }
}
