mod outcome;
pub mod wire;

pub use outcome::TRANSPORT_FAILURE_MESSAGE;
pub use outcome::TranslationOutcome;
pub use outcome::VALIDATION_MESSAGE;
