//! Length measurement and emptiness check for the text being typed.
//!
//! The character limit is soft: exceeding it only changes how the counter is drawn. Emptiness
//! is the only thing that blocks a translation, and that decision belongs to the request state
//! machine.

/// Displayed character threshold.
pub const CHARACTER_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterGuard {
    pub length: usize,
    pub limit: usize,
    pub exceeded: bool,
}

impl CharacterGuard {
    /// Measure `text` in Unicode scalar values.
    pub fn measure(text: &str) -> Self {
        Self::from_length(text.chars().count())
    }

    fn from_length(length: usize) -> Self {
        Self {
            length,
            limit: CHARACTER_LIMIT,
            exceeded: length > CHARACTER_LIMIT,
        }
    }

    /// Counter text, e.g. `12 / 500`.
    pub fn label(&self) -> String {
        format!("{} / {}", self.length, self.limit)
    }
}

/// Whether `text` has anything to translate once surrounding whitespace is dropped.
pub fn is_submittable(text: &str) -> bool {
    !text.trim().is_empty()
}
