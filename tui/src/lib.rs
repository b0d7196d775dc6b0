// Forbid accidental stdout/stderr writes in the library portion of the TUI.
#![deny(clippy::print_stdout, clippy::print_stderr)]

mod app;
mod app_event;
mod app_event_sender;
mod clipboard_echo;
mod input_guard;
mod render;
mod request_state;
mod text_input;
mod translatica_tui;
mod translation_client;
mod translator_card;
mod tui;
mod ui_colors;
mod version;

#[cfg(test)]
mod test_support;

pub use clipboard_echo::ClipboardError;
pub use clipboard_echo::ClipboardWriter;
pub use clipboard_echo::SystemClipboard;
pub use input_guard::CHARACTER_LIMIT;
pub use request_state::RequestPhase;
pub use translatica_tui::TranslaticaTui;
pub use translation_client::HttpTranslationClient;
pub use translation_client::TranslationBackend;
pub use version::TRANSLATICA_VERSION;
