use std::sync::Arc;

use crate::clipboard_echo::ClipboardWriter;
use crate::translation_client::TranslationBackend;
use crate::tui;
use crate::tui::Tui;

/// Full-screen terminal session for the translator card. Restores the terminal on Drop.
pub struct TranslaticaTui {
    tui: Tui,
}

impl TranslaticaTui {
    /// Enter raw mode and the alternate screen, then clear it.
    pub fn new() -> anyhow::Result<Self> {
        let (mut terminal, enhanced_keys_supported) = tui::init()?;
        terminal.clear()?;
        Ok(Self {
            tui: Tui::new(terminal, enhanced_keys_supported),
        })
    }

    /// Run the card until the user quits with Esc or Ctrl+C.
    pub async fn run<B, W>(&mut self, backend: Arc<B>, clipboard: W) -> anyhow::Result<()>
    where
        B: TranslationBackend,
        W: ClipboardWriter,
    {
        crate::app::run_translator(&mut self.tui, backend, clipboard).await
    }
}

impl Drop for TranslaticaTui {
    fn drop(&mut self) {
        // Always attempt to restore the terminal, even if the caller exits early.
        let _ = tui::restore();
    }
}
