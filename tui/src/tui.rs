use std::io;
use std::io::Stdout;
use std::io::stdout;
use std::pin::Pin;

use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyEvent;
use crossterm::event::KeyboardEnhancementFlags;
use crossterm::event::PopKeyboardEnhancementFlags;
use crossterm::event::PushKeyboardEnhancementFlags;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::supports_keyboard_enhancement;
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use tokio_stream::Stream;
use tokio_stream::StreamExt;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String),
    Draw,
}

/// Enter raw mode and the alternate screen. Pair with [`restore`].
pub fn init() -> io::Result<(Terminal, bool)> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)?;

    // Needed to tell Shift+Enter apart from Enter.
    let enhanced_keys_supported = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys_supported {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    set_panic_hook();
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok((terminal, enhanced_keys_supported))
}

pub fn restore() -> io::Result<()> {
    // Popping when nothing was pushed is harmless.
    let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    disable_raw_mode()
}

fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        hook(panic_info);
    }));
}

pub struct Tui {
    pub terminal: Terminal,
    enhanced_keys_supported: bool,
}

impl Tui {
    pub fn new(terminal: Terminal, enhanced_keys_supported: bool) -> Self {
        Self {
            terminal,
            enhanced_keys_supported,
        }
    }

    pub fn enhanced_keys_supported(&self) -> bool {
        self.enhanced_keys_supported
    }

    /// Terminal input mapped to [`TuiEvent`]s. The stream does not borrow `self`, so the caller
    /// can keep drawing while holding it.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        Box::pin(EventStream::new().filter_map(|event| match event {
            Ok(Event::Key(key_event)) => Some(TuiEvent::Key(key_event)),
            Ok(Event::Paste(pasted)) => Some(TuiEvent::Paste(pasted)),
            Ok(Event::Resize(..) | Event::FocusGained) => Some(TuiEvent::Draw),
            Ok(Event::FocusLost | Event::Mouse(_)) => None,
            Err(err) => {
                tracing::warn!("failed to read terminal event: {err}");
                None
            }
        }))
    }

    pub fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}
