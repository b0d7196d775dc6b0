use std::sync::Arc;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tokio::sync::mpsc::unbounded_channel;
use tokio_stream::StreamExt;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::clipboard_echo::ClipboardEcho;
use crate::clipboard_echo::ClipboardWriter;
use crate::render::renderable::Renderable;
use crate::request_state::RequestPhase;
use crate::request_state::RequestStateMachine;
use crate::text_input::TextInput;
use crate::translation_client::TranslationBackend;
use crate::translator_card::TranslatorCard;
use crate::tui::Tui;
use crate::tui::TuiEvent;

const MAX_CARD_WIDTH: u16 = 72;

pub struct App<B, W> {
    input: TextInput,
    requests: RequestStateMachine<B>,
    clipboard: ClipboardEcho<W>,
    exit_requested: bool,
}

impl<B: TranslationBackend, W: ClipboardWriter> App<B, W> {
    pub fn new(backend: Arc<B>, clipboard: W, app_event_tx: AppEventSender) -> Self {
        Self {
            input: TextInput::default(),
            requests: RequestStateMachine::new(backend, app_event_tx.clone()),
            clipboard: ClipboardEcho::new(clipboard, app_event_tx),
            exit_requested: false,
        }
    }

    pub fn phase(&self) -> &RequestPhase {
        self.requests.phase()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn handle_tui_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key_event) => self.handle_key_event(key_event),
            TuiEvent::Paste(pasted) => self.handle_paste(&pasted),
            TuiEvent::Draw => {}
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Esc => self.exit_requested = true,
            KeyCode::Char('c') if ctrl => {
                if self.input.is_empty() {
                    self.exit_requested = true;
                } else {
                    self.input.clear();
                }
            }
            KeyCode::Char('y') if ctrl => self.copy_translation(),
            KeyCode::Char('j') if ctrl => self.input.insert_char('\n'),
            KeyCode::Enter
                if key_event
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                self.input.insert_char('\n');
            }
            KeyCode::Enter => self.requests.submit(self.input.text()),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(ch) if inserts_text(key_event.modifiers) => self.input.insert_char(ch),
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, pasted: &str) {
        // Many terminals send pasted newlines as \r.
        let pasted = pasted.replace("\r\n", "\n").replace('\r', "\n");
        self.input.insert_str(&pasted);
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TranslationSettled(outcome) => self.requests.on_settled(outcome),
            AppEvent::ClipboardAckExpired { generation } => {
                self.clipboard.on_ack_expired(generation);
            }
        }
    }

    fn copy_translation(&mut self) {
        let Self {
            requests,
            clipboard,
            ..
        } = self;
        match requests.phase().copyable_translation() {
            Some(translation) => clipboard.copy(translation),
            None => tracing::trace!("nothing to copy"),
        }
    }

    fn card(&self) -> TranslatorCard<'_> {
        TranslatorCard::new(
            &self.input,
            self.requests.phase(),
            self.clipboard.is_acknowledged(),
        )
    }

    /// Render the card centered in `area`, returning where the cursor belongs.
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
        let card = self.card();
        let width = area.width.min(MAX_CARD_WIDTH);
        let height = card.desired_height(width).min(area.height);
        let card_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );
        card.render(card_area, buf);
        card.cursor_pos(card_area)
    }

    fn draw(&self, tui: &mut Tui) -> anyhow::Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            if let Some(position) = self.render(area, frame.buffer_mut()) {
                frame.set_cursor_position(position);
            }
        })?;
        Ok(())
    }
}

/// AltGr arrives as Ctrl+Alt on some platforms and still produces text.
fn inserts_text(modifiers: KeyModifiers) -> bool {
    let ctrl_alt = KeyModifiers::CONTROL | KeyModifiers::ALT;
    !modifiers.intersects(ctrl_alt) || modifiers.contains(ctrl_alt)
}

/// Run the translator card until the user quits.
pub async fn run_translator<B, W>(
    tui: &mut Tui,
    backend: Arc<B>,
    clipboard: W,
) -> anyhow::Result<()>
where
    B: TranslationBackend,
    W: ClipboardWriter,
{
    let (app_event_tx, mut app_event_rx) = unbounded_channel();
    let mut app = App::new(backend, clipboard, AppEventSender::new(app_event_tx));
    let mut tui_events = tui.event_stream();
    tracing::info!(
        enhanced_keys = tui.enhanced_keys_supported(),
        "translator started"
    );

    app.draw(tui)?;
    while !app.exit_requested() {
        tokio::select! {
            maybe_event = tui_events.next() => {
                let Some(event) = maybe_event else {
                    break;
                };
                app.handle_tui_event(event);
            }
            maybe_app_event = app_event_rx.recv() => {
                let Some(app_event) = maybe_app_event else {
                    break;
                };
                app.handle_app_event(app_event);
            }
        }
        if !app.exit_requested() {
            app.draw(tui)?;
        }
    }

    tracing::info!("translator exiting");
    Ok(())
}
