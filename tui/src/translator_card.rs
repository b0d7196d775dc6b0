//! The translator card: language badges, input box with character counter, translate control,
//! and the result region.
//!
//! Rendering is a pure function of the input, the request phase, and the clipboard
//! acknowledgment; nothing here mutates state.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;
use ratatui::widgets::Wrap;
use translatica_protocol::TranslationOutcome;

use crate::input_guard::CharacterGuard;
use crate::input_guard::is_submittable;
use crate::render::Insets;
use crate::render::renderable::ColumnRenderable;
use crate::render::renderable::InsetRenderable;
use crate::render::renderable::Renderable;
use crate::request_state::RequestPhase;
use crate::text_input::TextInput;
use crate::ui_colors::danger_color;
use crate::ui_colors::primary_color;
use crate::ui_colors::primary_light_color;
use crate::ui_colors::secondary_color;
use crate::ui_colors::success_color;

pub const CARD_TITLE: &str = " Translatica ";
pub const SOURCE_LANGUAGE: &str = "English";
pub const TARGET_LANGUAGE: &str = "Spanish";
pub const PLACEHOLDER_TEXT: &str = "Type or paste your English text here...";
pub const TRANSLATE_LABEL: &str = "Translate Now";
pub const PENDING_TEXT: &str = "Translating your text...";
pub const COMPLETE_TEXT: &str = "Translation Complete";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

const INPUT_MIN_ROWS: u16 = 4;
/// Beyond this many rows the input scrolls.
const INPUT_MAX_ROWS: u16 = 6;

pub struct TranslatorCard<'a> {
    input: &'a TextInput,
    phase: &'a RequestPhase,
    copied: bool,
}

impl<'a> TranslatorCard<'a> {
    pub fn new(input: &'a TextInput, phase: &'a RequestPhase, copied: bool) -> Self {
        Self {
            input,
            phase,
            copied,
        }
    }

    fn content(&self) -> ColumnRenderable<'a> {
        let mut column = ColumnRenderable::with([
            Box::new(language_badges()) as Box<dyn Renderable + 'a>,
            Box::new(Line::from("")),
            Box::new(InputBox { input: self.input }),
            Box::new(Line::from("")),
            Box::new(self.translate_control()),
        ]);
        if let Some(result) = result_region(self.phase, self.copied) {
            column.push(Line::from(""));
            column.push(result);
        }
        column.push(Line::from(""));
        column.push(self.key_hints());
        column
    }

    fn translate_control(&self) -> Line<'static> {
        let pending = self.phase.is_pending();
        let enabled = !pending && is_submittable(self.input.text());
        let icon = if pending { "…" } else { "✦" };
        let label = format!(" {TRANSLATE_LABEL} {icon} ");
        let style = if enabled {
            Style::default()
                .fg(Color::White)
                .bg(primary_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Line::from(Span::styled(label, style)).centered()
    }

    fn key_hints(&self) -> Line<'static> {
        let mut hints = vec!["enter".bold(), " translate · ".dim()];
        // Shift+Enter only arrives distinctly with keyboard enhancement; Ctrl+J always does.
        hints.extend(["ctrl+j".bold(), " newline · ".dim()]);
        if self.phase.copyable_translation().is_some() {
            hints.extend(["ctrl+y".bold(), " copy · ".dim()]);
        }
        hints.extend(["esc".bold(), " quit".dim()]);
        Line::from(hints).centered()
    }
}

impl Renderable for TranslatorCard<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = card_block();
        let inner = block.inner(area);
        Widget::render(block, area, buf);
        self.content().render(inner, buf);
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.content().desired_height(width.saturating_sub(2)) + 2
    }

    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        self.content().cursor_pos(card_block().inner(area))
    }
}

fn card_block() -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(primary_color()))
        .title(Line::from(CARD_TITLE.bold()))
}

fn language_badges() -> Line<'static> {
    Line::from(vec![
        format!(" {SOURCE_LANGUAGE} ").fg(primary_light_color()).bold(),
        "  →  ".dim(),
        format!(" {TARGET_LANGUAGE} ").fg(secondary_color()).bold(),
    ])
    .centered()
}

/// `None` while idle; otherwise the progress line, the failure message, or the translation with
/// its copy affordance.
fn result_region<'a>(phase: &RequestPhase, copied: bool) -> Option<Box<dyn Renderable + 'a>> {
    let region: Box<dyn Renderable + 'a> = match phase {
        RequestPhase::Idle => return None,
        RequestPhase::Pending => Box::new(
            Line::from(format!("◌ {PENDING_TEXT}").fg(secondary_color())).centered(),
        ),
        RequestPhase::Settled(TranslationOutcome::Failure { message }) => Box::new(
            Paragraph::new(Line::from(vec![
                "⚠ ".fg(danger_color()).bold(),
                message.clone().fg(danger_color()),
            ]))
            .wrap(Wrap { trim: false }),
        ),
        RequestPhase::Settled(TranslationOutcome::Success { translation }) => {
            Box::new(ColumnRenderable::with([
                Box::new(Line::from(
                    format!("✔ {COMPLETE_TEXT}").fg(success_color()).bold(),
                )) as Box<dyn Renderable + 'a>,
                Box::new(InsetRenderable::new(
                    Paragraph::new(translation.clone()).wrap(Wrap { trim: false }),
                    Insets::tlbr(1, 2, 1, 2),
                )),
                Box::new(copy_affordance(copied)),
            ]))
        }
    };
    Some(Box::new(InsetRenderable::new(region, Insets::horizontal(1))))
}

fn copy_affordance(copied: bool) -> Line<'static> {
    if copied {
        Line::from(format!("[ ✓ {COPIED_LABEL} ]").fg(success_color()).bold())
    } else {
        Line::from(format!("[ ⧉ {COPY_LABEL} ]").fg(primary_light_color()))
    }
}

struct InputBox<'a> {
    input: &'a TextInput,
}

impl InputBox<'_> {
    fn block(&self) -> Block<'static> {
        let guard = CharacterGuard::measure(self.input.text());
        let counter_style = if guard.exceeded {
            Style::default()
                .fg(danger_color())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let counter = Span::styled(format!(" {} ", guard.label()), counter_style);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .title_bottom(Line::from(counter).right_aligned())
    }

    /// First wrapped row shown, keeping the cursor row inside `height`.
    fn scroll_offset(cursor_row: u16, height: u16) -> u16 {
        if height == 0 {
            return 0;
        }
        cursor_row.saturating_sub(height - 1)
    }
}

impl Renderable for InputBox<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        if self.input.is_empty() {
            Widget::render(Line::from(PLACEHOLDER_TEXT.dim()), inner, buf);
            return;
        }

        let layout = self.input.layout(inner.width);
        let scroll = Self::scroll_offset(layout.cursor.1, inner.height);
        let lines: Vec<Line<'static>> = layout.rows.into_iter().map(Line::from).collect();
        Widget::render(Paragraph::new(lines).scroll((scroll, 0)), inner, buf);
    }

    fn desired_height(&self, width: u16) -> u16 {
        let rows = self.input.layout(width.saturating_sub(2)).rows.len();
        u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .clamp(INPUT_MIN_ROWS, INPUT_MAX_ROWS)
            .saturating_add(2)
    }

    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let inner = self.block().inner(area);
        if inner.is_empty() {
            return None;
        }
        let (col, row) = self.input.layout(inner.width).cursor;
        let row = row - Self::scroll_offset(row, inner.height);
        Some((
            inner.x + col.min(inner.width - 1),
            inner.y + row.min(inner.height - 1),
        ))
    }
}
