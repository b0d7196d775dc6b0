//! Multiline editable text with a cursor, and its soft-wrapped layout.

use std::borrow::Cow;
use std::ops::Range;

use textwrap::WordSplitter;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
}

/// Wrapped rows of the input plus the cursor cell, relative to the top-left of the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub rows: Vec<String>,
    pub cursor: (u16, u16),
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_str(&mut self, text: &str) {
        self.text.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    /// Move to the start of the current line.
    pub fn move_home(&mut self) {
        self.cursor = self.text[..self.cursor].rfind('\n').map_or(0, |idx| idx + 1);
    }

    /// Move to the end of the current line.
    pub fn move_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |idx| self.cursor + idx);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }

    /// Soft-wrap the text at `width` display columns, breaking between words where possible.
    pub fn layout(&self, width: u16) -> InputLayout {
        let width = usize::from(width.max(1));
        let mut rows = Vec::new();
        let mut cursor = (0, 0);
        let mut line_start = 0usize;

        for line in self.text.split('\n') {
            let line_end = line_start + line.len();
            let ranges = wrapped_ranges(line, width);
            for (idx, range) in ranges.iter().enumerate() {
                // Whitespace swallowed at a wrap point belongs to the row before it.
                let row_start = if idx == 0 { 0 } else { range.start };
                let owns_cursor = match ranges.get(idx + 1) {
                    Some(next) => self.cursor < line_start + next.start,
                    None => self.cursor <= line_end,
                };
                if self.cursor >= line_start + row_start && owns_cursor {
                    let col = line[row_start..self.cursor - line_start].width();
                    cursor = (col.min(width - 1), rows.len());
                }
                rows.push(line.get(range.clone()).unwrap_or_default().to_string());
            }
            // Skip the '\n' separator.
            line_start = line_end + 1;
        }

        InputLayout {
            rows,
            cursor: (
                u16::try_from(cursor.0).unwrap_or(u16::MAX),
                u16::try_from(cursor.1).unwrap_or(u16::MAX),
            ),
        }
    }
}

/// Byte ranges of `line` for each wrapped row.
fn wrapped_ranges(line: &str, width: usize) -> Vec<Range<usize>> {
    let options = textwrap::Options::new(width)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
        .word_splitter(WordSplitter::NoHyphenation);
    let mut search_from = 0;
    textwrap::wrap(line, options)
        .iter()
        .map(|row| {
            let start = match row {
                Cow::Borrowed(slice) => borrowed_offset(line, slice),
                Cow::Owned(_) => None,
            }
            .or_else(|| line[search_from..].find(row.as_ref()).map(|idx| search_from + idx))
            .unwrap_or(search_from);
            let end = (start + row.len()).min(line.len());
            search_from = end;
            start..end
        })
        .collect()
}

/// Offset of `slice` inside `line`, if `slice` really points into it.
fn borrowed_offset(line: &str, slice: &str) -> Option<usize> {
    let offset = (slice.as_ptr() as usize).checked_sub(line.as_ptr() as usize)?;
    let end = offset.checked_add(slice.len())?;
    (line.get(offset..end) == Some(slice)).then_some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(text: &str) -> TextInput {
        let mut input = TextInput::default();
        input.insert_str(text);
        input
    }

    #[test]
    fn editing_respects_multibyte_chars() {
        let mut input = input("añb");
        input.move_left();
        input.backspace();
        assert_eq!(input.text(), "ab");
        input.insert_char('ñ');
        assert_eq!(input.text(), "añb");
        input.delete();
        assert_eq!(input.text(), "añ");
    }

    #[test]
    fn home_and_end_stay_on_current_line() {
        let mut input = input("first\nsecond");
        input.move_home();
        input.insert_char('>');
        assert_eq!(input.text(), "first\n>second");
        input.move_end();
        input.insert_char('<');
        assert_eq!(input.text(), "first\n>second<");
    }

    #[test]
    fn layout_wraps_and_tracks_cursor() {
        let input = input("abcdef\ngh");
        let layout = input.layout(4);
        assert_eq!(layout.rows, vec!["abcd", "ef", "gh"]);
        assert_eq!(layout.cursor, (2, 2));
    }

    #[test]
    fn layout_breaks_between_words() {
        let mut input = input("hello world");
        let layout = input.layout(8);
        assert_eq!(layout.rows, vec!["hello", "world"]);
        assert_eq!(layout.cursor, (5, 1));

        for _ in 0.."world".len() {
            input.move_left();
        }
        assert_eq!(input.layout(8).cursor, (0, 1));
        input.move_left();
        assert_eq!(input.layout(8).cursor, (5, 0));
    }

    #[test]
    fn layout_of_empty_input_has_one_row() {
        let layout = TextInput::default().layout(10);
        assert_eq!(layout.rows, vec![String::new()]);
        assert_eq!(layout.cursor, (0, 0));
    }

    #[test]
    fn cursor_after_trailing_newline_is_on_new_row() {
        let layout = input("Hello\n").layout(10);
        assert_eq!(layout.rows, vec!["Hello".to_string(), String::new()]);
        assert_eq!(layout.cursor, (0, 1));
    }

    #[test]
    fn clear_resets_cursor() {
        let mut input = input("Hello");
        input.clear();
        input.insert_char('x');
        assert_eq!(input.text(), "x");
    }
}
