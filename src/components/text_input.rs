use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::ui::Theme;

/// What a keystroke did to an editable buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text changed
    Changed,
    /// Only the cursor moved
    Moved,
    /// Not an edit key
    Ignored,
}

/// Shared keystroke contract for everything that takes text
pub trait Editable {
    fn edit(&mut self, key: &KeyEvent) -> EditOutcome;
}

/// Single-line text buffer with a cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    text: String,
    /// Cursor position in chars
    cursor: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Text split around the cursor, for rendering
    pub fn spans(&self, focused: bool) -> Vec<Span<'static>> {
        let at = self.byte_index(self.cursor);
        let (before, after) = self.text.split_at(at);
        let mut spans = vec![Span::styled(before.to_string(), Style::default().fg(Theme::FG))];
        if focused {
            spans.push(Span::styled("│", Style::default().fg(Theme::CYAN)));
        }
        spans.push(Span::styled(after.to_string(), Style::default().fg(Theme::FG)));
        spans
    }
}

impl Editable for TextInput {
    fn edit(&mut self, key: &KeyEvent) -> EditOutcome {
        let changed = |did: bool| if did { EditOutcome::Changed } else { EditOutcome::Ignored };

        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(c) if plain => {
                self.insert(c);
                EditOutcome::Changed
            }
            KeyCode::Backspace => changed(self.delete_back()),
            KeyCode::Delete => changed(self.delete_forward()),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                EditOutcome::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.text.chars().count());
                EditOutcome::Moved
            }
            _ => EditOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut input = TextInput::default();
        for c in "al pine".chars() {
            assert_eq!(input.edit(&key(KeyCode::Char(c))), EditOutcome::Changed);
        }
        assert_eq!(input.text(), "al pine");
        assert_eq!(input.edit(&key(KeyCode::Backspace)), EditOutcome::Changed);
        assert_eq!(input.text(), "al pin");
    }

    #[test]
    fn test_cursor_movement_has_no_side_effect() {
        let mut input = TextInput::new("abc");
        assert_eq!(input.edit(&key(KeyCode::Left)), EditOutcome::Moved);
        assert_eq!(input.edit(&key(KeyCode::Left)), EditOutcome::Moved);
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 1);

        input.edit(&key(KeyCode::Char('X')));
        assert_eq!(input.text(), "aXbc");
        input.edit(&key(KeyCode::Delete));
        assert_eq!(input.text(), "aXc");
    }

    #[test]
    fn test_edges_are_ignored() {
        let mut input = TextInput::default();
        assert_eq!(input.edit(&key(KeyCode::Backspace)), EditOutcome::Ignored);
        assert_eq!(input.edit(&key(KeyCode::Right)), EditOutcome::Moved);
        assert_eq!(input.cursor(), 0);
        let ctrl = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(input.edit(&ctrl), EditOutcome::Ignored);
    }
}
