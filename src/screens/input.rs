/*
 * Copyright (C) 2024 Clownvin <123clownvin@gmail.com>
 *
 * This file is part of Statequiz.
 *
 * Statequiz is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Statequiz is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Statequiz.  If not, see <http://www.gnu.org/licenses/>.
 */

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// A single edit to a line of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

impl Edit {
    pub(crate) fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Self::Insert(c))
            }
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Delete => Some(Self::Delete),
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Home => Some(Self::Home),
            KeyCode::End => Some(Self::End),
            _ => None,
        }
    }
}

/// Cursor position within a line of text, counted in chars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextCursor(usize);

impl TextCursor {
    pub(crate) fn at_end(text: &str) -> Self {
        Self(text.chars().count())
    }

    pub(crate) fn position(&self) -> usize {
        self.0
    }

    pub(crate) fn apply(&mut self, edit: Edit, text: &mut String) {
        let len = text.chars().count();
        self.0 = self.0.min(len);

        match edit {
            Edit::Insert(c) => {
                text.insert(byte_offset(text, self.0), c);
                self.0 += 1;
            }
            Edit::Backspace => {
                if self.0 > 0 {
                    self.0 -= 1;
                    text.remove(byte_offset(text, self.0));
                }
            }
            Edit::Delete => {
                if self.0 < len {
                    text.remove(byte_offset(text, self.0));
                }
            }
            Edit::Left => self.0 = self.0.saturating_sub(1),
            Edit::Right => self.0 = (self.0 + 1).min(len),
            Edit::Home => self.0 = 0,
            Edit::End => self.0 = len,
        }
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

const COLOR_FOCUSED: Color = Color::Yellow;

/// A bordered, single line text field. Draws its own cursor when focused.
pub(crate) struct InputWidget<'a> {
    label: &'a str,
    text: &'a str,
    cursor: Option<TextCursor>,
}

impl<'a> InputWidget<'a> {
    pub(crate) fn new(label: &'a str, text: &'a str) -> Self {
        Self {
            label,
            text,
            cursor: None,
        }
    }

    pub(crate) fn focused(mut self, cursor: TextCursor) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(format!(" {} ", self.label));

        let Some(cursor) = self.cursor else {
            Paragraph::new(self.text).block(block).render(area, buf);
            return;
        };

        let chars = self.text.chars().collect::<Vec<_>>();
        let cursor = cursor.position().min(chars.len());

        // Scroll so the cursor stays inside the box.
        let width = area.width.saturating_sub(2).max(1) as usize;
        let start = (cursor + 1).saturating_sub(width);

        let before = chars[start..cursor].iter().collect::<String>();
        let under = chars.get(cursor).copied().unwrap_or(' ').to_string();
        let after = chars
            .get(cursor + 1..)
            .map(|rest| rest.iter().collect::<String>())
            .unwrap_or_default();

        Paragraph::new(Line::from(vec![
            Span::raw(before),
            Span::styled(under, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ]))
        .block(block.border_style(Style::default().fg(COLOR_FOCUSED)))
        .render(area, buf)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Edit, TextCursor};

    fn type_into(text: &mut String, cursor: &mut TextCursor, edits: &[Edit]) {
        for edit in edits {
            cursor.apply(*edit, text);
        }
    }

    #[test]
    fn insert_and_delete() {
        let mut text = String::new();
        let mut cursor = TextCursor::default();
        type_into(
            &mut text,
            &mut cursor,
            &[
                Edit::Insert('O'),
                Edit::Insert('i'),
                Edit::Insert('o'),
                Edit::Left,
                Edit::Insert('h'),
            ],
        );
        assert_eq!(text, "Ohio");
        assert_eq!(cursor.position(), 3);

        type_into(&mut text, &mut cursor, &[Edit::Backspace, Edit::Delete]);
        assert_eq!(text, "Oi");
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn edges_are_noops() {
        let mut text = "Utah".to_owned();
        let mut cursor = TextCursor::default();
        type_into(&mut text, &mut cursor, &[Edit::Backspace, Edit::Left]);
        assert_eq!(text, "Utah");
        assert_eq!(cursor.position(), 0);

        type_into(&mut text, &mut cursor, &[Edit::End, Edit::Delete, Edit::Right]);
        assert_eq!(text, "Utah");
        assert_eq!(cursor, TextCursor::at_end("Utah"));
    }

    #[test]
    fn multibyte_chars() {
        let mut text = "Bogotá".to_owned();
        let mut cursor = TextCursor::at_end(&text);
        type_into(&mut text, &mut cursor, &[Edit::Backspace, Edit::Insert('a')]);
        assert_eq!(text, "Bogota");

        type_into(&mut text, &mut cursor, &[Edit::Home, Edit::Insert('¿')]);
        assert_eq!(text, "¿Bogota");
    }

    #[test]
    fn cursor_clamped_to_replaced_text() {
        let mut text = "Mississippi".to_owned();
        let mut cursor = TextCursor::at_end(&text);
        text = "Ohio".to_owned();
        cursor.apply(Edit::Insert('!'), &mut text);
        assert_eq!(text, "Ohio!");
    }

    #[test]
    fn keys_to_edits() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert_eq!(
            Edit::from_key(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Edit::Insert('A'))
        );
        assert_eq!(
            Edit::from_key(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            Edit::from_key(&key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Edit::Backspace)
        );
        assert_eq!(Edit::from_key(&key(KeyCode::Enter, KeyModifiers::NONE)), None);
    }
}
