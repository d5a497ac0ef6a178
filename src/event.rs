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

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{QuizError, UiError};

/// Blocks until `match_fn` accepts an event.
pub fn match_event<T>(mut match_fn: impl FnMut(Event) -> Option<T>) -> Result<T, QuizError> {
    loop {
        if event::poll(Duration::MAX).map_err(UiError::IoError)? {
            let event = event::read().map_err(UiError::IoError)?;
            if let Some(value) = match_fn(event) {
                return Ok(value);
            }
        }
    }
}

/// Like [`match_event`], but gives up after `timeout`, returning `None` so the
/// caller can redraw.
pub fn match_event_within<T>(
    timeout: Duration,
    mut match_fn: impl FnMut(Event) -> Option<T>,
) -> Result<Option<T>, QuizError> {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining).map_err(UiError::IoError)? {
            return Ok(None);
        }

        let event = event::read().map_err(UiError::IoError)?;
        if let Some(value) = match_fn(event) {
            return Ok(Some(value));
        }
    }
}

/// Ctrl+C, which quits from every screen.
pub fn is_interrupt(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code: KeyCode::Char('c'),
            modifiers,
            ..
        }) if modifiers.contains(KeyModifiers::CONTROL)
    )
}
