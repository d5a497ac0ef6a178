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

use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{StatefulWidget, Widget},
    Terminal,
};

use crate::{QuizError, UiError};

type Backend = CrosstermBackend<std::io::Stdout>;

/// Owns the terminal for as long as the quiz runs. Raw mode, the alternate
/// screen and mouse capture are undone in reverse order on drop, including
/// when unwinding from a panic.
pub struct TerminalWrapper {
    terminal: Terminal<Backend>,
    #[allow(unused)]
    screen: ScreenGuard,
}

impl TerminalWrapper {
    pub fn new() -> Result<TerminalWrapper, std::io::Error> {
        let screen = ScreenGuard::enter()?;
        let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

        Ok(TerminalWrapper { terminal, screen })
    }

    pub fn render_widget(&mut self, widget: impl Widget) -> Result<(), QuizError> {
        self.terminal
            .draw(|frame| {
                let area = frame.size();
                frame.render_widget(widget, area)
            })
            .map_err(UiError::IoError)?;
        Ok(())
    }

    pub fn render_stateful_widget<W: StatefulWidget>(
        &mut self,
        widget: W,
        state: &mut W::State,
    ) -> Result<(), QuizError> {
        self.terminal
            .draw(|frame| {
                let area = frame.size();
                frame.render_stateful_widget(widget, area, state)
            })
            .map_err(UiError::IoError)?;
        Ok(())
    }
}

static IN_USE: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Locked,
    RawMode,
    AltScreen,
    MouseCapture,
}

struct ScreenGuard {
    reached: Stage,
}

impl ScreenGuard {
    fn enter() -> Result<Self, std::io::Error> {
        assert!(
            !IN_USE.swap(true, Ordering::SeqCst),
            "Terminal is already being used, cannot lock"
        );

        // Any early return drops the guard, which unwinds whatever was reached.
        let mut guard = Self {
            reached: Stage::Locked,
        };

        enable_raw_mode()?;
        guard.reached = Stage::RawMode;

        execute!(std::io::stdout(), EnterAlternateScreen)?;
        guard.reached = Stage::AltScreen;

        execute!(std::io::stdout(), EnableMouseCapture)?;
        guard.reached = Stage::MouseCapture;

        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if self.reached >= Stage::MouseCapture {
            let _ = execute!(std::io::stdout(), DisableMouseCapture);
        }
        if self.reached >= Stage::AltScreen {
            let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        }
        if self.reached >= Stage::RawMode {
            let _ = disable_raw_mode();
        }
        IN_USE.store(false, Ordering::SeqCst);
    }
}
