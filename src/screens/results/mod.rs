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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use widget::ResultsWidget;

use crate::{
    catalog::{Catalog, FieldLabels},
    event::{is_interrupt, match_event},
    report::Report,
    screens::plural,
    session::CompletedSession,
    terminal::TerminalWrapper,
    QuizError,
};

mod widget;

pub(crate) enum ResultsExit {
    PracticeMissed,
    PlayAgain,
    /// Back to setup with an empty form.
    Close,
    Quit,
}

#[derive(Debug, Default)]
pub(crate) struct ResultsState {
    scroll: u16,
    /// Set by the widget from the height it had to work with.
    max_scroll: u16,
    notice: Option<String>,
}

impl ResultsState {
    fn scroll_by(&mut self, delta: i32) {
        self.scroll = (self.scroll as i32 + delta).clamp(0, self.max_scroll as i32) as u16;
    }
}

pub(crate) fn show_results(
    term: &mut TerminalWrapper,
    completed: &CompletedSession,
    report: &Report,
    catalog: &Catalog,
) -> Result<ResultsExit, QuizError> {
    let mut state = ResultsState::default();

    loop {
        term.render_stateful_widget(ResultsWidget::new(completed, report, catalog), &mut state)?;

        match match_event(match_user_input)? {
            UserInput::PracticeMissed if report.missed.is_empty() => {
                state.notice = Some(nothing_missed(catalog.labels()));
            }
            UserInput::PracticeMissed => return Ok(ResultsExit::PracticeMissed),
            UserInput::PlayAgain => return Ok(ResultsExit::PlayAgain),
            UserInput::Close => return Ok(ResultsExit::Close),
            UserInput::Quit => return Ok(ResultsExit::Quit),
            UserInput::Scroll(delta) => state.scroll_by(delta),
            UserInput::Resize => continue,
        }
    }
}

fn summary(report: &Report, labels: &FieldLabels) -> String {
    if report.missed.is_empty() {
        format!("You answered all {} correctly!", plural(&labels.subject))
    } else {
        format!(
            "You missed {} {}(s). You can practice only those or replay the entire quiz.",
            report.missed.len(),
            labels.subject.to_lowercase()
        )
    }
}

fn nothing_missed(labels: &FieldLabels) -> String {
    format!("You did not miss any {}.", plural(&labels.subject))
}

#[derive(Debug, PartialEq, Eq)]
enum UserInput {
    PracticeMissed,
    PlayAgain,
    Close,
    Quit,
    Scroll(i32),
    Resize,
}

const PAGE: i32 = 10;

fn match_user_input(event: Event) -> Option<UserInput> {
    if is_interrupt(&event) {
        return Some(UserInput::Quit);
    }

    match event {
        Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            code,
            ..
        }) => match code {
            KeyCode::Char('m') => Some(UserInput::PracticeMissed),
            KeyCode::Char('p') => Some(UserInput::PlayAgain),
            KeyCode::Char('c') | KeyCode::Esc => Some(UserInput::Close),
            KeyCode::Char('q') => Some(UserInput::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Scroll(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Scroll(1)),
            KeyCode::PageUp => Some(UserInput::Scroll(-PAGE)),
            KeyCode::PageDown => Some(UserInput::Scroll(PAGE)),
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    use crate::{
        catalog::{tests::small_catalog, Catalog},
        report::score,
        session::QuestionRecord,
    };

    use super::{match_user_input, nothing_missed, summary, ResultsState, UserInput};

    #[test]
    fn summaries() {
        let catalog = small_catalog(&[("Texas", "Austin"), ("Ohio", "Columbus")]);
        let records = [QuestionRecord::new("Texas", "Austin")];
        let report = score(&records, false, &catalog);
        assert_eq!(
            summary(&report, catalog.labels()),
            "You missed 1 state(s). You can practice only those or replay the entire quiz."
        );

        let us = Catalog::us_states();
        let perfect = score(&[], false, &us);
        assert_eq!(summary(&perfect, us.labels()), "You answered all states correctly!");
        assert_eq!(nothing_missed(us.labels()), "You did not miss any states.");
    }

    #[test]
    fn scroll_is_clamped() {
        let mut state = ResultsState {
            max_scroll: 12,
            ..Default::default()
        };
        state.scroll_by(-1);
        assert_eq!(state.scroll, 0);
        state.scroll_by(10);
        state.scroll_by(10);
        assert_eq!(state.scroll, 12);
        state.scroll_by(-3);
        assert_eq!(state.scroll, 9);
    }

    #[test]
    fn keys() {
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(match_user_input(key(KeyCode::Char('m'))), Some(UserInput::PracticeMissed));
        assert_eq!(match_user_input(key(KeyCode::Char('p'))), Some(UserInput::PlayAgain));
        assert_eq!(match_user_input(key(KeyCode::Esc)), Some(UserInput::Close));
        assert_eq!(match_user_input(key(KeyCode::Char('q'))), Some(UserInput::Quit));
        assert_eq!(match_user_input(key(KeyCode::PageDown)), Some(UserInput::Scroll(10)));
        assert_eq!(match_user_input(key(KeyCode::Char('x'))), None);
    }
}
