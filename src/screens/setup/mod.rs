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

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use widget::SetupWidget;

use crate::{
    catalog::Catalog,
    config::QuizOptions,
    event::{is_interrupt, match_event},
    resolve::resolve,
    screens::{
        input::{Edit, TextCursor},
        plural,
    },
    session::{Session, SessionError},
    terminal::TerminalWrapper,
    QuizError,
};

mod widget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SetupFocus {
    Subjects,
    QuizAttributes,
    WordBox,
}

impl SetupFocus {
    fn next(self) -> Self {
        match self {
            Self::Subjects => Self::QuizAttributes,
            Self::QuizAttributes => Self::WordBox,
            Self::WordBox => Self::Subjects,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Subjects => Self::WordBox,
            Self::QuizAttributes => Self::Subjects,
            Self::WordBox => Self::QuizAttributes,
        }
    }
}

/// The setup screen's form. Survives across sessions so a failed start keeps
/// what was typed.
#[derive(Debug)]
pub(crate) struct SetupForm {
    subjects: String,
    cursor: TextCursor,
    focus: SetupFocus,
    error: Option<String>,
}

impl SetupForm {
    pub(crate) fn new(subjects: Option<String>) -> Self {
        let subjects = subjects.unwrap_or_default();
        Self {
            cursor: TextCursor::at_end(&subjects),
            subjects,
            focus: SetupFocus::Subjects,
            error: None,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new(None);
    }

    /// Resolves the typed list and starts a session from it. On failure the
    /// reason is kept on the form for display and `None` comes back.
    fn start<R: Rng + ?Sized>(
        &mut self,
        catalog: &Catalog,
        quiz_attributes: bool,
        rng: &mut R,
        now: Instant,
    ) -> Option<Session> {
        let labels = catalog.labels();

        let started = resolve(&self.subjects, catalog, rng)
            .map_err(SessionError::from)
            .and_then(|subjects| Session::start(catalog, subjects, quiz_attributes, now));

        match started {
            Ok(session) => {
                self.error = None;
                Some(session)
            }
            Err(err) => {
                log::debug!("Unable to start session: {err}");
                self.error = Some(match err {
                    SessionError::Invalid(err) => format!(
                        "Invalid {}: {}",
                        plural(&labels.subject),
                        err.invalid().join(", ")
                    ),
                    SessionError::Empty => {
                        format!("Enter at least one {}.", labels.subject.to_lowercase())
                    }
                    SessionError::UnknownSubject(subject) => {
                        format!("Invalid {}: {subject}", plural(&labels.subject))
                    }
                });
                None
            }
        }
    }
}

/// Shows the setup form until a session starts, or `None` if the user quits.
pub(crate) fn show_setup<R: Rng + ?Sized>(
    term: &mut TerminalWrapper,
    form: &mut SetupForm,
    options: &mut QuizOptions,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Option<Session>, QuizError> {
    loop {
        term.render_widget(SetupWidget::new(form, catalog, *options))?;

        let focus = form.focus;
        match match_event(|event| match_user_input(event, focus))? {
            UserInput::Edit(edit) => form.cursor.apply(edit, &mut form.subjects),
            UserInput::NextField => form.focus = focus.next(),
            UserInput::PrevField => form.focus = focus.prev(),
            UserInput::Toggle => match focus {
                SetupFocus::QuizAttributes => {
                    options.quiz_attributes = !options.quiz_attributes
                }
                SetupFocus::WordBox => options.show_word_box = !options.show_word_box,
                SetupFocus::Subjects => {}
            },
            UserInput::Start => {
                if let Some(session) =
                    form.start(catalog, options.quiz_attributes, rng, Instant::now())
                {
                    return Ok(Some(session));
                }
            }
            UserInput::Resize => continue,
            UserInput::Quit => return Ok(None),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum UserInput {
    Edit(Edit),
    NextField,
    PrevField,
    Toggle,
    Start,
    Resize,
    Quit,
}

fn match_user_input(event: Event, focus: SetupFocus) -> Option<UserInput> {
    if is_interrupt(&event) {
        return Some(UserInput::Quit);
    }

    match event {
        Event::Key(
            key @ KeyEvent {
                kind: KeyEventKind::Press,
                code,
                modifiers,
                ..
            },
        ) => match code {
            KeyCode::Enter => Some(UserInput::Start),
            KeyCode::Esc => Some(UserInput::Quit),
            KeyCode::Tab | KeyCode::Down => Some(UserInput::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(UserInput::PrevField),
            KeyCode::Char(' ') if focus != SetupFocus::Subjects => Some(UserInput::Toggle),
            _ if focus == SetupFocus::Subjects && !modifiers.contains(KeyModifiers::CONTROL) => {
                Edit::from_key(&key).map(UserInput::Edit)
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(UserInput::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{catalog::Catalog, screens::input::Edit};

    use super::{match_user_input, SetupFocus, SetupForm, UserInput};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn start_with_valid_states() {
        let catalog = Catalog::us_states();
        let mut form = SetupForm::new(Some("texas,  new   york".to_owned()));

        let session = form
            .start(&catalog, true, &mut rng(), Instant::now())
            .expect("Session should start");
        let mut subjects = session
            .records()
            .iter()
            .map(|record| record.correct_subject())
            .collect::<Vec<_>>();
        subjects.sort_unstable();

        assert_eq!(subjects, vec!["New York", "Texas"]);
        assert!(session.quiz_attributes());
        assert!(form.error.is_none());
    }

    #[test]
    fn start_with_blank_uses_every_state() {
        let catalog = Catalog::us_states();
        let mut form = SetupForm::new(None);

        let session = form
            .start(&catalog, false, &mut rng(), Instant::now())
            .expect("Session should start");
        assert_eq!(session.len(), 50);
    }

    #[test]
    fn invalid_states_are_listed() {
        let catalog = Catalog::us_states();
        let mut form = SetupForm::new(Some("Texas, atlantis, Gondor, atlantis".to_owned()));

        assert!(form
            .start(&catalog, false, &mut rng(), Instant::now())
            .is_none());
        assert_eq!(form.error.as_deref(), Some("Invalid states: Atlantis, Gondor"));
        assert_eq!(form.subjects, "Texas, atlantis, Gondor, atlantis");
    }

    #[test]
    fn separators_only_is_empty() {
        let catalog = Catalog::us_states();
        let mut form = SetupForm::new(Some(" , ,, ".to_owned()));

        assert!(form
            .start(&catalog, false, &mut rng(), Instant::now())
            .is_none());
        assert_eq!(form.error.as_deref(), Some("Enter at least one state."));
    }

    #[test]
    fn clear_resets_everything() {
        let mut form = SetupForm::new(Some("Ohio".to_owned()));
        form.focus = SetupFocus::WordBox;
        form.error = Some("Invalid states: Ohyo".to_owned());

        form.clear();
        assert!(form.subjects.is_empty());
        assert_eq!(form.focus, SetupFocus::Subjects);
        assert!(form.error.is_none());
    }

    #[test]
    fn space_types_or_toggles_by_focus() {
        let space = Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));

        assert_eq!(
            match_user_input(space.clone(), SetupFocus::Subjects),
            Some(UserInput::Edit(Edit::Insert(' ')))
        );
        assert_eq!(
            match_user_input(space.clone(), SetupFocus::QuizAttributes),
            Some(UserInput::Toggle)
        );
        assert_eq!(
            match_user_input(
                Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
                SetupFocus::WordBox
            ),
            None
        );
    }

    #[test]
    fn focus_cycles() {
        assert_eq!(SetupFocus::Subjects.next(), SetupFocus::QuizAttributes);
        assert_eq!(SetupFocus::WordBox.next(), SetupFocus::Subjects);
        assert_eq!(SetupFocus::Subjects.prev(), SetupFocus::WordBox);
    }
}
