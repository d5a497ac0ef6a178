use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use widget::QuizWidget;
use word_box::WordBox;

use crate::{
    catalog::Catalog,
    config::QuizOptions,
    event::{is_interrupt, match_event_within},
    screens::input::{Edit, TextCursor},
    session::{Advanced, CompletedSession, Session, Skip},
    terminal::TerminalWrapper,
    QuizError,
};

mod widget;
mod word_box;

/// How often the timers are redrawn while no input arrives.
const TICK: Duration = Duration::from_millis(100);

pub(crate) enum QuizExit {
    Completed(CompletedSession),
    /// Back to the setup screen, dropping the session.
    Abandoned,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Field {
    Subject,
    Attribute,
}

pub(crate) struct QuizWidgetState {
    focus: Field,
    cursor: TextCursor,
    word_box: WordBox,
    /// Screen cells of the word box entries from the last draw, by entry index.
    word_box_areas: Vec<Rect>,
}

impl QuizWidgetState {
    fn new(session: &Session) -> Self {
        Self {
            focus: Field::Subject,
            cursor: TextCursor::at_end(&session.input().subject),
            word_box: WordBox::new(session.records()),
            word_box_areas: vec![],
        }
    }

    fn on_question_changed(&mut self, session: &Session) {
        self.focus = Field::Subject;
        self.cursor = TextCursor::at_end(&session.input().subject);
    }

    fn focused_text<'s>(&self, session: &'s mut Session) -> &'s mut String {
        let input = session.input_mut();
        match self.focus {
            Field::Subject => &mut input.subject,
            Field::Attribute => &mut input.attribute,
        }
    }
}

pub(crate) fn run_quiz(
    term: &mut TerminalWrapper,
    mut session: Session,
    catalog: &Catalog,
    options: &mut QuizOptions,
) -> Result<QuizExit, QuizError> {
    let mut state = QuizWidgetState::new(&session);

    loop {
        term.render_stateful_widget(
            QuizWidget::new(&session, catalog, *options, Instant::now()),
            &mut state,
        )?;

        let quiz_attributes = session.quiz_attributes();
        let Some(input) = match_event_within(TICK, |event| {
            match_user_input(event, quiz_attributes, &state.word_box_areas)
        })?
        else {
            continue;
        };

        let skip = match input {
            UserInput::Edit(edit) => {
                let text = state.focused_text(&mut session);
                state.cursor.apply(edit, text);
                continue;
            }
            UserInput::SwitchField => {
                state.focus = match state.focus {
                    Field::Subject => Field::Attribute,
                    Field::Attribute => Field::Subject,
                };
                state.cursor = TextCursor::at_end(state.focused_text(&mut session));
                continue;
            }
            UserInput::Back => {
                session = session.retreat(Instant::now());
                state.on_question_changed(&session);
                continue;
            }
            UserInput::ToggleTimers => {
                options.show_timers = !options.show_timers;
                continue;
            }
            UserInput::ToggleWordBox => {
                options.show_word_box = !options.show_word_box;
                continue;
            }
            UserInput::Strike(index) => {
                state.word_box.toggle(index);
                continue;
            }
            UserInput::Resize => continue,
            UserInput::Abandon => {
                log::info!("Session abandoned at question {}", session.index() + 1);
                return Ok(QuizExit::Abandoned);
            }
            UserInput::Quit => return Ok(QuizExit::Quit),
            UserInput::Submit => Skip::NONE,
            UserInput::Skip(skip) => skip,
        };

        log::debug!(
            "Submitting question {} (skip subject: {}, skip attribute: {})",
            session.index() + 1,
            skip.subject,
            skip.attribute
        );
        session = match session.submit(skip, Instant::now()) {
            Advanced::Active(session) => session,
            Advanced::Completed(completed) => return Ok(QuizExit::Completed(completed)),
        };
        state.on_question_changed(&session);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum UserInput {
    Edit(Edit),
    Submit,
    Skip(Skip),
    Back,
    SwitchField,
    ToggleTimers,
    ToggleWordBox,
    Strike(usize),
    Abandon,
    Quit,
    Resize,
}

fn match_user_input(event: Event, quiz_attributes: bool, word_box: &[Rect]) -> Option<UserInput> {
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
        ) => {
            if modifiers.contains(KeyModifiers::CONTROL) {
                return match code {
                    KeyCode::Char('s') => Some(UserInput::Skip(Skip::SUBJECT)),
                    KeyCode::Char('k') if quiz_attributes => Some(UserInput::Skip(Skip::ATTRIBUTE)),
                    KeyCode::Char('b') => Some(UserInput::Back),
                    KeyCode::Char('t') => Some(UserInput::ToggleTimers),
                    KeyCode::Char('w') => Some(UserInput::ToggleWordBox),
                    _ => None,
                };
            }

            match code {
                KeyCode::Enter => Some(UserInput::Submit),
                KeyCode::PageUp => Some(UserInput::Back),
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down
                    if quiz_attributes =>
                {
                    Some(UserInput::SwitchField)
                }
                KeyCode::Esc => Some(UserInput::Abandon),
                _ => Edit::from_key(&key).map(UserInput::Edit),
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            row,
            ..
        }) => word_box
            .iter()
            .position(|area| area.contains(Position { x: column, y: row }))
            .map(UserInput::Strike),
        Event::Resize(_, _) => Some(UserInput::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;

    use crate::{screens::input::Edit, session::Skip};

    use super::{match_user_input, UserInput};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn control_keys() {
        let ctrl = |c| key(KeyCode::Char(c), KeyModifiers::CONTROL);

        assert_eq!(
            match_user_input(ctrl('s'), true, &[]),
            Some(UserInput::Skip(Skip::SUBJECT))
        );
        assert_eq!(
            match_user_input(ctrl('k'), true, &[]),
            Some(UserInput::Skip(Skip::ATTRIBUTE))
        );
        assert_eq!(match_user_input(ctrl('b'), true, &[]), Some(UserInput::Back));
        assert_eq!(match_user_input(ctrl('t'), true, &[]), Some(UserInput::ToggleTimers));
        assert_eq!(match_user_input(ctrl('w'), true, &[]), Some(UserInput::ToggleWordBox));
        assert_eq!(match_user_input(ctrl('c'), true, &[]), Some(UserInput::Quit));
        assert_eq!(match_user_input(ctrl('x'), true, &[]), None);
    }

    #[test]
    fn attribute_keys_need_attributes() {
        let skip_attribute = key(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(match_user_input(skip_attribute, false, &[]), None);

        let tab = key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(match_user_input(tab.clone(), false, &[]), None);
        assert_eq!(match_user_input(tab, true, &[]), Some(UserInput::SwitchField));
    }

    #[test]
    fn plain_keys() {
        let plain = |code| key(code, KeyModifiers::NONE);

        assert_eq!(match_user_input(plain(KeyCode::Enter), false, &[]), Some(UserInput::Submit));
        assert_eq!(match_user_input(plain(KeyCode::PageUp), false, &[]), Some(UserInput::Back));
        assert_eq!(match_user_input(plain(KeyCode::Esc), false, &[]), Some(UserInput::Abandon));
        assert_eq!(
            match_user_input(plain(KeyCode::Char('q')), false, &[]),
            Some(UserInput::Edit(Edit::Insert('q')))
        );
        assert_eq!(
            match_user_input(plain(KeyCode::Backspace), false, &[]),
            Some(UserInput::Edit(Edit::Backspace))
        );
        assert_eq!(
            match_user_input(Event::Resize(80, 24), false, &[]),
            Some(UserInput::Resize)
        );
    }

    #[test]
    fn clicks_hit_word_box_entries() {
        let areas = [Rect::new(2, 10, 8, 1), Rect::new(10, 10, 8, 1)];

        assert_eq!(match_user_input(click(3, 10), false, &areas), Some(UserInput::Strike(0)));
        assert_eq!(match_user_input(click(17, 10), false, &areas), Some(UserInput::Strike(1)));
        assert_eq!(match_user_input(click(18, 10), false, &areas), None);
        assert_eq!(match_user_input(click(3, 11), false, &areas), None);
    }
}
