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

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::{
    catalog::Catalog,
    config::QuizOptions,
    resolve::normalize_subject,
    screens::{input::InputWidget, plural},
};

use super::{SetupFocus, SetupForm};

const COLOR_FOCUSED: Color = Color::Yellow;
const COLOR_ERROR: Color = Color::Red;

pub(super) struct SetupWidget<'a> {
    form: &'a SetupForm,
    catalog: &'a Catalog,
    options: QuizOptions,
}

impl<'a> SetupWidget<'a> {
    pub(super) fn new(form: &'a SetupForm, catalog: &'a Catalog, options: QuizOptions) -> Self {
        Self {
            form,
            catalog,
            options,
        }
    }

    fn checkbox(&self, label: String, checked: bool, focus: SetupFocus) -> Line<'static> {
        let mark = if checked { "[x]" } else { "[ ]" };
        let style = if self.form.focus == focus {
            Style::default().fg(COLOR_FOCUSED)
        } else {
            Style::default()
        };
        Line::styled(format!("{mark} {label}"), style)
    }
}

impl Widget for SetupWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(
            Line::styled(
                format!(" {} Quiz ", self.catalog.name()),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center),
        );
        let inner = block.inner(area);
        block.render(area, buf);

        let split = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ],
        )
        .split(inner);

        let subject = self.catalog.labels().subject.to_lowercase();
        let subjects = plural(&self.catalog.labels().subject);
        Paragraph::new(format!(
            "Enter {subjects} to quiz on, separated by commas. Leave empty to quiz on every {subject}."
        ))
        .wrap(Wrap { trim: true })
        .render(split[0], buf);

        let label = normalize_subject(&subjects);
        let field = InputWidget::new(&label, &self.form.subjects);
        match self.form.focus {
            SetupFocus::Subjects => field.focused(self.form.cursor),
            _ => field,
        }
        .render(split[1], buf);

        Paragraph::new(vec![
            self.checkbox(
                format!("Also quiz on {}?", plural(&self.catalog.labels().attribute)),
                self.options.quiz_attributes,
                SetupFocus::QuizAttributes,
            ),
            self.checkbox(
                "Show word box?".to_owned(),
                self.options.show_word_box,
                SetupFocus::WordBox,
            ),
        ])
        .render(split[2], buf);

        if let Some(error) = &self.form.error {
            Paragraph::new(error.as_str())
                .wrap(Wrap { trim: true })
                .fg(COLOR_ERROR)
                .render(split[3], buf);
        }

        Paragraph::new("Enter start · Tab next field · Space toggle · Esc quit")
            .fg(Color::Gray)
            .render(split[5], buf);
    }
}
