use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Paragraph, StatefulWidget, Widget, Wrap,
    },
};

use crate::{
    catalog::Catalog,
    config::QuizOptions,
    screens::{input::InputWidget, plural},
    session::Session,
    time_fmt::{format_clock, format_clock_tenths},
};

use super::{
    word_box::{Section, WordBox},
    Field, QuizWidgetState,
};

pub(super) struct QuizWidget<'a> {
    session: &'a Session,
    catalog: &'a Catalog,
    options: QuizOptions,
    now: Instant,
}

impl<'a> QuizWidget<'a> {
    pub(super) fn new(
        session: &'a Session,
        catalog: &'a Catalog,
        options: QuizOptions,
        now: Instant,
    ) -> Self {
        Self {
            session,
            catalog,
            options,
            now,
        }
    }
}

const COLOR_PIN: Color = Color::Red;
const COLOR_DOT: Color = Color::DarkGray;
const COLOR_STRUCK: Color = Color::DarkGray;

impl StatefulWidget for QuizWidget<'_> {
    type State = QuizWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.word_box_areas.clear();

        let (header_area, body_area, word_box_area, help_area) = {
            let split = Layout::new(
                Direction::Vertical,
                [
                    Constraint::Length(1),
                    Constraint::Min(8),
                    Constraint::Length(if self.options.show_word_box {
                        area.height / 3
                    } else {
                        0
                    }),
                    Constraint::Length(2),
                ],
            )
            .split(area);
            (split[0], split[1], split[2], split[3])
        };

        let (map_area, panel_area) = {
            let split = Layout::new(
                Direction::Horizontal,
                [Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)],
            )
            .split(body_area);
            (split[0], split[1])
        };

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} Quiz", self.catalog.name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  Question {}/{}",
                self.session.index() + 1,
                self.session.len()
            )),
        ]))
        .render(header_area, buf);

        self.render_map(map_area, buf);
        self.render_panel(panel_area, buf, state);

        if self.options.show_word_box {
            render_word_box(
                &state.word_box,
                self.catalog,
                word_box_area,
                buf,
                &mut state.word_box_areas,
            );
        }

        self.help_line()
            .wrap(Wrap { trim: true })
            .fg(Color::Gray)
            .render(help_area, buf);
    }
}

impl QuizWidget<'_> {
    fn render_map(&self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.catalog.reference_size();
        // Screen coordinates grow downwards, the canvas grows upwards.
        let flip = |(x, y): (f64, f64)| (x, height - y);

        let dots = self
            .catalog
            .entries()
            .iter()
            .map(|entry| flip(entry.coords))
            .collect::<Vec<_>>();
        let pin = self
            .catalog
            .coords(self.session.current().correct_subject())
            .map(flip);
        let radius = width.min(height) / 30.0;

        Canvas::default()
            .block(Block::bordered().title(" Map "))
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &dots,
                    color: COLOR_DOT,
                });
                if let Some((x, y)) = pin {
                    ctx.layer();
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius,
                        color: COLOR_PIN,
                    });
                    ctx.draw(&Points {
                        coords: &[(x, y)],
                        color: COLOR_PIN,
                    });
                }
            })
            .render(area, buf);
    }

    fn render_panel(&self, area: Rect, buf: &mut Buffer, state: &QuizWidgetState) {
        let labels = self.catalog.labels();
        let quiz_attributes = self.session.quiz_attributes();

        let split = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(3),
                Constraint::Length(if quiz_attributes { 3 } else { 0 }),
                Constraint::Length(if self.options.show_timers { 4 } else { 0 }),
                Constraint::Min(0),
            ],
        )
        .split(area);

        let subject_label = format!("What {} is this?", labels.subject.to_lowercase());
        let input = self.session.input();

        let subject = InputWidget::new(&subject_label, &input.subject);
        match state.focus {
            Field::Subject => subject.focused(state.cursor),
            Field::Attribute => subject,
        }
        .render(split[0], buf);

        if quiz_attributes {
            let attribute_label = format!("What is its {}?", labels.attribute.to_lowercase());
            let attribute = InputWidget::new(&attribute_label, &input.attribute);
            match state.focus {
                Field::Attribute => attribute.focused(state.cursor),
                Field::Subject => attribute,
            }
            .render(split[1], buf);
        }

        if self.options.show_timers {
            Paragraph::new(vec![
                Line::from(format!(
                    "Question timer: {}",
                    format_clock_tenths(self.session.question_elapsed(self.now))
                )),
                Line::from(format!(
                    "Quiz timer:     {}",
                    format_clock(self.session.session_elapsed(self.now))
                )),
            ])
            .block(Block::bordered().title(" Timers "))
            .render(split[2], buf);
        }

        let record = self.session.current();
        let mut notes = vec![];
        if record.skipped_subject() {
            notes.push(Line::styled(
                format!("{} skipped last time", labels.subject),
                Style::default().fg(Color::Gray),
            ));
        }
        if quiz_attributes && record.skipped_attribute() {
            notes.push(Line::styled(
                format!("{} skipped last time", labels.attribute),
                Style::default().fg(Color::Gray),
            ));
        }
        Paragraph::new(notes).render(split[3], buf);
    }

    fn help_line(&self) -> Paragraph<'static> {
        let labels = self.catalog.labels();
        let mut help = format!(
            "Enter submit · Ctrl+S skip {}",
            labels.subject.to_lowercase()
        );
        if self.session.quiz_attributes() {
            help.push_str(&format!(
                " · Ctrl+K skip {} · Tab switch field",
                labels.attribute.to_lowercase()
            ));
        }
        if !self.session.is_first() {
            help.push_str(" · Ctrl+B back");
        }
        help.push_str(" · Ctrl+T timers · Ctrl+W word box · Esc setup · Ctrl+C quit");

        Paragraph::new(help)
    }
}

fn render_word_box(
    word_box: &WordBox,
    catalog: &Catalog,
    area: Rect,
    buf: &mut Buffer,
    areas: &mut Vec<Rect>,
) {
    let block = Block::bordered().title(" Word Box (click entries to strike out) ");
    let inner = block.inner(area);
    block.render(area, buf);

    areas.resize(word_box.entries().len(), Rect::default());

    let labels = catalog.labels();
    let mut y = inner.y;
    for (section, label) in [
        (Section::Subjects, &labels.subject),
        (Section::Attributes, &labels.attribute),
    ] {
        if y >= inner.bottom() {
            break;
        }

        Paragraph::new(plural(label).to_uppercase())
            .bold()
            .render(Rect::new(inner.x, y, inner.width, 1), buf);
        y += 1;

        let entries = word_box.section(section).collect::<Vec<_>>();
        let count = entries.len() as u16;
        let column_width = entries
            .iter()
            .map(|(_, entry)| entry.text.chars().count() as u16 + 2)
            .max()
            .unwrap_or(1)
            .min(inner.width.max(1));
        let columns = (inner.width / column_width).max(1);

        for (n, (index, entry)) in entries.into_iter().enumerate() {
            let row = y + (n as u16 / columns);
            if row >= inner.bottom() {
                break;
            }
            let cell = Rect::new(
                inner.x + (n as u16 % columns) * column_width,
                row,
                column_width,
                1,
            );

            let style = if entry.struck {
                Style::default()
                    .fg(COLOR_STRUCK)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            Paragraph::new(Span::styled(entry.text.as_str(), style)).render(cell, buf);
            areas[index] = cell;
        }

        // One blank row between sections.
        y = y.saturating_add(count.div_ceil(columns) + 1);
    }
}
