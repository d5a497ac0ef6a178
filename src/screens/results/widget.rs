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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Gauge, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::{
    catalog::Catalog, color::LinearGradient, report::Report, session::CompletedSession,
    time_fmt::format_clock,
};

use super::{summary, ResultsState};

const COLOR_NOTICE: Color = Color::Yellow;

pub(super) struct ResultsWidget<'a> {
    completed: &'a CompletedSession,
    report: &'a Report,
    catalog: &'a Catalog,
}

impl<'a> ResultsWidget<'a> {
    pub(super) fn new(
        completed: &'a CompletedSession,
        report: &'a Report,
        catalog: &'a Catalog,
    ) -> Self {
        Self {
            completed,
            report,
            catalog,
        }
    }
}

impl StatefulWidget for ResultsWidget<'_> {
    type State = ResultsState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let split = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        )
        .split(area);

        Paragraph::new("Quiz Results").bold().render(split[0], buf);

        Paragraph::new(summary(self.report, self.catalog.labels()))
            .wrap(Wrap { trim: true })
            .fg(Color::Gray)
            .render(split[1], buf);

        if let Some(notice) = &state.notice {
            Paragraph::new(notice.as_str())
                .fg(COLOR_NOTICE)
                .render(split[2], buf);
        }

        let ratio = self.report.ratio();
        let color = LinearGradient::score().sample(ratio);
        Gauge::default()
            .block(Block::bordered().title(" Score "))
            .ratio(ratio)
            .label(format!(
                "{:05.2}% ({}/{})",
                ratio * 100.0,
                self.report.total_score,
                self.report.max_score
            ))
            .gauge_style(Style::default().fg(color.into()))
            .use_unicode(true)
            .render(split[3], buf);

        let report_area = split[4];
        let visible = report_area.height.saturating_sub(2);
        state.max_scroll = (self.report.lines.len() as u16).saturating_sub(visible);
        state.scroll = state.scroll.min(state.max_scroll);

        let lines = self
            .report
            .lines
            .iter()
            .map(|line| Line::styled(line.text.as_str(), Style::default().fg(line.tone.into())))
            .collect::<Vec<_>>();
        Paragraph::new(lines)
            .block(Block::bordered().title(" Report "))
            .scroll((state.scroll, 0))
            .render(report_area, buf);

        Paragraph::new(format!(
            "Total time: {}",
            format_clock(self.completed.elapsed())
        ))
        .render(split[5], buf);

        Paragraph::new("m practice missed · p play again · c close · q quit · ↑/↓ scroll")
            .fg(Color::Gray)
            .render(split[6], buf);
    }
}
