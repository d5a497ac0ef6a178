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

use crate::{catalog::Catalog, session::QuestionRecord};

/// Colour class of a report line. The presentation picks the actual colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Default,
    Correct,
    Incorrect,
    NoAnswer,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLine {
    pub text: String,
    pub tone: Tone,
}

impl ReportLine {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn blank() -> Self {
        Self::new("", Tone::Default)
    }
}

/// How a single answer field was judged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong(String),
    NoAnswer,
    Skipped,
}

impl Outcome {
    pub fn judge(user: &str, skipped: bool, correct: &str) -> Self {
        let user = user.trim();
        if skipped {
            Self::Skipped
        } else if user.is_empty() {
            Self::NoAnswer
        } else if user.to_lowercase() == correct.to_lowercase() {
            Self::Correct
        } else {
            Self::Wrong(user.to_owned())
        }
    }

    pub fn points(&self) -> usize {
        match self {
            Self::Correct => 1,
            _ => 0,
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Correct => Tone::Correct,
            Self::Wrong(_) => Tone::Incorrect,
            Self::NoAnswer => Tone::NoAnswer,
            Self::Skipped => Tone::Skipped,
        }
    }

    fn describe(&self, correct: &str) -> String {
        match self {
            Self::Correct => format!("CORRECT (+1) (Correct: {correct})"),
            Self::Wrong(user) => format!("WRONG (Your answer: {user}) (Correct: {correct}) (+0)"),
            Self::NoAnswer => format!("NO ANSWER (Correct: {correct}) (+0)"),
            Self::Skipped => format!("SKIPPED / I don't know (+0) (Correct: {correct})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub total_score: usize,
    pub max_score: usize,
    pub lines: Vec<ReportLine>,
    /// Subjects with at least one field not answered correctly, in the order
    /// they were asked.
    pub missed: Vec<String>,
}

impl Report {
    pub fn is_perfect(&self) -> bool {
        self.missed.is_empty()
    }

    pub fn ratio(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            self.total_score as f64 / self.max_score as f64
        }
    }
}

const RESULTS_MARKER: &str = "=== Results ===";

pub fn score(records: &[QuestionRecord], quiz_attributes: bool, catalog: &Catalog) -> Report {
    let labels = catalog.labels();
    let mut body = Vec::with_capacity(records.len() * if quiz_attributes { 4 } else { 3 });
    let mut missed = vec![];
    let mut total_score = 0;

    for (i, record) in records.iter().enumerate() {
        let subject = record.correct_subject();
        body.push(ReportLine::new(
            format!("Question {}: {subject}", i + 1),
            Tone::Default,
        ));

        let mut fields = vec![(
            &labels.subject,
            Outcome::judge(record.user_subject(), record.skipped_subject(), subject),
            subject,
        )];
        if quiz_attributes {
            let attribute = record.correct_attribute();
            fields.push((
                &labels.attribute,
                Outcome::judge(
                    record.user_attribute(),
                    record.skipped_attribute(),
                    attribute,
                ),
                attribute,
            ));
        }

        let mut all_correct = true;
        for (label, outcome, correct) in fields {
            total_score += outcome.points();
            all_correct &= outcome.is_correct();
            body.push(ReportLine::new(
                format!("  {label}: {}", outcome.describe(correct)),
                outcome.tone(),
            ));
        }

        if !all_correct {
            missed.push(subject.to_owned());
        }

        body.push(ReportLine::blank());
    }

    let max_score = records.len() * if quiz_attributes { 2 } else { 1 };

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(ReportLine::new(RESULTS_MARKER, Tone::Default));
    lines.push(ReportLine::new(
        format!("You scored {total_score} out of {max_score}."),
        Tone::Default,
    ));
    lines.append(&mut body);

    log::info!(
        "Scored {total_score} out of {max_score}, {} missed",
        missed.len()
    );

    Report {
        total_score,
        max_score,
        lines,
        missed,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crate::{
        catalog::{tests::small_catalog, Catalog},
        session::{Advanced, CompletedSession, Session, Skip},
    };

    use super::{score, Outcome, ReportLine, Tone};

    /// Drives a session through `answers` (subject, attribute, skip) and
    /// returns it completed.
    fn play(
        catalog: &Catalog,
        subjects: &[&str],
        quiz_attributes: bool,
        answers: &[(&str, &str, Skip)],
    ) -> CompletedSession {
        let now = Instant::now();
        let mut session = Session::start(catalog, subjects.iter(), quiz_attributes, now)
            .expect("Unable to start session");

        for (subject, attribute, skip) in answers {
            match session.with_input(*subject, *attribute).submit(*skip, now) {
                Advanced::Active(next) => session = next,
                Advanced::Completed(completed) => return completed,
            }
        }

        panic!("Not enough answers to complete the session");
    }

    #[test]
    fn judge_outcomes() {
        assert_eq!(Outcome::judge("sacramento", false, "Sacramento"), Outcome::Correct);
        assert_eq!(Outcome::judge("SACRAMENTO", false, "Sacramento"), Outcome::Correct);
        assert_eq!(Outcome::judge("   ", false, "Sacramento"), Outcome::NoAnswer);
        assert_eq!(Outcome::judge("Sacramento", true, "Sacramento"), Outcome::Skipped);
        assert_eq!(
            Outcome::judge("Los Angeles", false, "Sacramento"),
            Outcome::Wrong("Los Angeles".to_owned())
        );
        assert_eq!(Outcome::judge("Sacramento ", false, "Sacramento").points(), 1);
    }

    #[test]
    fn alabama_alaska_example() {
        let catalog = small_catalog(&[("Alabama", "Montgomery"), ("Alaska", "Juneau")]);
        let completed = play(
            &catalog,
            &["Alabama", "Alaska"],
            true,
            &[
                ("Alabama", "wrong city", Skip::NONE),
                ("", "Juneau", Skip::SUBJECT),
            ],
        );

        let report = score(completed.records(), true, &catalog);
        assert_eq!(report.total_score, 2);
        assert_eq!(report.max_score, 4);
        assert_eq!(report.missed, vec!["Alabama", "Alaska"]);
        assert!(!report.is_perfect());
        assert_eq!(report.ratio(), 0.5);
    }

    #[test]
    fn report_lines() {
        let catalog = small_catalog(&[("Alabama", "Montgomery"), ("Alaska", "Juneau")]);
        let completed = play(
            &catalog,
            &["Alabama", "Alaska"],
            true,
            &[
                ("Alabama", "wrong city", Skip::NONE),
                ("", "juneau", Skip::SUBJECT),
            ],
        );

        let report = score(completed.records(), true, &catalog);
        let line = |text: &str, tone| ReportLine {
            text: text.to_owned(),
            tone,
        };

        assert_eq!(
            report.lines,
            vec![
                line("=== Results ===", Tone::Default),
                line("You scored 2 out of 4.", Tone::Default),
                line("Question 1: Alabama", Tone::Default),
                line("  State: CORRECT (+1) (Correct: Alabama)", Tone::Correct),
                line(
                    "  Capital: WRONG (Your answer: wrong city) (Correct: Montgomery) (+0)",
                    Tone::Incorrect
                ),
                line("", Tone::Default),
                line("Question 2: Alaska", Tone::Default),
                line(
                    "  State: SKIPPED / I don't know (+0) (Correct: Alaska)",
                    Tone::Skipped
                ),
                line("  Capital: CORRECT (+1) (Correct: Juneau)", Tone::Correct),
                line("", Tone::Default),
            ]
        );
    }

    #[test]
    fn attributes_disabled() {
        let catalog = Catalog::us_states();
        let completed = play(
            &catalog,
            &["California", "Texas", "Ohio"],
            false,
            &[
                ("california", "", Skip::NONE),
                ("", "", Skip::NONE),
                ("Iowa", "Columbus", Skip::NONE),
            ],
        );

        let report = score(completed.records(), false, &catalog);
        assert_eq!(report.total_score, 1);
        assert_eq!(report.max_score, 3);
        assert_eq!(report.missed, vec!["Texas", "Ohio"]);
        assert!(report
            .lines
            .iter()
            .all(|line| !line.text.starts_with("  Capital")));
        assert!(report
            .lines
            .contains(&line_of("  State: NO ANSWER (Correct: Texas) (+0)", Tone::NoAnswer)));
    }

    #[test]
    fn perfect_session_misses_nothing() {
        let catalog = Catalog::us_states();
        let completed = play(
            &catalog,
            &["California"],
            true,
            &[("CALIFORNIA", "sacramento", Skip::NONE)],
        );

        let report = score(completed.records(), true, &catalog);
        assert_eq!(report.total_score, report.max_score);
        assert!(report.is_perfect());
        assert_eq!(report.lines[1].text, "You scored 2 out of 2.");
    }

    #[test]
    fn correct_attribute_does_not_rescue_wrong_subject() {
        let catalog = Catalog::us_states();
        let completed = play(
            &catalog,
            &["Nevada"],
            true,
            &[("Utah", "Carson City", Skip::NONE)],
        );

        let report = score(completed.records(), true, &catalog);
        assert_eq!(report.total_score, 1);
        assert_eq!(report.missed, vec!["Nevada"]);
    }

    #[test]
    fn score_never_exceeds_max() {
        let catalog = Catalog::us_states();
        let subjects = ["Maine", "Idaho", "Kansas", "Hawaii"];
        let answers = [
            ("maine", "augusta", Skip::NONE),
            ("", "", Skip::SUBJECT),
            ("kansas", "", Skip::ATTRIBUTE),
            ("hawaii", "wrong", Skip::NONE),
        ];

        for quiz_attributes in [false, true] {
            let completed = play(&catalog, &subjects, quiz_attributes, &answers);
            let report = score(completed.records(), quiz_attributes, &catalog);
            assert!(report.total_score <= report.max_score);
            assert_eq!(
                report.max_score,
                subjects.len() * if quiz_attributes { 2 } else { 1 }
            );

            for record in completed.records() {
                let subject_ok = Outcome::judge(
                    record.user_subject(),
                    record.skipped_subject(),
                    record.correct_subject(),
                )
                .is_correct();
                let attribute_ok = !quiz_attributes
                    || Outcome::judge(
                        record.user_attribute(),
                        record.skipped_attribute(),
                        record.correct_attribute(),
                    )
                    .is_correct();
                let is_missed = report
                    .missed
                    .iter()
                    .any(|missed| missed == record.correct_subject());
                assert_eq!(is_missed, !(subject_ok && attribute_ok));
            }
        }
    }

    fn line_of(text: &str, tone: Tone) -> ReportLine {
        ReportLine {
            text: text.to_owned(),
            tone,
        }
    }
}
