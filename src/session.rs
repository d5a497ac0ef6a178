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

use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use hashbrown::HashSet;
use rand::Rng;

use crate::{
    catalog::Catalog,
    resolve::{resolve_subjects, ValidationError},
};

/// One question of a session: what the right answers are and what the user
/// last saved for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRecord {
    correct_subject: String,
    correct_attribute: String,
    user_subject: String,
    user_attribute: String,
    skipped_subject: bool,
    skipped_attribute: bool,
}

impl QuestionRecord {
    pub fn new(correct_subject: impl Into<String>, correct_attribute: impl Into<String>) -> Self {
        Self {
            correct_subject: correct_subject.into(),
            correct_attribute: correct_attribute.into(),
            user_subject: String::new(),
            user_attribute: String::new(),
            skipped_subject: false,
            skipped_attribute: false,
        }
    }

    pub fn correct_subject(&self) -> &str {
        &self.correct_subject
    }

    pub fn correct_attribute(&self) -> &str {
        &self.correct_attribute
    }

    pub fn user_subject(&self) -> &str {
        &self.user_subject
    }

    pub fn user_attribute(&self) -> &str {
        &self.user_attribute
    }

    pub fn skipped_subject(&self) -> bool {
        self.skipped_subject
    }

    pub fn skipped_attribute(&self) -> bool {
        self.skipped_attribute
    }

    fn saved_input(&self) -> AnswerInput {
        AnswerInput {
            subject: self.user_subject.clone(),
            attribute: self.user_attribute.clone(),
        }
    }
}

/// Text currently typed into the answer fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerInput {
    pub subject: String,
    pub attribute: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Skip {
    pub subject: bool,
    pub attribute: bool,
}

impl Skip {
    pub const NONE: Skip = Skip {
        subject: false,
        attribute: false,
    };
    pub const SUBJECT: Skip = Skip {
        subject: true,
        attribute: false,
    };
    pub const ATTRIBUTE: Skip = Skip {
        subject: false,
        attribute: true,
    };
}

/// An active quiz. Every transition consumes the session and hands back the
/// next state, so a session can never be observed half updated.
#[derive(Clone, Debug)]
pub struct Session {
    records: Vec<QuestionRecord>,
    index: usize,
    input: AnswerInput,
    quiz_attributes: bool,
    started_at: Instant,
    question_started_at: Instant,
}

/// Where a session ends up after moving forward.
#[derive(Debug)]
pub enum Advanced {
    Active(Session),
    Completed(CompletedSession),
}

impl Session {
    /// One record per distinct subject, in the order given.
    pub fn start<S: AsRef<str>>(
        catalog: &Catalog,
        subjects: impl IntoIterator<Item = S>,
        quiz_attributes: bool,
        now: Instant,
    ) -> Result<Self, SessionError> {
        let mut seen = HashSet::new();
        let mut records = vec![];
        for subject in subjects {
            let subject = subject.as_ref();
            let entry = catalog
                .get(subject)
                .ok_or_else(|| SessionError::UnknownSubject(subject.to_owned()))?;
            // Asked once, however many times it was listed.
            if seen.insert(entry.subject.as_str()) {
                records.push(QuestionRecord::new(&entry.subject, &entry.attribute));
            }
        }

        if records.is_empty() {
            return Err(SessionError::Empty);
        }

        log::info!(
            "Starting session with {} questions (attributes: {quiz_attributes})",
            records.len()
        );

        Ok(Self {
            records,
            index: 0,
            input: AnswerInput::default(),
            quiz_attributes,
            started_at: now,
            question_started_at: now,
        })
    }

    /// Starts over with a fresh, reshuffled session for `subjects`, eg. the
    /// missed subjects of a completed session.
    pub fn restart_with<R, S>(
        catalog: &Catalog,
        subjects: impl IntoIterator<Item = S>,
        quiz_attributes: bool,
        rng: &mut R,
        now: Instant,
    ) -> Result<Self, SessionError>
    where
        R: Rng + ?Sized,
        S: AsRef<str>,
    {
        let subjects = resolve_subjects(subjects, catalog, rng)?;
        log::info!("Restarting with {} subjects", subjects.len());
        Self::start(catalog, subjects, quiz_attributes, now)
    }

    /// Saves the active input into the current record. A skipped field is
    /// stored empty with its skip flag set.
    pub fn record_answer(mut self, skip: Skip) -> Self {
        let input = &self.input;
        let record = &mut self.records[self.index];

        if skip.subject {
            record.user_subject.clear();
            record.skipped_subject = true;
        } else {
            record.user_subject = input.subject.trim().to_owned();
            record.skipped_subject = false;
        }

        if self.quiz_attributes && skip.attribute {
            record.user_attribute.clear();
            record.skipped_attribute = true;
        } else if self.quiz_attributes {
            record.user_attribute = input.attribute.trim().to_owned();
            record.skipped_attribute = false;
        } else {
            record.user_attribute.clear();
            record.skipped_attribute = false;
        }

        self
    }

    pub fn advance(mut self, now: Instant) -> Advanced {
        if self.is_last() {
            log::debug!("Session completed after {} questions", self.records.len());
            return Advanced::Completed(CompletedSession {
                elapsed: self.session_elapsed(now),
                records: self.records,
                quiz_attributes: self.quiz_attributes,
            });
        }

        self.index += 1;
        self.question_started_at = now;
        self.input = self.records[self.index].saved_input();
        log::trace!("Advanced to question {}", self.index + 1);

        Advanced::Active(self)
    }

    pub fn submit(self, skip: Skip, now: Instant) -> Advanced {
        self.record_answer(skip).advance(now)
    }

    /// Goes back one question, saving the current input as a normal answer
    /// first. Does nothing on the first question.
    pub fn retreat(self, now: Instant) -> Self {
        if self.index == 0 {
            return self;
        }

        let mut session = self.record_answer(Skip::NONE);
        session.index -= 1;
        session.question_started_at = now;
        session.input = session.records[session.index].saved_input();
        log::trace!("Went back to question {}", session.index + 1);

        session
    }

    /// Replaces the active input, mostly useful to drive a session without a
    /// terminal.
    pub fn with_input(mut self, subject: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.input = AnswerInput {
            subject: subject.into(),
            attribute: attribute.into(),
        };
        self
    }

    pub fn input(&self) -> &AnswerInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut AnswerInput {
        &mut self.input
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.records.len()
    }

    pub fn current(&self) -> &QuestionRecord {
        &self.records[self.index]
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn quiz_attributes(&self) -> bool {
        self.quiz_attributes
    }

    pub fn session_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn question_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.question_started_at)
    }
}

/// A session that ran past its last question, ready to be scored.
#[derive(Clone, Debug)]
pub struct CompletedSession {
    records: Vec<QuestionRecord>,
    quiz_attributes: bool,
    elapsed: Duration,
}

impl CompletedSession {
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn quiz_attributes(&self) -> bool {
        self.quiz_attributes
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Subjects in the order they were asked.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(QuestionRecord::correct_subject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Empty,
    UnknownSubject(String),
    Invalid(ValidationError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty: A session needs at least one question"),
            Self::UnknownSubject(subject) => f.write_fmt(format_args!(
                "UnknownSubject: \"{subject}\" is not in the catalog"
            )),
            Self::Invalid(err) => f.write_fmt(format_args!("Invalid: {err}")),
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}
