use std::{fmt::Display, panic::AssertUnwindSafe, time::Instant};

use clap::Parser;
use rand::Rng;

use catalog::{Catalog, CatalogError};
use cli::QuizCli;
use config::{QuizOptions, Settings, SettingsError};
use report::score;
use screens::{
    quiz::{run_quiz, QuizExit},
    results::{show_results, ResultsExit},
    setup::{show_setup, SetupForm},
};
use session::{Session, SessionError};
use terminal::TerminalWrapper;

pub mod catalog;
mod cli;
mod color;
pub mod config;
mod event;
pub mod report;
pub mod resolve;
mod screens;
pub mod session;
mod terminal;
pub mod time_fmt;

type Score = Option<(usize, usize)>;

/// Runs the quiz until the user quits. Returns the score of the last
/// completed session, if any.
pub fn run() -> Result<Score, QuizError> {
    let cli = QuizCli::parse();

    let settings = match cli.config.as_ref() {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::load_from_user_home()?,
    };

    let catalog = match cli.catalog.as_ref().or(settings.catalog.as_ref()) {
        Some(path) => Catalog::load_from_file(path)?,
        None => Catalog::us_states(),
    };
    log::info!(
        "Using catalog \"{}\" with {} entries",
        catalog.name(),
        catalog.len()
    );

    let mut options = QuizOptions::new(&cli, &settings);
    let mut form = SetupForm::new(cli.states);

    std::panic::catch_unwind(AssertUnwindSafe(|| -> Result<Score, QuizError> {
        //NOTE: From this point, stdout/stderr belong to the terminal UI, so
        //panics are caught and handed back as QuizError::Panic to be printed
        //once the terminal is restored.
        let term = &mut TerminalWrapper::new().map_err(UiError::IoError)?;
        play(
            term,
            &catalog,
            &mut form,
            &mut options,
            &mut rand::thread_rng(),
        )
    }))
    .map_err(|err| {
        QuizError::Panic(if let Some(msg) = err.downcast_ref::<String>() {
            msg.clone()
        } else if let Some(msg) = err.downcast_ref::<&str>() {
            (*msg).to_owned()
        } else {
            "Unknown panic occurred".to_owned()
        })
    })?
}

/// Setup, quiz and results, round and round.
fn play<R: Rng + ?Sized>(
    term: &mut TerminalWrapper,
    catalog: &Catalog,
    form: &mut SetupForm,
    options: &mut QuizOptions,
    rng: &mut R,
) -> Result<Score, QuizError> {
    let mut last_score = None;
    let mut next = show_setup(term, form, options, catalog, rng)?;

    while let Some(session) = next {
        next = match run_quiz(term, session, catalog, options)? {
            QuizExit::Quit => None,
            QuizExit::Abandoned => show_setup(term, form, options, catalog, rng)?,
            QuizExit::Completed(completed) => {
                let report = score(completed.records(), completed.quiz_attributes(), catalog);
                last_score = Some((report.total_score, report.max_score));

                match show_results(term, &completed, &report, catalog)? {
                    ResultsExit::PracticeMissed => Some(Session::restart_with(
                        catalog,
                        &report.missed,
                        completed.quiz_attributes(),
                        rng,
                        Instant::now(),
                    )?),
                    ResultsExit::PlayAgain => Some(Session::restart_with(
                        catalog,
                        completed.subjects(),
                        completed.quiz_attributes(),
                        rng,
                        Instant::now(),
                    )?),
                    ResultsExit::Close => {
                        form.clear();
                        show_setup(term, form, options, catalog, rng)?
                    }
                    ResultsExit::Quit => None,
                }
            }
        };
    }

    Ok(last_score)
}

#[derive(Debug)]
pub enum QuizError {
    Catalog(CatalogError),
    Settings(SettingsError),
    Session(SessionError),
    Ui(UiError),
    Panic(String),
}

impl Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(err) => f.write_fmt(format_args!("Catalog: {err}")),
            Self::Settings(err) => f.write_fmt(format_args!("Settings: {err}")),
            Self::Session(err) => f.write_fmt(format_args!("Session: {err}")),
            Self::Ui(err) => f.write_fmt(format_args!("Ui: {err}")),
            Self::Panic(err) => f.write_fmt(format_args!("Panicked: {err}")),
        }
    }
}

impl From<CatalogError> for QuizError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<SettingsError> for QuizError {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}

impl From<SessionError> for QuizError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<UiError> for QuizError {
    fn from(err: UiError) -> Self {
        Self::Ui(err)
    }
}

#[derive(Debug)]
pub enum UiError {
    IoError(std::io::Error),
}

impl Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(err) => f.write_fmt(format_args!("IoError: {err}")),
        }
    }
}
