use std::{fmt::Display, path::PathBuf};

use serde::Deserialize;

use crate::cli::QuizCli;

#[derive(Debug)]
pub enum SettingsError {
    NoHomeDirError(),
    ConfigIsDir(PathBuf),
    IoError(PathBuf, std::io::Error),
    SerdeError(PathBuf, serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHomeDirError() => f.write_str("Unable to find user home directory"),
            Self::ConfigIsDir(path) => f.write_fmt(format_args!(
                "Config file is directory: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::IoError(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::SerdeError(path, err) => f.write_fmt(format_args!(
                "SerdeError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
        }
    }
}

/// Defaults read from the user's config file. Every field is optional.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub quiz_capitals: bool,
    pub show_word_box: bool,
    pub show_timers: bool,
    pub catalog: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quiz_capitals: false,
            show_word_box: false,
            show_timers: true,
            catalog: None,
        }
    }
}

const DEFAULT_HOME_CONFIG_PATH: &str = ".config/statequiz/config.json";

impl Settings {
    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();

        if let Ok(metadata) = std::fs::metadata(&path) {
            if metadata.is_file() {
                let json = std::fs::read_to_string(&path)
                    .map_err(|err| SettingsError::IoError(path.clone(), err))?;
                let settings = serde_json::from_str(&json)
                    .map_err(|err| SettingsError::SerdeError(path.clone(), err))?;

                log::debug!("Loaded settings from {}", path.display());
                Ok(settings)
            } else {
                Err(SettingsError::ConfigIsDir(path))
            }
        } else {
            log::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn load_from_user_home() -> Result<Self, SettingsError> {
        let path = get_config_path()?;
        Self::load_from_file(path)
    }
}

fn get_config_path() -> Result<PathBuf, SettingsError> {
    let path = dirs::home_dir();
    if let Some(mut path) = path {
        path.push(DEFAULT_HOME_CONFIG_PATH);
        Ok(path)
    } else {
        Err(SettingsError::NoHomeDirError())
    }
}

/// What the user picked for the current run, after command line flags have
/// been layered over the settings file. The setup and quiz screens change
/// these as the user toggles things.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizOptions {
    pub quiz_attributes: bool,
    pub show_word_box: bool,
    pub show_timers: bool,
}

impl QuizOptions {
    pub fn new(cli: &QuizCli, settings: &Settings) -> Self {
        Self {
            quiz_attributes: cli.capitals || settings.quiz_capitals,
            show_word_box: cli.word_box || settings.show_word_box,
            show_timers: !cli.hide_timers && settings.show_timers,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::cli::QuizCli;

    use super::{QuizOptions, Settings, SettingsError};

    #[test]
    fn load_settings_from_file() {
        let settings =
            Settings::load_from_file("./tests/config.json").expect("Unable to load settings");
        assert!(settings.quiz_capitals);
        assert!(!settings.show_word_box);
        assert!(!settings.show_timers);
        assert_eq!(settings.catalog, Some(PathBuf::from("./tests/catalog.json")));
    }

    #[test]
    fn missing_settings_file_uses_defaults() {
        let settings = Settings::load_from_file("./tests/no_such_config.json")
            .expect("Missing settings should not fail");
        assert_eq!(settings, Settings::default());
        assert!(settings.show_timers);
    }

    #[test]
    fn settings_path_is_dir() {
        assert!(Settings::load_from_file("./tests")
            .is_err_and(|err| matches!(err, SettingsError::ConfigIsDir(_))));
    }

    #[test]
    fn malformed_settings() {
        assert!(Settings::load_from_file("./tests/config_malformed.json")
            .is_err_and(|err| matches!(err, SettingsError::SerdeError(_, _))));
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings {
            quiz_capitals: false,
            show_word_box: true,
            show_timers: true,
            catalog: None,
        };

        let cli = QuizCli::parse_from(["statequiz", "--capitals", "--hide-timers"]);
        assert_eq!(
            QuizOptions::new(&cli, &settings),
            QuizOptions {
                quiz_attributes: true,
                show_word_box: true,
                show_timers: false,
            }
        );

        let cli = QuizCli::parse_from(["statequiz"]);
        assert_eq!(
            QuizOptions::new(&cli, &Settings::default()),
            QuizOptions {
                quiz_attributes: false,
                show_word_box: false,
                show_timers: true,
            }
        );
    }
}
