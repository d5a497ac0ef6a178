use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "statequiz", version = env!("CARGO_PKG_VERSION"), after_help = LOG_HELP)]
pub struct QuizCli {
    #[arg(short = 's', long = "states", value_name = "LIST", help = "States to quiz on, comma separated.", long_help = STATES_HELP)]
    pub states: Option<String>,
    #[arg(short = 'c', long = "capitals", help = "Also quiz on capitals.", default_value_t = false)]
    pub capitals: bool,
    #[arg(short = 'w', long = "word-box", help = "Show the word box.", long_help = WORD_BOX_HELP, default_value_t = false)]
    pub word_box: bool,
    #[arg(long = "hide-timers", help = "Start with the timers hidden.", default_value_t = false)]
    pub hide_timers: bool,
    #[arg(long = "catalog", value_name = "PATH", help = "Catalog JSON file to quiz from.", long_help = CATALOG_HELP)]
    pub catalog: Option<PathBuf>,
    #[arg(long = "config", value_name = "PATH", help = "Settings file to read.", long_help = CONFIG_HELP)]
    pub config: Option<PathBuf>,
}

const STATES_HELP: &str = r#"States to quiz on, comma separated. Case and extra spaces are ignored.
Pre-fills the setup screen. Leave empty to quiz on every state.
Example Usage: statequiz -s "california, Texas, new york""#;
const WORD_BOX_HELP: &str = r#"Show the word box: every state (and capital) in the quiz, sorted. Click an entry to strike it out."#;
const CATALOG_HELP: &str = r#"Catalog JSON file to quiz from instead of the built-in US states. Format:
{
  "name": "...",
  "subject_label": "State",
  "attribute_label": "Capital",
  "reference_size": [1024, 632],
  "entries": [{ "subject": "...", "attribute": "...", "coords": [x, y] }]
}"#;
const CONFIG_HELP: &str = r#"Settings file to read instead of ~/.config/statequiz/config.json.
Keys: quiz_capitals, show_word_box, show_timers, catalog"#;
const LOG_HELP: &str = r#"Logging is controlled by RUST_LOG and written to stderr, eg:
    RUST_LOG=debug statequiz 2> statequiz.log"#;

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::QuizCli;

    #[test]
    fn verify_cli() {
        QuizCli::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let cli = QuizCli::parse_from([
            "statequiz",
            "-s",
            "texas, ohio",
            "-c",
            "--catalog",
            "./tests/catalog.json",
        ]);
        assert_eq!(cli.states.as_deref(), Some("texas, ohio"));
        assert!(cli.capitals);
        assert!(!cli.word_box);
        assert!(!cli.hide_timers);
        assert!(cli.catalog.is_some());
        assert!(cli.config.is_none());
    }
}
