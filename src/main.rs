use statequiz::{catalog::CatalogError, config::SettingsError, QuizError};

fn main() {
    pretty_env_logger::init();

    let result = statequiz::run();
    match result {
        Ok(Some((total_score, max_score))) => {
            println!(
                "You scored {total_score} out of {max_score} ({:.2}%)",
                if max_score == 0 {
                    0.0
                } else {
                    (total_score as f64 / max_score as f64) * 100.0
                }
            );
            if total_score == max_score && max_score > 0 {
                println!("Well done!");
            }
        }
        Ok(None) => {}
        Err(err) => {
            match err {
                QuizError::Catalog(err) => match err {
                    CatalogError::IoError(path, err) => eprintln!(
                        "IoError: {err}, catalog: {}",
                        path.to_str().unwrap_or("unknown")
                    ),
                    CatalogError::SerdeError(path, err) => eprintln!(
                        "SerdeError: {err}, catalog: {}",
                        path.as_ref()
                            .and_then(|path| path.to_str())
                            .unwrap_or("unknown")
                    ),
                    err => eprintln!("InvalidCatalog: {err}"),
                },
                QuizError::Settings(err) => match err {
                    SettingsError::NoHomeDirError() => {
                        eprintln!("NoHomeDir: Unable to find your home directory, try --config")
                    }
                    err => eprintln!("Settings: {err}"),
                },
                QuizError::Session(err) => eprintln!("Session: {err}"),
                QuizError::Ui(err) => match err {
                    statequiz::UiError::IoError(err) => eprintln!("UiError: IoError: {err}"),
                },
                QuizError::Panic(err) => eprintln!("Panicked: {err}"),
            }
            std::process::exit(1);
        }
    }
}
