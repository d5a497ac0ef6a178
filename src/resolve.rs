use std::fmt::Display;

use hashbrown::HashSet;
use rand::{seq::SliceRandom, Rng};

use crate::catalog::Catalog;

/// Turns the raw, comma separated subject list typed on the setup screen into
/// the shuffled list of subjects a session is built from. A blank list means
/// the whole catalog.
///
///```
///# use statequiz::{catalog::Catalog, resolve::resolve};
///let catalog = Catalog::us_states();
///let rng = &mut rand::thread_rng();
///
///let mut subjects = resolve(" texas, CALIFORNIA ,,texas", &catalog, rng).unwrap();
///subjects.sort();
///assert_eq!(subjects, vec!["California", "Texas"]);
///
///let err = resolve("Texas, Atlantis, Gondor", &catalog, rng).unwrap_err();
///assert_eq!(err.invalid(), ["Atlantis", "Gondor"]);
///```
pub fn resolve<R: Rng + ?Sized>(
    raw: &str,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<String>, ValidationError> {
    if raw.trim().is_empty() {
        log::debug!(
            "No subjects requested, using all {} catalog entries",
            catalog.len()
        );
        resolve_subjects(catalog.subjects(), catalog, rng)
    } else {
        resolve_subjects(parse_subjects(raw), catalog, rng)
    }
}

/// Validates, deduplicates and shuffles an already split subject list. Either
/// every subject is known and the whole list comes back, or none of it does.
pub fn resolve_subjects<R, S>(
    subjects: impl IntoIterator<Item = S>,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<String>, ValidationError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut resolved = vec![];
    let mut invalid: Vec<String> = vec![];

    for subject in subjects {
        let subject = subject.as_ref();
        match catalog.get(subject) {
            Some(entry) => {
                if seen.insert(entry.subject.as_str()) {
                    resolved.push(entry.subject.clone());
                }
            }
            None => {
                let token = normalize_subject(subject);
                if !invalid.contains(&token) {
                    invalid.push(token);
                }
            }
        }
    }

    if !invalid.is_empty() {
        log::debug!("Rejected unknown subjects: {}", invalid.join(", "));
        return Err(ValidationError { invalid });
    }

    resolved.shuffle(rng);
    log::debug!("Resolved {} subjects", resolved.len());

    Ok(resolved)
}

/// Splits on commas, trims and drops empty tokens, then normalizes the case
/// of whatever is left.
pub fn parse_subjects(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(normalize_subject)
        .collect()
}

/// Lower-cases a token and capitalizes each whitespace separated word.
/// Whitespace runs collapse into single spaces.
pub fn normalize_subject(token: &str) -> String {
    token
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    invalid: Vec<String>,
}

impl ValidationError {
    /// Every unknown token, normalized, in the order it was typed.
    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Unknown subjects: {}",
            self.invalid.join(", ")
        ))
    }
}
