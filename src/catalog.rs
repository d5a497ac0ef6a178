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
    fmt::{Debug, Display},
    path::PathBuf,
};

use hashbrown::HashMap;
use serde::Deserialize;

use crate::resolve::normalize_subject;

/// Reference data a quiz is drawn from: subjects, the attribute asked about
/// each one, and where each subject sits on the map.
///
/// Example:
///```
///# use statequiz::catalog::Catalog;
///let json = r#"{
///  "name": "Pacific",
///  "subject_label": "State",
///  "attribute_label": "Capital",
///  "entries": [
///    { "subject": "California", "attribute": "Sacramento", "coords": [75, 297] },
///    { "subject": "Oregon", "attribute": "Salem", "coords": [108, 128] }
///  ]
///}"#;
///let catalog = Catalog::from_json(json).expect("valid catalog");
///assert_eq!(catalog.attribute("Oregon"), Some("Salem"));
///assert_eq!(catalog.len(), 2);
///```
pub struct Catalog {
    name: String,
    labels: FieldLabels,
    reference_size: (f64, f64),
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub subject: String,
    pub attribute: String,
    pub coords: (f64, f64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLabels {
    pub subject: String,
    pub attribute: String,
}

impl Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("name", &self.name)
            .field("labels", &self.labels)
            .field("entries", &self.entries.len())
            .finish()
    }
}

const REFERENCE_WIDTH: f64 = 1024.0;
const REFERENCE_HEIGHT: f64 = 632.0;

impl Catalog {
    pub fn us_states() -> Self {
        let entries = US_STATES
            .iter()
            .map(|(subject, attribute, (x, y))| CatalogEntry {
                subject: (*subject).to_owned(),
                attribute: (*attribute).to_owned(),
                coords: (*x as f64, *y as f64),
            })
            .collect();

        Self::new(
            "US States & Capitals",
            FieldLabels {
                subject: "State".to_owned(),
                attribute: "Capital".to_owned(),
            },
            (REFERENCE_WIDTH, REFERENCE_HEIGHT),
            entries,
        )
        .expect("Built-in catalog is invalid")
    }

    pub fn new(
        name: impl Into<String>,
        labels: FieldLabels,
        reference_size: (f64, f64),
        entries: Vec<CatalogEntry>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();

        if entries.is_empty() {
            return Err(CatalogError::NoEntries(name));
        }

        let (width, height) = reference_size;
        // Also rejects NaN.
        if !(width > 0.0 && height > 0.0) {
            return Err(CatalogError::InvalidReferenceSize(name, reference_size));
        }

        if let Some(entry) = entries
            .iter()
            .find(|entry| entry.subject.trim().is_empty() || entry.attribute.trim().is_empty())
        {
            return Err(CatalogError::BlankField(name, entry.subject.clone()));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(normalize_subject(&entry.subject), i).is_some() {
                return Err(CatalogError::DuplicateSubject(name, entry.subject.clone()));
            }
        }

        Ok(Self {
            name,
            labels,
            reference_size,
            entries,
            index,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|err| CatalogError::SerdeError(None, err))?;
        file.into_catalog()
    }

    pub fn load_from_file(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let json = std::fs::read_to_string(&path)
            .map_err(|err| CatalogError::IoError(path.clone(), err))?;
        let file: CatalogFile = serde_json::from_str(&json)
            .map_err(|err| CatalogError::SerdeError(Some(path.clone()), err))?;

        let catalog = file.into_catalog()?;
        log::info!(
            "Loaded catalog \"{}\" with {} entries from {}",
            catalog.name,
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &FieldLabels {
        &self.labels
    }

    pub fn reference_size(&self) -> (f64, f64) {
        self.reference_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Subjects in catalog order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.subject.as_str())
    }

    /// Looks a subject up by its normalized spelling, so "new york" finds
    /// "New York".
    pub fn get(&self, subject: &str) -> Option<&CatalogEntry> {
        self.index
            .get(&normalize_subject(subject))
            .map(|i| &self.entries[*i])
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.get(subject).is_some()
    }

    pub fn attribute(&self, subject: &str) -> Option<&str> {
        self.get(subject).map(|entry| entry.attribute.as_str())
    }

    pub fn coords(&self, subject: &str) -> Option<(f64, f64)> {
        self.get(subject).map(|entry| entry.coords)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    name: String,
    #[serde(default = "default_subject_label")]
    subject_label: String,
    #[serde(default = "default_attribute_label")]
    attribute_label: String,
    #[serde(default = "default_reference_size")]
    reference_size: (f64, f64),
    entries: Vec<CatalogEntry>,
}

fn default_subject_label() -> String {
    "Subject".to_owned()
}

fn default_attribute_label() -> String {
    "Attribute".to_owned()
}

fn default_reference_size() -> (f64, f64) {
    (REFERENCE_WIDTH, REFERENCE_HEIGHT)
}

impl CatalogFile {
    fn into_catalog(self) -> Result<Catalog, CatalogError> {
        Catalog::new(
            self.name,
            FieldLabels {
                subject: self.subject_label,
                attribute: self.attribute_label,
            },
            self.reference_size,
            self.entries,
        )
    }
}

#[derive(Debug)]
pub enum CatalogError {
    IoError(PathBuf, std::io::Error),
    SerdeError(Option<PathBuf>, serde_json::Error),
    NoEntries(String),
    BlankField(String, String),
    DuplicateSubject(String, String),
    InvalidReferenceSize(String, (f64, f64)),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(path, err) => f.write_fmt(format_args!(
                "IoError: {err}, path: {}",
                path.to_str().unwrap_or("unknown")
            )),
            Self::SerdeError(path, err) => f.write_fmt(format_args!(
                "SerdeError: {err}, path: {}",
                path.as_ref()
                    .and_then(|path| path.to_str())
                    .unwrap_or("unknown")
            )),
            Self::NoEntries(name) => {
                f.write_fmt(format_args!("NoEntries: Catalog \"{name}\" has no entries"))
            }
            Self::BlankField(name, subject) => f.write_fmt(format_args!(
                "BlankField: Catalog \"{name}\" has an entry with a blank field near \"{subject}\""
            )),
            Self::DuplicateSubject(name, subject) => f.write_fmt(format_args!(
                "DuplicateSubject: Catalog \"{name}\" has more than one \"{subject}\" entry"
            )),
            Self::InvalidReferenceSize(name, (width, height)) => f.write_fmt(format_args!(
                "InvalidReferenceSize: Catalog \"{name}\" has a reference size of {width}x{height}, both must be positive"
            )),
        }
    }
}

const US_STATES: [(&str, &str, (u16, u16)); 50] = [
    ("Alabama", "Montgomery", (696, 432)),
    ("Alaska", "Juneau", (126, 531)),
    ("Arizona", "Phoenix", (203, 389)),
    ("Arkansas", "Little Rock", (582, 396)),
    ("California", "Sacramento", (75, 297)),
    ("Colorado", "Denver", (339, 288)),
    ("Connecticut", "Hartford", (918, 191)),
    ("Delaware", "Dover", (885, 264)),
    ("Florida", "Tallahassee", (813, 530)),
    ("Georgia", "Atlanta", (748, 429)),
    ("Hawaii", "Honolulu", (347, 606)),
    ("Idaho", "Boise", (199, 150)),
    ("Illinois", "Springfield", (631, 266)),
    ("Indiana", "Indianapolis", (688, 266)),
    ("Iowa", "Des Moines", (553, 226)),
    ("Kansas", "Topeka", (470, 307)),
    ("Kentucky", "Frankfort", (715, 323)),
    ("Louisiana", "Baton Rouge", (584, 484)),
    ("Maine", "Augusta", (950, 84)),
    ("Maryland", "Annapolis", (857, 256)),
    ("Massachusetts", "Boston", (927, 165)),
    ("Michigan", "Lansing", (703, 177)),
    ("Minnesota", "Saint Paul", (539, 139)),
    ("Mississippi", "Jackson", (635, 445)),
    ("Missouri", "Jefferson City", (581, 311)),
    ("Montana", "Helena", (306, 92)),
    ("Nebraska", "Lincoln", (451, 233)),
    ("Nevada", "Carson City", (139, 250)),
    ("New Hampshire", "Concord", (926, 145)),
    ("New Jersey", "Trenton", (895, 225)),
    ("New Mexico", "Santa Fe", (320, 398)),
    ("New York", "Albany", (866, 156)),
    ("North Carolina", "Raleigh", (830, 352)),
    ("North Dakota", "Bismarck", (441, 96)),
    ("Ohio", "Columbus", (747, 251)),
    ("Oklahoma", "Oklahoma City", (510, 385)),
    ("Oregon", "Salem", (108, 128)),
    ("Pennsylvania", "Harrisburg", (830, 223)),
    ("Rhode Island", "Providence", (936, 186)),
    ("South Carolina", "Columbia", (804, 404)),
    ("South Dakota", "Pierre", (436, 170)),
    ("Tennessee", "Nashville", (693, 364)),
    ("Texas", "Austin", (453, 483)),
    ("Utah", "Salt Lake City", (230, 278)),
    ("Vermont", "Montpelier", (906, 120)),
    ("Virginia", "Richmond", (836, 296)),
    ("Washington", "Olympia", (129, 56)),
    ("West Virginia", "Charleston", (787, 286)),
    ("Wisconsin", "Madison", (616, 158)),
    ("Wyoming", "Cheyenne", (309, 185)),
];
