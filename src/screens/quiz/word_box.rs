use crate::session::QuestionRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Section {
    Subjects,
    Attributes,
}

#[derive(Debug)]
pub(super) struct WordBoxEntry {
    pub(super) section: Section,
    pub(super) text: String,
    pub(super) struck: bool,
}

/// Every subject and attribute in the session, sorted, which the user can
/// strike out as they go. Lives as long as the session does.
#[derive(Debug)]
pub(super) struct WordBox {
    entries: Vec<WordBoxEntry>,
}

impl WordBox {
    pub(super) fn new(records: &[QuestionRecord]) -> Self {
        let sorted = |get: fn(&QuestionRecord) -> &str| {
            let mut texts = records.iter().map(get).collect::<Vec<_>>();
            texts.sort_unstable();
            texts.dedup();
            texts
        };

        let subjects = sorted(QuestionRecord::correct_subject);
        let attributes = sorted(QuestionRecord::correct_attribute);

        let entries = subjects
            .into_iter()
            .map(|text| (Section::Subjects, text))
            .chain(
                attributes
                    .into_iter()
                    .map(|text| (Section::Attributes, text)),
            )
            .map(|(section, text)| WordBoxEntry {
                section,
                text: text.to_owned(),
                struck: false,
            })
            .collect();

        Self { entries }
    }

    pub(super) fn entries(&self) -> &[WordBoxEntry] {
        &self.entries
    }

    pub(super) fn section(&self, section: Section) -> impl Iterator<Item = (usize, &WordBoxEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, entry)| entry.section == section)
    }

    pub(super) fn toggle(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.struck = !entry.struck;
        }
    }
}
