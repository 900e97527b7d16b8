//! In-memory record store for one form session.

use crate::PatientRecord;
use serde::Serialize;

/// Append-only, insertion-ordered collection of saved records.
///
/// Only the form controller can append, so every stored record has passed
/// the required-field check. There is no update or delete.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct RecordStore {
    records: Vec<PatientRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, record: PatientRecord) {
        self.records.push(record);
        tracing::debug!("Record store now holds {} records", self.records.len());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatientRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a PatientRecord;
    type IntoIter = std::slice::Iter<'a, PatientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
