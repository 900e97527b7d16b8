//! CSV export of the session's saved records.
//!
//! Export is a pure read of the store. Writing the result to disk is a
//! separate step so callers can decide where (or whether) the file lands.

use crate::{Error, PatientRecord, RecordStore, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name offered for the download
pub const EXPORT_FILE_NAME: &str = "patient_records_export.csv";

/// MIME type of the export
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Column headers, in output order
pub const CSV_COLUMNS: [&str; 13] = [
    "AGE",
    "GENDER",
    "WEIGHT(kg)",
    "HEIGHT(cm)",
    "BMI",
    "WAIST CIRCUMFERENCE",
    "BP(mmHg)",
    "BLOOD SUGAR(mmol/L)",
    "HTN",
    "DIABETES",
    "BOTH DM+HTN",
    "TREATMENT",
    "VISIT TYPE",
];

/// A row in the CSV output; fields follow [`CSV_COLUMNS`]
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    age: u32,
    gender: char,
    weight_kg: f64,
    height_cm: f64,
    bmi: Option<f64>,
    waist_cm: Option<f64>,
    bp: &'a str,
    blood_sugar: Option<f64>,
    htn: u8,
    diabetes: u8,
    both: u8,
    treatment: &'a str,
    visit_type: &'static str,
}

impl<'a> From<&'a PatientRecord> for CsvRow<'a> {
    fn from(record: &'a PatientRecord) -> Self {
        CsvRow {
            age: record.age,
            gender: record.gender.code(),
            weight_kg: record.weight_kg,
            height_cm: record.height_cm,
            bmi: record.bmi,
            waist_cm: record.waist_cm,
            bp: &record.bp,
            blood_sugar: record.blood_sugar,
            htn: u8::from(record.has_htn),
            diabetes: u8::from(record.has_diabetes),
            both: u8::from(record.has_both),
            treatment: &record.treatment_code,
            visit_type: record.visit_type.label(),
        }
    }
}

/// Serialized CSV ready to be handed to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub data: String,
    pub rows: usize,
}

/// Result of an export request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing has been saved yet; no data is produced
    EmptyStoreNotice,
    Csv(CsvExport),
}

/// Serialize every record in the store, in insertion order
pub fn export_csv(store: &RecordStore) -> Result<ExportOutcome> {
    if store.is_empty() {
        tracing::info!("Export requested with no saved records");
        return Ok(ExportOutcome::EmptyStoreNotice);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;

    for record in store {
        writer.serialize(CsvRow::from(record))?;
    }

    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let data = String::from_utf8(bytes)
        .map_err(|e| Error::Other(format!("Export produced invalid UTF-8: {}", e)))?;

    tracing::info!("Exported {} records to CSV", store.len());

    Ok(ExportOutcome::Csv(CsvExport {
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
        data,
        rows: store.len(),
    }))
}

impl CsvExport {
    /// Write the export into `dir` under its file name
    ///
    /// The file is written to a temp file in the same directory, synced and
    /// then renamed over any previous export.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        self.write_as(&dir.join(self.file_name))
    }

    /// Write the export to an explicit path
    pub fn write_as(&self, path: &Path) -> Result<PathBuf> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(self.data.as_bytes())?;
        temp.flush()?;
        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Wrote {} rows to {:?}", self.rows, path);
        Ok(path.to_path_buf())
    }
}
