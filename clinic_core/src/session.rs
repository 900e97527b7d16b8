//! One user's form session and its action handlers.
//!
//! The session owns its record store. Each user action is dispatched to one
//! handler that performs at most one append or one export.

use crate::export::{export_csv, ExportOutcome};
use crate::form::{submit, SavedRecord};
use crate::{FormFields, RecordStore, Result, ValidationError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Notice shown for the clear action
pub const CLEAR_NOTICE: &str =
    "Form clear button clicked. Note: Input fields are not automatically reset without a rerun.";

/// Actions the front end can trigger
#[derive(Clone, Debug)]
pub enum Action {
    Save(FormFields),
    Clear,
    Download,
}

/// What the front end should show after an action
#[derive(Clone, Debug, PartialEq)]
pub enum Feedback {
    Saved(SavedRecord),
    Rejected(ValidationError),
    Cleared,
    Export(ExportOutcome),
}

impl Feedback {
    /// Short user-facing message for this outcome
    pub fn message(&self) -> String {
        match self {
            Feedback::Saved(saved) => format!("Record for Age {} saved successfully!", saved.age),
            Feedback::Rejected(err) => format!("Error: {}", err),
            Feedback::Cleared => CLEAR_NOTICE.to_string(),
            Feedback::Export(ExportOutcome::EmptyStoreNotice) => {
                "No records to download yet.".to_string()
            }
            Feedback::Export(ExportOutcome::Csv(export)) => format!(
                "{} ready ({} records, {})",
                export.file_name, export.rows, export.mime_type
            ),
        }
    }
}

/// A single user's session
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    store: RecordStore,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            store: RecordStore::new(),
        };
        tracing::info!("Started session {} at {}", session.id, session.started_at.to_rfc3339());
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Validate and save the form
    pub fn save(&mut self, fields: &FormFields) -> std::result::Result<SavedRecord, ValidationError> {
        submit(&mut self.store, fields).inspect_err(|err| {
            tracing::warn!("Session {}: save rejected: {}", self.id, err);
        })
    }

    /// Clear leaves both the store and the fields as they are
    pub fn clear(&self) -> &'static str {
        tracing::debug!("Session {}: clear requested", self.id);
        CLEAR_NOTICE
    }

    /// Export everything saved so far
    pub fn download(&self) -> Result<ExportOutcome> {
        export_csv(&self.store)
    }

    /// Route an action to its handler
    pub fn dispatch(&mut self, action: Action) -> Result<Feedback> {
        let feedback = match action {
            Action::Save(fields) => match self.save(&fields) {
                Ok(saved) => Feedback::Saved(saved),
                Err(err) => Feedback::Rejected(err),
            },
            Action::Clear => {
                self.clear();
                Feedback::Cleared
            }
            Action::Download => Feedback::Export(self.download()?),
        };
        Ok(feedback)
    }
}
