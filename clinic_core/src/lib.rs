#![forbid(unsafe_code)]

//! Core domain model and business logic for the clinic data-entry form.
//!
//! This crate provides:
//! - Domain types (patient records, form fields, visit types)
//! - BMI calculation
//! - The per-session record store and form controller
//! - CSV export
//! - The access gate and configuration

pub mod types;
pub mod error;
pub mod bmi;
pub mod store;
pub mod form;
pub mod export;
pub mod access;
pub mod session;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use types::*;
pub use bmi::compute_bmi;
pub use store::RecordStore;
pub use form::{submit, SavedRecord};
pub use export::{export_csv, CsvExport, ExportOutcome};
pub use access::AccessGate;
pub use session::{Action, Feedback, Session};
pub use config::Config;
