//! Form controller: validates submitted fields and saves them as records.

use crate::bmi::compute_bmi;
use crate::{FormFields, PatientRecord, RecordStore, ValidationError};

/// Acknowledgement returned after a successful save
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SavedRecord {
    pub age: u32,
    pub bmi: Option<f64>,
}

/// Validate the form and append one record to the store.
///
/// Age, weight and height must be present and non-zero; nothing else is
/// checked. On error the store is left unchanged.
pub fn submit(store: &mut RecordStore, fields: &FormFields) -> Result<SavedRecord, ValidationError> {
    let age = match fields.age {
        Some(age) if age != 0 => age,
        _ => return Err(ValidationError::MissingRequiredField { field: "age" }),
    };
    let weight_kg = required_measure(fields.weight_kg, "weight")?;
    let height_cm = required_measure(fields.height_cm, "height")?;

    let bmi = compute_bmi(weight_kg, height_cm);

    let record = PatientRecord {
        age,
        gender: fields.gender,
        weight_kg,
        height_cm,
        bmi,
        waist_cm: fields.waist_cm,
        bp: fields.bp.clone(),
        blood_sugar: fields.blood_sugar,
        has_htn: fields.has_htn,
        has_diabetes: fields.has_diabetes,
        has_both: fields.has_both,
        treatment_code: fields.treatment_code.clone(),
        visit_type: fields.visit_type,
    };
    store.append(record);

    tracing::info!("Saved record for age {} ({} total)", age, store.len());
    Ok(SavedRecord { age, bmi })
}

// Zero counts as missing; negative values pass and simply yield no BMI.
fn required_measure(value: Option<f64>, field: &'static str) -> Result<f64, ValidationError> {
    match value {
        Some(v) if v != 0.0 => Ok(v),
        _ => Err(ValidationError::MissingRequiredField { field }),
    }
}
