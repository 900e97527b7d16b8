//! Domain types for the clinic data-entry form.
//!
//! - Gender and visit type enumerations
//! - The raw field values collected by the form
//! - The immutable patient record stored per save

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Enumerations
// ============================================================================

/// Patient gender as offered by the form
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single-letter code stored in records and exports
    pub fn code(self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

/// Classification of the clinical encounter
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum VisitType {
    #[default]
    #[serde(rename = "New Visit")]
    NewVisit,
    #[serde(rename = "Follow-up")]
    FollowUp,
    #[serde(rename = "Referral")]
    Referral,
    #[serde(rename = "Emergency")]
    Emergency,
    #[serde(rename = "Routine Checkup")]
    RoutineCheckup,
}

impl VisitType {
    /// All visit types in the order the form lists them
    pub const ALL: [VisitType; 5] = [
        VisitType::NewVisit,
        VisitType::FollowUp,
        VisitType::Referral,
        VisitType::Emergency,
        VisitType::RoutineCheckup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VisitType::NewVisit => "New Visit",
            VisitType::FollowUp => "Follow-up",
            VisitType::Referral => "Referral",
            VisitType::Emergency => "Emergency",
            VisitType::RoutineCheckup => "Routine Checkup",
        }
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VisitType {
    type Err = String;

    /// Accepts the label ("Follow-up") or its 1-based position in [`VisitType::ALL`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Ok(index) = wanted.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| VisitType::ALL.get(i).copied())
                .ok_or_else(|| format!("Unknown visit type: {}", wanted));
        }

        let normalized = wanted.to_lowercase().replace(&['-', '_'][..], " ");
        VisitType::ALL
            .iter()
            .copied()
            .find(|v| v.label().to_lowercase().replace('-', " ") == normalized)
            .ok_or_else(|| format!("Unknown visit type: {}", wanted))
    }
}

// ============================================================================
// Form input and stored record
// ============================================================================

/// Current values of every form field, as handed over by the front end.
///
/// Required numeric fields are optional here so that a blank or unparsable
/// entry can reach the form controller and be reported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub age: Option<u32>,
    pub gender: Gender,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub bp: String,
    pub blood_sugar: Option<f64>,
    pub has_htn: bool,
    pub has_diabetes: bool,
    pub has_both: bool,
    pub treatment_code: String,
    pub visit_type: VisitType,
}

/// One saved patient entry. Immutable once stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: Option<f64>,
    pub waist_cm: Option<f64>,
    pub bp: String,
    pub blood_sugar: Option<f64>,
    pub has_htn: bool,
    pub has_diabetes: bool,
    pub has_both: bool,
    pub treatment_code: String,
    pub visit_type: VisitType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::Male.code(), 'M');
        assert_eq!(Gender::Female.code(), 'F');
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("M".parse::<Gender>().unwrap(), Gender::Male);
        assert!("x".parse::<Gender>().is_err());
    }

    #[test]
    fn test_visit_type_parsing() {
        assert_eq!("Follow-up".parse::<VisitType>().unwrap(), VisitType::FollowUp);
        assert_eq!("follow up".parse::<VisitType>().unwrap(), VisitType::FollowUp);
        assert_eq!(
            "routine checkup".parse::<VisitType>().unwrap(),
            VisitType::RoutineCheckup
        );
        assert_eq!("4".parse::<VisitType>().unwrap(), VisitType::Emergency);
        assert!("0".parse::<VisitType>().is_err());
        assert!("6".parse::<VisitType>().is_err());
        assert!("house call".parse::<VisitType>().is_err());
    }

    #[test]
    fn test_defaults_match_form() {
        let fields = FormFields::default();
        assert_eq!(fields.gender, Gender::Male);
        assert_eq!(fields.visit_type, VisitType::NewVisit);
    }

    #[test]
    fn test_record_json_uses_codes() {
        let record = PatientRecord {
            age: 30,
            gender: Gender::Female,
            weight_kg: 60.0,
            height_cm: 160.0,
            bmi: Some(23.44),
            waist_cm: None,
            bp: "120/80".into(),
            blood_sugar: None,
            has_htn: false,
            has_diabetes: false,
            has_both: false,
            treatment_code: String::new(),
            visit_type: VisitType::RoutineCheckup,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"gender\":\"F\""));
        assert!(json.contains("\"visit_type\":\"Routine Checkup\""));
    }
}
