//! Canonical analysis fields.
//!
//! Every uploaded dataset is mapped onto this fixed schema before it can be
//! analysed. Nine fields are required inputs to the risk calculators; four
//! are optional enrichments.

use serde::{Deserialize, Serialize};

/// A canonical field the analysis service understands.
///
/// The serialized form of each key (`cacs`, `total_cholesterol`, ...) is the
/// name used in the outbound request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Cacs,
    Age,
    Gender,
    TotalCholesterol,
    HdlCholesterol,
    SystolicBp,
    SmokingStatus,
    DiabetesStatus,
    BpMedication,
    LipidMedication,
    FamilyHistoryIhd,
    Ethnicity,
    SubjectId,
}

impl FieldKey {
    /// All canonical fields, required first, in display order.
    pub const ALL: [FieldKey; 13] = [
        FieldKey::Cacs,
        FieldKey::Age,
        FieldKey::Gender,
        FieldKey::TotalCholesterol,
        FieldKey::HdlCholesterol,
        FieldKey::SystolicBp,
        FieldKey::SmokingStatus,
        FieldKey::DiabetesStatus,
        FieldKey::BpMedication,
        FieldKey::LipidMedication,
        FieldKey::FamilyHistoryIhd,
        FieldKey::Ethnicity,
        FieldKey::SubjectId,
    ];

    /// The nine fields that must be mapped before analysis can run.
    pub const REQUIRED: [FieldKey; 9] = [
        FieldKey::Cacs,
        FieldKey::Age,
        FieldKey::Gender,
        FieldKey::TotalCholesterol,
        FieldKey::HdlCholesterol,
        FieldKey::SystolicBp,
        FieldKey::SmokingStatus,
        FieldKey::DiabetesStatus,
        FieldKey::BpMedication,
    ];

    /// The payload name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cacs => "cacs",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::TotalCholesterol => "total_cholesterol",
            Self::HdlCholesterol => "hdl_cholesterol",
            Self::SystolicBp => "systolic_bp",
            Self::SmokingStatus => "smoking_status",
            Self::DiabetesStatus => "diabetes_status",
            Self::BpMedication => "bp_medication",
            Self::LipidMedication => "lipid_medication",
            Self::FamilyHistoryIhd => "family_history_ihd",
            Self::Ethnicity => "ethnicity",
            Self::SubjectId => "subject_id",
        }
    }

    /// True if the field must be mapped for the mapping step to complete.
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for a canonical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub description: &'static str,
}

/// Returns the display metadata for a field.
pub fn field_spec(key: FieldKey) -> FieldSpec {
    let (label, description) = match key {
        FieldKey::Cacs => ("CACS Score", "Coronary Artery Calcium Score"),
        FieldKey::Age => ("Age", "Age in years"),
        FieldKey::Gender => ("Gender", "Male/Female or 0/1"),
        FieldKey::TotalCholesterol => ("Total Cholesterol", "Total cholesterol level"),
        FieldKey::HdlCholesterol => ("HDL Cholesterol", "HDL cholesterol level"),
        FieldKey::SystolicBp => ("Systolic BP", "Systolic blood pressure"),
        FieldKey::SmokingStatus => ("Smoking Status", "Current smoking status (0/1)"),
        FieldKey::DiabetesStatus => ("Diabetes Status", "Diabetes diagnosis (0/1)"),
        FieldKey::BpMedication => ("BP Medication", "Blood pressure medication (0/1)"),
        FieldKey::LipidMedication => ("Lipid Medication", "Lipid-lowering medication (0/1)"),
        FieldKey::FamilyHistoryIhd => {
            ("Family History IHD", "Family history of heart disease (0/1)")
        }
        FieldKey::Ethnicity => ("Ethnicity", "Ethnic background"),
        FieldKey::SubjectId => ("Subject ID", "Unique subject identifier"),
    };
    FieldSpec {
        key,
        label,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_precede_optional() {
        assert_eq!(&FieldKey::ALL[..9], &FieldKey::REQUIRED[..]);
        assert!(FieldKey::REQUIRED.iter().all(|k| k.is_required()));
        assert!(!FieldKey::Ethnicity.is_required());
        assert!(!FieldKey::SubjectId.is_required());
    }

    #[test]
    fn serialized_names_match_payload_keys() {
        for key in FieldKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn every_field_has_a_label() {
        for key in FieldKey::ALL {
            let spec = field_spec(key);
            assert!(!spec.label.is_empty());
            assert!(!spec.description.is_empty());
        }
    }
}
