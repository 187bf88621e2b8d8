//! Column-to-field bindings.

use serde::{Deserialize, Serialize};

use crate::fields::FieldKey;

/// Mapping status of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Bound to a dataset column.
    Mapped,
    /// No column bound yet.
    Unmapped,
}

/// Binding of every canonical field to a dataset column name.
///
/// The empty string is the unmapped sentinel; optional fields may stay empty
/// indefinitely, required fields must all be bound before the mapping step
/// can complete. The serialized shape is exactly the `column_mappings` object
/// of the analysis request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub cacs: String,
    pub age: String,
    pub gender: String,
    pub total_cholesterol: String,
    pub hdl_cholesterol: String,
    pub systolic_bp: String,
    pub smoking_status: String,
    pub diabetes_status: String,
    pub bp_medication: String,
    pub lipid_medication: String,
    pub family_history_ihd: String,
    pub ethnicity: String,
    pub subject_id: String,
}

impl ColumnMapping {
    /// Returns the column bound to `key`, or `""` when unmapped.
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Cacs => &self.cacs,
            FieldKey::Age => &self.age,
            FieldKey::Gender => &self.gender,
            FieldKey::TotalCholesterol => &self.total_cholesterol,
            FieldKey::HdlCholesterol => &self.hdl_cholesterol,
            FieldKey::SystolicBp => &self.systolic_bp,
            FieldKey::SmokingStatus => &self.smoking_status,
            FieldKey::DiabetesStatus => &self.diabetes_status,
            FieldKey::BpMedication => &self.bp_medication,
            FieldKey::LipidMedication => &self.lipid_medication,
            FieldKey::FamilyHistoryIhd => &self.family_history_ihd,
            FieldKey::Ethnicity => &self.ethnicity,
            FieldKey::SubjectId => &self.subject_id,
        }
    }

    /// Binds `key` to `column`. An empty string clears the binding.
    pub fn set(&mut self, key: FieldKey, column: impl Into<String>) {
        let slot = match key {
            FieldKey::Cacs => &mut self.cacs,
            FieldKey::Age => &mut self.age,
            FieldKey::Gender => &mut self.gender,
            FieldKey::TotalCholesterol => &mut self.total_cholesterol,
            FieldKey::HdlCholesterol => &mut self.hdl_cholesterol,
            FieldKey::SystolicBp => &mut self.systolic_bp,
            FieldKey::SmokingStatus => &mut self.smoking_status,
            FieldKey::DiabetesStatus => &mut self.diabetes_status,
            FieldKey::BpMedication => &mut self.bp_medication,
            FieldKey::LipidMedication => &mut self.lipid_medication,
            FieldKey::FamilyHistoryIhd => &mut self.family_history_ihd,
            FieldKey::Ethnicity => &mut self.ethnicity,
            FieldKey::SubjectId => &mut self.subject_id,
        };
        *slot = column.into();
    }

    /// Clears the binding for `key`.
    pub fn clear(&mut self, key: FieldKey) {
        self.set(key, "");
    }

    /// Status of a single field.
    pub fn status(&self, key: FieldKey) -> FieldStatus {
        if self.get(key).is_empty() {
            FieldStatus::Unmapped
        } else {
            FieldStatus::Mapped
        }
    }

    /// Iterates all fields with their bound columns, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        FieldKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }

    /// Required fields that are still unmapped.
    pub fn missing_required(&self) -> Vec<FieldKey> {
        FieldKey::REQUIRED
            .into_iter()
            .filter(|key| self.status(*key) == FieldStatus::Unmapped)
            .collect()
    }

    /// True when every required field is bound.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// True when an ethnicity column is bound.
    ///
    /// This is the derived selector the wizard consults to decide whether
    /// the ethnicity-mapping step runs or is skipped.
    pub fn has_ethnicity(&self) -> bool {
        !self.ethnicity.is_empty()
    }
}
