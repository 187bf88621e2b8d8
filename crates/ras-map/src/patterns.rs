//! Suggestion keywords per canonical field.
//!
//! Each field carries a short list of lowercase substrings commonly seen in
//! column names for that measurement. Lists are ordered by specificity but
//! matching is decided by dataset column order, not keyword order.

use ras_model::FieldKey;

/// Keywords that suggest a column holds the given field.
pub fn keywords_for(key: FieldKey) -> &'static [&'static str] {
    match key {
        FieldKey::Cacs => &["cacs", "cac", "calcium", "score"],
        FieldKey::Age => &["age", "years"],
        FieldKey::Gender => &["gender", "sex", "male", "female"],
        FieldKey::TotalCholesterol => &["total_chol", "tc", "cholesterol", "total_cholesterol"],
        FieldKey::HdlCholesterol => &["hdl", "hdl_chol", "hdl_cholesterol"],
        FieldKey::SystolicBp => &["sbp", "systolic", "sys_bp", "systolic_bp"],
        FieldKey::SmokingStatus => &["smoking", "smoker", "smoke"],
        FieldKey::DiabetesStatus => &["diabetes", "dm", "diabetic"],
        FieldKey::BpMedication => &["bp_med", "bp_medication", "antihypertensive"],
        FieldKey::LipidMedication => &["lipid", "statin"],
        FieldKey::FamilyHistoryIhd => &["family_history", "family", "fhx"],
        FieldKey::Ethnicity => &["ethnic", "race"],
        FieldKey::SubjectId => &["subject", "patient", "participant"],
    }
}
