//! Data model for the resilience analysis workflow.
//!
//! This crate defines the types shared across the workflow engine:
//!
//! - **Fields** (`fields`): the canonical analysis schema a dataset is
//!   mapped onto
//! - **Mapping** (`mapping`): column-to-field bindings with completion
//!   tracking
//! - **Ethnicity** (`ethnicity`): the two target ethnicity taxonomies
//! - **Settings** (`settings`): risk-score selection and scoring options
//! - **Thresholds** (`thresholds`): percentile cut points, their ordering
//!   invariant, and the derived classification bands
//! - **Dataset** (`dataset`): the parsed upload handed from ingestion to
//!   the mapping stage

mod dataset;
mod ethnicity;
mod fields;
mod mapping;
mod settings;
mod thresholds;

pub use dataset::{CellValue, PreviewRow, UploadedDataset};
pub use ethnicity::{AscvdGroup, EthnicityAssignment, EthnicityDefaults, MesaGroup};
pub use fields::{FieldKey, FieldSpec, field_spec};
pub use mapping::{ColumnMapping, FieldStatus};
pub use settings::{
    AnalysisSettings, CholesterolUnit, MAX_MIN_SCORES, MIN_MIN_SCORES, RiskRegion, RiskScore,
    SettingsIssue,
};
pub use thresholds::{
    Band, Classification, PercentileThresholds, ThresholdField, ThresholdIssue, ThresholdIssueKind,
};
