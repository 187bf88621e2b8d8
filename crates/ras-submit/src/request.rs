//! The outbound analysis request contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ras_model::{
    CholesterolUnit, ColumnMapping, EthnicityAssignment, PercentileThresholds, RiskRegion,
    RiskScore,
};

/// Body of `POST /api/analyse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyseRequest {
    pub file_url: String,
    pub column_mappings: ColumnMapping,
    pub cholesterol_unit: CholesterolUnit,
    pub settings: RequestSettings,
}

/// The `settings` object of the analyse body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSettings {
    pub risk_scores: Vec<RiskScore>,
    pub risk_region: RiskRegion,
    pub ethnicity_mappings: BTreeMap<String, EthnicityAssignment>,
    pub percentile_thresholds: PercentileThresholds,
    pub min_scores: u8,
}
