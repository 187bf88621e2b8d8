//! The analysis service's response contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubmitError};

/// Envelope of `POST /api/analyse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Unwraps the envelope, turning a reported failure into
    /// [`SubmitError::ServiceFailure`].
    pub fn into_result(self) -> Result<AnalysisData> {
        if !self.success {
            return Err(SubmitError::ServiceFailure {
                message: self
                    .error
                    .unwrap_or_else(|| "no error detail provided".to_string()),
            });
        }
        self.data.ok_or_else(|| SubmitError::InvalidResponse {
            message: "success without data".to_string(),
        })
    }
}

/// Successful analysis payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub results: Vec<SubjectResult>,
    pub summary: AnalysisSummary,
}

/// One scored subject.
///
/// Row shape is owned by the service; fields this client does not interpret
/// stay as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub risk_scores: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_normalized_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cacs_percentile: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Cohort-level summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub n_total: u64,
    pub n_complete: u64,
    pub classifications: ClassificationCounts,
}

/// Subjects per classification band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub resilient: u64,
    pub reference: u64,
    pub susceptible: u64,
    pub other: u64,
}
