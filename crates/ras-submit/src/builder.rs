//! Analysis request assembly.
//!
//! Building a request is split in two so the payload cannot exist unless
//! every upstream gate holds: [`SubmissionInputs::gather`] validates the
//! session and either hands back the blockers or a bundle of validated
//! inputs, and [`SubmissionInputs::into_request`] is a pure, infallible
//! assembly of that bundle.

use std::collections::BTreeMap;

use ras_model::{
    CholesterolUnit, ColumnMapping, EthnicityAssignment, PercentileThresholds, RiskRegion,
    RiskScore,
};
use ras_wizard::{StepBlock, WizardSession};

use crate::request::{AnalyseRequest, RequestSettings};

/// Validated inputs for one analysis request.
///
/// Constructible only through [`Self::gather`], which is what makes the
/// builder's precondition structural rather than a runtime check.
#[derive(Debug, Clone)]
pub struct SubmissionInputs {
    file_url: String,
    column_mappings: ColumnMapping,
    cholesterol_unit: CholesterolUnit,
    risk_scores: Vec<RiskScore>,
    risk_region: RiskRegion,
    ethnicity_mappings: BTreeMap<String, EthnicityAssignment>,
    percentile_thresholds: PercentileThresholds,
    min_scores: u8,
}

impl SubmissionInputs {
    /// Collects and validates everything the request needs.
    ///
    /// Checks every upstream gate: a dataset is present, the mapping is
    /// complete, the settings validate, and the thresholds are ordered.
    /// Returns all failed gates at once so a UI can surface them together.
    pub fn gather(session: &WizardSession) -> Result<Self, Vec<StepBlock>> {
        let mut blocks = Vec::new();

        let file_url = match session.dataset() {
            Some(dataset) => dataset.url.clone(),
            None => {
                blocks.push(StepBlock::NoDataset);
                String::new()
            }
        };
        let missing = session.mapping().missing_required();
        if !missing.is_empty() {
            blocks.push(StepBlock::MappingIncomplete { missing });
        }
        let settings = session.settings();
        let settings_issues = settings.issues();
        if !settings_issues.is_empty() {
            blocks.push(StepBlock::SettingsInvalid {
                issues: settings_issues,
            });
        }
        let threshold_issues = settings.percentile_thresholds.issues();
        if !threshold_issues.is_empty() {
            blocks.push(StepBlock::ThresholdsInvalid {
                issues: threshold_issues,
            });
        }
        if !blocks.is_empty() {
            return Err(blocks);
        }

        // With no ethnicity column bound the map is empty by contract.
        let ethnicity_mappings = if session.has_ethnicity_column() {
            session
                .ethnicity()
                .entries()
                .iter()
                .map(|entry| (entry.raw.clone(), entry.assignment))
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            file_url,
            column_mappings: session.mapping().clone(),
            cholesterol_unit: settings.cholesterol_unit,
            risk_scores: settings.risk_scores.clone(),
            risk_region: settings.risk_region,
            ethnicity_mappings,
            percentile_thresholds: settings.percentile_thresholds,
            min_scores: settings.min_scores,
        })
    }

    /// Assembles the request payload.
    pub fn into_request(self) -> AnalyseRequest {
        AnalyseRequest {
            file_url: self.file_url,
            column_mappings: self.column_mappings,
            cholesterol_unit: self.cholesterol_unit,
            settings: RequestSettings {
                risk_scores: self.risk_scores,
                risk_region: self.risk_region,
                ethnicity_mappings: self.ethnicity_mappings,
                percentile_thresholds: self.percentile_thresholds,
                min_scores: self.min_scores,
            },
        }
    }
}
