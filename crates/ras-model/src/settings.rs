//! Analysis settings: risk-score selection and scoring options.

use serde::{Deserialize, Serialize};

use crate::thresholds::PercentileThresholds;

/// Smallest accepted `min_scores` value.
pub const MIN_MIN_SCORES: u8 = 1;
/// Largest accepted `min_scores` value (one per supported risk score).
pub const MAX_MIN_SCORES: u8 = 4;

/// A supported cardiovascular risk calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskScore {
    Frs,
    Ascvd,
    Mesa,
    Score2,
}

impl RiskScore {
    pub const ALL: [RiskScore; 4] = [Self::Frs, Self::Ascvd, Self::Mesa, Self::Score2];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frs => "frs",
            Self::Ascvd => "ascvd",
            Self::Mesa => "mesa",
            Self::Score2 => "score2",
        }
    }
}

/// SCORE2 risk region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskRegion {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskRegion {
    pub const ALL: [RiskRegion; 4] = [Self::Low, Self::Moderate, Self::High, Self::VeryHigh];
}

/// Unit of the cholesterol columns in the uploaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CholesterolUnit {
    #[serde(rename = "mmol/L")]
    MmolPerL,
    #[serde(rename = "mg/dL")]
    MgPerDl,
}

/// Everything the settings step collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub risk_scores: Vec<RiskScore>,
    pub risk_region: RiskRegion,
    pub min_scores: u8,
    pub cholesterol_unit: CholesterolUnit,
    pub percentile_thresholds: PercentileThresholds,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            risk_scores: vec![RiskScore::Frs],
            risk_region: RiskRegion::Low,
            min_scores: 1,
            cholesterol_unit: CholesterolUnit::MmolPerL,
            percentile_thresholds: PercentileThresholds::default(),
        }
    }
}

/// A reason the settings step cannot complete.
///
/// Settings problems never abort anything; they only keep the step's "next"
/// action disabled until resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsIssue {
    /// No risk score selected.
    NoRiskScores,
    /// `min_scores` outside the accepted 1..=4 range.
    MinScoresOutOfRange { value: u8 },
}

impl AnalysisSettings {
    /// Validation issues with the current selection, empty when complete.
    pub fn issues(&self) -> Vec<SettingsIssue> {
        let mut issues = Vec::new();
        if self.risk_scores.is_empty() {
            issues.push(SettingsIssue::NoRiskScores);
        }
        if !(MIN_MIN_SCORES..=MAX_MIN_SCORES).contains(&self.min_scores) {
            issues.push(SettingsIssue::MinScoresOutOfRange {
                value: self.min_scores,
            });
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }

    /// True when SCORE2 is among the selected scores (making the risk region
    /// meaningful).
    pub fn uses_score2(&self) -> bool {
        self.risk_scores.contains(&RiskScore::Score2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = AnalysisSettings::default();
        assert!(settings.is_valid());
        assert_eq!(settings.risk_scores, vec![RiskScore::Frs]);
        assert_eq!(settings.min_scores, 1);
    }

    #[test]
    fn empty_selection_is_flagged() {
        let settings = AnalysisSettings {
            risk_scores: Vec::new(),
            ..AnalysisSettings::default()
        };
        assert!(settings.issues().contains(&SettingsIssue::NoRiskScores));
    }

    #[test]
    fn min_scores_bounds() {
        let mut settings = AnalysisSettings::default();
        settings.min_scores = 0;
        assert!(matches!(
            settings.issues()[0],
            SettingsIssue::MinScoresOutOfRange { value: 0 }
        ));
        settings.min_scores = 5;
        assert!(matches!(
            settings.issues()[0],
            SettingsIssue::MinScoresOutOfRange { value: 5 }
        ));
    }

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&RiskScore::Score2).unwrap(), "\"score2\"");
        assert_eq!(
            serde_json::to_string(&RiskRegion::VeryHigh).unwrap(),
            "\"Very High\""
        );
        assert_eq!(
            serde_json::to_string(&CholesterolUnit::MmolPerL).unwrap(),
            "\"mmol/L\""
        );
    }
}
