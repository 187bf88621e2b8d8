//! Target ethnicity taxonomies.
//!
//! Raw ethnicity strings found in a dataset are canonicalized onto two
//! closed vocabularies, one per downstream calculator family: the ASCVD
//! grouping (3 values) and the MESA grouping (4 values).

use serde::{Deserialize, Serialize};

/// Ethnicity grouping used by the ASCVD calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AscvdGroup {
    #[serde(rename = "white")]
    White,
    #[serde(rename = "aa")]
    AfricanAmerican,
    #[serde(rename = "other")]
    Other,
}

impl AscvdGroup {
    pub const ALL: [AscvdGroup; 3] = [Self::White, Self::AfricanAmerican, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::AfricanAmerican => "aa",
            Self::Other => "other",
        }
    }
}

/// Ethnicity grouping used by the MESA calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MesaGroup {
    #[serde(rename = "white")]
    White,
    #[serde(rename = "aa")]
    AfricanAmerican,
    #[serde(rename = "chinese")]
    Chinese,
    #[serde(rename = "hispanic")]
    Hispanic,
}

impl MesaGroup {
    pub const ALL: [MesaGroup; 4] = [
        Self::White,
        Self::AfricanAmerican,
        Self::Chinese,
        Self::Hispanic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::AfricanAmerican => "aa",
            Self::Chinese => "chinese",
            Self::Hispanic => "hispanic",
        }
    }
}

/// Canonical assignment for one raw ethnicity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthnicityAssignment {
    pub ascvd: AscvdGroup,
    pub mesa: MesaGroup,
}

impl Default for EthnicityAssignment {
    fn default() -> Self {
        EthnicityDefaults::default().assignment()
    }
}

/// Default assignment given to a raw value on first sight.
///
/// These are tuned starting points, not requirements; embedders may pick
/// different defaults for cohorts where another grouping dominates.
#[derive(Debug, Clone, Copy)]
pub struct EthnicityDefaults {
    pub ascvd: AscvdGroup,
    pub mesa: MesaGroup,
}

impl Default for EthnicityDefaults {
    fn default() -> Self {
        Self {
            ascvd: AscvdGroup::Other,
            mesa: MesaGroup::White,
        }
    }
}

impl EthnicityDefaults {
    /// The assignment handed to newly observed values.
    pub fn assignment(self) -> EthnicityAssignment {
        EthnicityAssignment {
            ascvd: self.ascvd,
            mesa: self.mesa,
        }
    }
}
