//! Percentile thresholds and the classification bands derived from them.
//!
//! Four cut points split the 0..=100 percentile axis into five contiguous
//! bands. The cut points carry one invariant:
//!
//! ```text
//! 0 <= resilient < reference_low < reference_high < susceptible <= 100
//! ```
//!
//! Every violated sub-condition is reported as its own [`ThresholdIssue`] so
//! a UI can highlight exactly the offending control.

use serde::{Deserialize, Serialize};

/// Subject classification relative to predicted risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Resilient,
    Reference,
    Susceptible,
    Other,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resilient => "resilient",
            Self::Reference => "reference",
            Self::Susceptible => "susceptible",
            Self::Other => "other",
        }
    }
}

/// One of the four configurable cut points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdField {
    Resilient,
    ReferenceLow,
    ReferenceHigh,
    Susceptible,
}

/// Why a cut point is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdIssueKind {
    /// Value outside 0..=100.
    OutOfRange,
    /// Value does not strictly exceed the next-lower cut point.
    NotAboveLower { lower: ThresholdField },
}

/// A field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdIssue {
    pub field: ThresholdField,
    pub kind: ThresholdIssueKind,
}

/// The four percentile cut points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileThresholds {
    pub resilient: u8,
    pub reference_low: u8,
    pub reference_high: u8,
    pub susceptible: u8,
}

impl Default for PercentileThresholds {
    fn default() -> Self {
        Self {
            resilient: 20,
            reference_low: 40,
            reference_high: 60,
            susceptible: 80,
        }
    }
}

/// One derived visualization band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub classification: Classification,
    /// Width in percentile points.
    pub width: u8,
}

impl PercentileThresholds {
    /// Recomputes all field-level issues from scratch.
    ///
    /// Range checks run for every field; each ordering check is reported
    /// against the upper field of the violated pair.
    pub fn issues(&self) -> Vec<ThresholdIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            (ThresholdField::Resilient, self.resilient),
            (ThresholdField::ReferenceLow, self.reference_low),
            (ThresholdField::ReferenceHigh, self.reference_high),
            (ThresholdField::Susceptible, self.susceptible),
        ] {
            if value > 100 {
                issues.push(ThresholdIssue {
                    field,
                    kind: ThresholdIssueKind::OutOfRange,
                });
            }
        }

        for (upper, upper_value, lower, lower_value) in [
            (
                ThresholdField::ReferenceLow,
                self.reference_low,
                ThresholdField::Resilient,
                self.resilient,
            ),
            (
                ThresholdField::ReferenceHigh,
                self.reference_high,
                ThresholdField::ReferenceLow,
                self.reference_low,
            ),
            (
                ThresholdField::Susceptible,
                self.susceptible,
                ThresholdField::ReferenceHigh,
                self.reference_high,
            ),
        ] {
            if upper_value <= lower_value {
                issues.push(ThresholdIssue {
                    field: upper,
                    kind: ThresholdIssueKind::NotAboveLower { lower },
                });
            }
        }

        issues
    }

    /// True when the full ordering invariant holds.
    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }

    /// The five contiguous visualization bands, in axis order.
    ///
    /// Pure derivation from the four cut points; for valid thresholds the
    /// widths sum to exactly 100. Inverted cut points saturate to zero-width
    /// bands so the derivation stays total.
    pub fn bands(&self) -> [Band; 5] {
        [
            Band {
                classification: Classification::Resilient,
                width: self.resilient,
            },
            Band {
                classification: Classification::Other,
                width: self.reference_low.saturating_sub(self.resilient),
            },
            Band {
                classification: Classification::Reference,
                width: self.reference_high.saturating_sub(self.reference_low),
            },
            Band {
                classification: Classification::Other,
                width: self.susceptible.saturating_sub(self.reference_high),
            },
            Band {
                classification: Classification::Susceptible,
                width: 100u8.saturating_sub(self.susceptible),
            },
        ]
    }
}
