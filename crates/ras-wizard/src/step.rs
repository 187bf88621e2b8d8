//! Workflow steps.

/// One step of the analysis workflow.
///
/// `Landing` is the pre-wizard entry screen; the wizard proper runs from
/// `Upload` to `Results`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    Landing,
    Upload,
    MapColumns,
    Ethnicity,
    Settings,
    Thresholds,
    Results,
}

impl Step {
    /// All steps in workflow order.
    pub const ALL: [Step; 7] = [
        Step::Landing,
        Step::Upload,
        Step::MapColumns,
        Step::Ethnicity,
        Step::Settings,
        Step::Thresholds,
        Step::Results,
    ];

    /// Zero-based step index (`Landing` is 0).
    pub fn index(self) -> u8 {
        match self {
            Self::Landing => 0,
            Self::Upload => 1,
            Self::MapColumns => 2,
            Self::Ethnicity => 3,
            Self::Settings => 4,
            Self::Thresholds => 5,
            Self::Results => 6,
        }
    }

    /// Step for an index, `None` when out of range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The following step; `Results` is its own successor.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::Results)
    }

    /// The preceding step; never retreats past `Upload`.
    pub fn previous(self) -> Self {
        match self {
            Self::Landing | Self::Upload => Self::Upload,
            other => Self::from_index(other.index() - 1).unwrap_or(Self::Upload),
        }
    }

    /// Short label for step indicators.
    pub fn label(self) -> &'static str {
        match self {
            Self::Landing => "Start",
            Self::Upload => "Upload",
            Self::MapColumns => "Map",
            Self::Ethnicity => "Ethnicity",
            Self::Settings => "Settings",
            Self::Thresholds => "Threshold",
            Self::Results => "Result",
        }
    }

    /// Longer description for step indicators.
    pub fn description(self) -> &'static str {
        match self {
            Self::Landing => "Get Started",
            Self::Upload => "Upload Data",
            Self::MapColumns => "Map Columns",
            Self::Ethnicity => "Map Ethnicities",
            Self::Settings => "Configure Settings",
            Self::Thresholds => "Set Thresholds",
            Self::Results => "View Results",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_index(step.index()), Some(step));
        }
        assert_eq!(Step::from_index(7), None);
    }

    #[test]
    fn next_clamps_at_results() {
        assert_eq!(Step::Thresholds.next(), Step::Results);
        assert_eq!(Step::Results.next(), Step::Results);
    }

    #[test]
    fn previous_clamps_at_upload() {
        assert_eq!(Step::MapColumns.previous(), Step::Upload);
        assert_eq!(Step::Upload.previous(), Step::Upload);
        assert_eq!(Step::Landing.previous(), Step::Upload);
    }
}
