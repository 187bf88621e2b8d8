//! The consolidated wizard session.
//!
//! One struct owns everything the workflow mutates: the step controller,
//! the uploaded dataset, the column-mapping state, the ethnicity state, and
//! the analysis settings. Cross-step facts (such as "is an ethnicity column
//! bound") are pure selectors computed on read, never flags kept in sync by
//! hand. All mutation happens through discrete event methods on a single
//! writer.

use ras_map::{EthnicityState, MappingError, MappingState};
use ras_model::{
    AnalysisSettings, AscvdGroup, ColumnMapping, FieldKey, MesaGroup, PercentileThresholds,
    SettingsIssue, ThresholdIssue, UploadedDataset,
};
use thiserror::Error;

use crate::controller::StepController;
use crate::step::Step;

/// A reason the current step's "next" action is disabled.
///
/// Blockers are values, not errors: they are recomputed on read, shown
/// inline, and never unwind anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepBlock {
    /// No dataset has been ingested yet.
    NoDataset,
    /// Required fields are still unmapped.
    MappingIncomplete { missing: Vec<FieldKey> },
    /// The settings selection is invalid.
    SettingsInvalid { issues: Vec<SettingsIssue> },
    /// The percentile thresholds violate the ordering invariant.
    ThresholdsInvalid { issues: Vec<ThresholdIssue> },
}

impl std::fmt::Display for StepBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataset => write!(f, "no file uploaded yet"),
            Self::MappingIncomplete { missing } => {
                write!(f, "{} required field(s) unmapped", missing.len())
            }
            Self::SettingsInvalid { issues } => {
                write!(f, "{} settings issue(s)", issues.len())
            }
            Self::ThresholdsInvalid { issues } => {
                write!(f, "{} threshold issue(s)", issues.len())
            }
        }
    }
}

/// Errors from session events that reference missing state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// A mapping edit arrived before any dataset was loaded.
    #[error("no dataset loaded")]
    NoDataset,
    /// The edit itself was invalid.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Direction of a navigation move, used by entry guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// The whole wizard state for one client session.
#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    controller: StepController,
    dataset: Option<UploadedDataset>,
    mapping: MappingState,
    ethnicity: EthnicityState,
    settings: AnalysisSettings,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    // === Selectors ===

    pub fn step(&self) -> Step {
        self.controller.current()
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    pub fn dataset(&self) -> Option<&UploadedDataset> {
        self.dataset.as_ref()
    }

    pub fn mapping(&self) -> &ColumnMapping {
        self.mapping.mapping()
    }

    pub fn mapping_state(&self) -> &MappingState {
        &self.mapping
    }

    pub fn ethnicity(&self) -> &EthnicityState {
        &self.ethnicity
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Derived: is an ethnicity column bound right now.
    ///
    /// This selector is the only source of truth for the ethnicity-step
    /// skip; there is no cached flag to fall out of sync.
    pub fn has_ethnicity_column(&self) -> bool {
        self.mapping.mapping().has_ethnicity()
    }

    /// Blockers for the current step, empty when "next" may proceed.
    pub fn blockers(&self) -> Vec<StepBlock> {
        self.gate(self.step())
    }

    // === Events ===

    /// Leaves the landing screen.
    pub fn start(&mut self) -> Step {
        if self.step() == Step::Landing {
            self.controller.advance();
        }
        self.step()
    }

    /// Installs a freshly ingested dataset, replacing any previous one.
    ///
    /// Downstream state resets wholesale: the mapping re-arms and runs its
    /// one-shot suggestion pass, and the ethnicity entries re-derive from
    /// the new preview.
    pub fn load_dataset(&mut self, dataset: UploadedDataset) {
        tracing::info!(name = %dataset.name, columns = dataset.columns.len(), "dataset loaded");
        self.mapping.reset();
        self.ethnicity.reset();
        self.mapping.apply_suggestions(&dataset);
        self.ethnicity.sync_with_dataset(&dataset, self.mapping.mapping());
        self.dataset = Some(dataset);
        self.controller.mark_complete(Step::Upload);
    }

    /// Binds a field to a dataset column (empty clears).
    ///
    /// Changing the ethnicity binding re-derives the ethnicity entries and
    /// re-evaluates the skip guard immediately.
    pub fn bind_column(&mut self, key: FieldKey, column: &str) -> Result<(), SessionError> {
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoDataset)?;
        self.mapping.set_field(dataset, key, column)?;
        self.ethnicity.sync_with_dataset(dataset, self.mapping.mapping());
        if self.step() == Step::Ethnicity {
            self.evaluate_entry(Direction::Forward);
        }
        Ok(())
    }

    /// Clears a field's binding.
    pub fn clear_column(&mut self, key: FieldKey) {
        self.mapping.clear_field(key);
        if let Some(dataset) = self.dataset.as_ref() {
            self.ethnicity.sync_with_dataset(dataset, self.mapping.mapping());
        }
        if self.step() == Step::Ethnicity {
            self.evaluate_entry(Direction::Forward);
        }
    }

    /// Replaces one raw ethnicity value's ASCVD group.
    pub fn assign_ascvd(&mut self, raw: &str, group: AscvdGroup) -> bool {
        self.ethnicity.assign_ascvd(raw, group)
    }

    /// Replaces one raw ethnicity value's MESA group.
    pub fn assign_mesa(&mut self, raw: &str, group: MesaGroup) -> bool {
        self.ethnicity.assign_mesa(raw, group)
    }

    /// Replaces the settings bundle.
    pub fn set_settings(&mut self, settings: AnalysisSettings) {
        self.settings = settings;
    }

    /// Replaces just the percentile thresholds.
    pub fn set_thresholds(&mut self, thresholds: PercentileThresholds) {
        self.settings.percentile_thresholds = thresholds;
    }

    // === Navigation ===

    /// Advances past the current step if its gate passes.
    ///
    /// On success the step is marked complete and the session moves on,
    /// applying the ethnicity entry guard; on failure the blockers come
    /// back and nothing moves.
    pub fn try_advance(&mut self) -> Result<Step, Vec<StepBlock>> {
        let blocks = self.gate(self.step());
        if !blocks.is_empty() {
            return Err(blocks);
        }
        self.controller.mark_complete(self.step());
        self.controller.advance();
        self.evaluate_entry(Direction::Forward);
        Ok(self.step())
    }

    /// Steps backward, applying the ethnicity entry guard.
    ///
    /// Retreating from `Settings` with no ethnicity column bound lands on
    /// `MapColumns`, not the skipped step.
    pub fn go_back(&mut self) -> Step {
        self.controller.retreat();
        self.evaluate_entry(Direction::Backward);
        self.step()
    }

    /// Jumps to an arbitrary step, applying the entry guard.
    pub fn jump_to(&mut self, step: Step) -> Step {
        let direction = if step.index() >= self.step().index() {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.controller.jump_to(step);
        self.evaluate_entry(direction);
        self.step()
    }

    /// Clears the whole session back to the landing step.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // === Guards ===

    /// Gate for leaving `step`.
    fn gate(&self, step: Step) -> Vec<StepBlock> {
        match step {
            Step::Landing | Step::Ethnicity | Step::Results => Vec::new(),
            Step::Upload => {
                if self.dataset.is_some() {
                    Vec::new()
                } else {
                    vec![StepBlock::NoDataset]
                }
            }
            Step::MapColumns => {
                let missing = self.mapping.mapping().missing_required();
                if missing.is_empty() {
                    Vec::new()
                } else {
                    vec![StepBlock::MappingIncomplete { missing }]
                }
            }
            Step::Settings => {
                let issues = self.settings.issues();
                if issues.is_empty() {
                    Vec::new()
                } else {
                    vec![StepBlock::SettingsInvalid { issues }]
                }
            }
            Step::Thresholds => {
                let issues = self.settings.percentile_thresholds.issues();
                if issues.is_empty() {
                    Vec::new()
                } else {
                    vec![StepBlock::ThresholdsInvalid { issues }]
                }
            }
        }
    }

    /// Guarded entry, evaluated on every arrival at a step.
    ///
    /// Entering the ethnicity step with no ethnicity column bound is a pure
    /// skip: the step completes without user action and navigation carries
    /// on in the direction of travel.
    fn evaluate_entry(&mut self, direction: Direction) {
        if self.controller.current() != Step::Ethnicity {
            return;
        }
        if self.has_ethnicity_column() {
            // Values may have changed since the last visit.
            if let Some(dataset) = self.dataset.as_ref() {
                self.ethnicity.sync_with_dataset(dataset, self.mapping.mapping());
            }
            return;
        }
        tracing::debug!(?direction, "no ethnicity column bound, skipping step");
        self.controller.mark_complete(Step::Ethnicity);
        let landing = match direction {
            Direction::Forward => Step::Settings,
            Direction::Backward => Step::MapColumns,
        };
        self.controller.jump_to(landing);
    }
}
