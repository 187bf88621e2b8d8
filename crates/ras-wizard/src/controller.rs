//! The step state machine.

use std::collections::BTreeSet;

use crate::step::Step;

/// Finite-state controller over the workflow steps.
///
/// Tracks the current step and the set of completed steps. The controller
/// itself is guard-free; gate evaluation and the ethnicity skip live in the
/// session, which owns the state the guards read.
#[derive(Debug, Clone)]
pub struct StepController {
    current: Step,
    completed: BTreeSet<Step>,
}

impl Default for StepController {
    fn default() -> Self {
        Self::new()
    }
}

impl StepController {
    /// A controller at the landing step.
    ///
    /// Starting the session is what completes `Landing`, so it is born
    /// completed.
    pub fn new() -> Self {
        Self {
            current: Step::Landing,
            completed: BTreeSet::from([Step::Landing]),
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Moves one step forward, clamped at `Results`.
    pub fn advance(&mut self) -> Step {
        self.current = self.current.next();
        self.current
    }

    /// Moves one step backward, clamped at `Upload`.
    ///
    /// Back-navigation works from every step, including `Results`.
    pub fn retreat(&mut self) -> Step {
        self.current = self.current.previous();
        self.current
    }

    /// Sets the current step unconditionally.
    pub fn jump_to(&mut self, step: Step) -> Step {
        self.current = step;
        self.current
    }

    /// Marks a step completed. Idempotent.
    pub fn mark_complete(&mut self, step: Step) {
        self.completed.insert(step);
    }

    pub fn is_complete(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }

    /// Completed steps, for progress display.
    pub fn completed(&self) -> &BTreeSet<Step> {
        &self.completed
    }

    /// Returns to a fresh controller at the landing step.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
