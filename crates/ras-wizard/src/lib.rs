//! Step controller and session state for the analysis workflow.
//!
//! The wizard walks a user from upload to submission in six steps, with a
//! landing screen in front:
//!
//! | index | step | completes when |
//! |---|---|---|
//! | 0 | `Landing` | the session starts |
//! | 1 | `Upload` | a dataset is ingested |
//! | 2 | `MapColumns` | every required field is bound |
//! | 3 | `Ethnicity` | every observed value has both groups (skipped when no ethnicity column is bound) |
//! | 4 | `Settings` | the selection validates |
//! | 5 | `Thresholds` | the ordering invariant holds |
//! | 6 | `Results` | — (submit step) |
//!
//! [`WizardSession`] is the single consolidated state; gates and the
//! ethnicity skip are evaluated on navigation, never cached.

mod controller;
pub mod logging;
mod session;
mod step;

pub use controller::StepController;
pub use session::{SessionError, StepBlock, WizardSession};
pub use step::Step;
