//! The onboarding wizard: a form state store and the step sequencer that gates it.
//!
//! [`state`] owns the values and only changes them through [`FormUpdate`] and
//! [`FieldUpdate`] commands. [`sequencer`] decides whether the current step may
//! advance and produces the [`SubmissionPayload`] once the last step validates.
//! [`view`] turns a state into what a UI needs to render it.

pub mod sequencer;
pub mod state;
pub mod view;

pub use self::sequencer::{StepIssue, SubmissionPayload, Transition};
pub use self::state::{AdminField, FieldSet, FieldUpdate, FormUpdate, GOAL_SLOTS, Step, WizardState};
pub use self::view::WizardView;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("invalid step: {0}")]
    InvalidStep(u8),
    #[error("goal index {0} is out of range")]
    GoalIndexOutOfRange(usize),
}
