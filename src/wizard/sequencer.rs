//! Step sequencer: validation gates, transitions and the final submission payload.
//!
//! The sequencer keeps no state of its own. It reads a [`WizardState`], mutates it
//! through the store's update commands, and reports what happened as a [`Transition`].
//! It never tracks "submitted"; once [`Transition::Submit`] is returned the caller
//! owns what comes next.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::state::{FieldSet, FieldUpdate, FormUpdate, Step, WizardState};
use crate::validator::{is_email, min_length, not_empty};

/// Minimum trimmed length for first and last names.
pub const NAME_MIN_LENGTH: usize = 2;

/// Data handed to the profile collaborator when the last step validates.
#[derive(ToSchema, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub first_name: String,
    pub last_name: String,
    pub admins: Vec<String>,
    pub goals: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The step was valid and the wizard moved forward.
    Advanced(Step),
    /// The step failed validation; `step_error` is now set.
    Rejected(Step),
    /// The last step validated.
    Submit(SubmissionPayload),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepIssue {
    FirstNameTooShort,
    LastNameTooShort,
    NoAdmins,
}

impl StepIssue {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::FirstNameTooShort => "First name must be at least 2 characters",
            Self::LastNameTooShort => "Last name must be at least 2 characters",
            Self::NoAdmins => "Please enter at least one valid email",
        }
    }
}

fn valid_name(name: &str) -> bool {
    min_length(name.trim(), NAME_MIN_LENGTH)
}

/// Whether `step` may be left forward with the given fields.
#[must_use]
pub fn is_valid_step(step: Step, fields: &FieldSet) -> bool {
    match step {
        Step::Identity => valid_name(&fields.first_name) && valid_name(&fields.last_name),
        // Goals are optional.
        Step::Goals => true,
        Step::Admins => !fields.admin.list.is_empty(),
    }
}

/// Inline messages for the current step.
///
/// The admins step only complains while both the list and the input are empty, so a
/// user in the middle of typing an address is not shown an error.
#[must_use]
pub fn step_issues(step: Step, fields: &FieldSet) -> Vec<StepIssue> {
    let mut issues = Vec::new();
    match step {
        Step::Identity => {
            if !valid_name(&fields.first_name) {
                issues.push(StepIssue::FirstNameTooShort);
            }
            if !valid_name(&fields.last_name) {
                issues.push(StepIssue::LastNameTooShort);
            }
        }
        Step::Goals => {}
        Step::Admins => {
            if fields.admin.list.is_empty() && fields.admin.input.is_empty() {
                issues.push(StepIssue::NoAdmins);
            }
        }
    }
    issues
}

/// Move the pending admin input into the list.
///
/// The input is prepended only if it is a valid email that is not already listed.
/// The input is cleared either way. Returns whether the list grew.
pub fn add_admin(state: &mut WizardState) -> bool {
    let admin = &state.fields().admin;
    let candidate = admin.input.clone();
    let accepted = is_email(&candidate) && !admin.list.contains(&candidate);

    if accepted {
        let mut list = Vec::with_capacity(admin.list.len() + 1);
        list.push(candidate);
        list.extend(admin.list.iter().cloned());
        apply(state, FieldUpdate::AdminList(list));
    }
    apply(state, FieldUpdate::AdminInput(String::new()));

    accepted
}

/// Validate the current step and advance, or produce the payload on the last step.
pub fn next(state: &mut WizardState) -> Transition {
    let step = state.step();
    if !is_valid_step(step, state.fields()) {
        state.set_field(FormUpdate::StepError(true));
        return Transition::Rejected(step);
    }

    state.set_field(FormUpdate::StepError(false));
    match step.next() {
        Some(next) => {
            state.set_field(FormUpdate::Step(next));
            Transition::Advanced(next)
        }
        None => Transition::Submit(submission_payload(state.fields())),
    }
}

/// Go back one step; stays put on the first step.
pub fn prev(state: &mut WizardState) -> Step {
    if let Some(previous) = state.step().prev() {
        state.set_field(FormUpdate::Step(previous));
    }
    state.step()
}

#[must_use]
pub fn submission_payload(fields: &FieldSet) -> SubmissionPayload {
    SubmissionPayload {
        first_name: fields.first_name.clone(),
        last_name: fields.last_name.clone(),
        admins: fields.admin.list.clone(),
        goals: fields
            .goals
            .iter()
            .filter(|goal| not_empty(goal))
            .cloned()
            .collect(),
    }
}

fn apply(state: &mut WizardState, update: FieldUpdate) {
    // Admin updates carry no index, so they cannot fail.
    let _ = state.set_field_value(update);
}
