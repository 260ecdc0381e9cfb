//! Form state store for the onboarding wizard.
//!
//! The state is only reachable through two update operations: [`WizardState::set_field`]
//! for the top-level flags and [`WizardState::set_field_value`] for values inside
//! [`FieldSet`]. Both take a tagged command, so every kind of update is matched
//! exhaustively and a misspelled field name cannot compile.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::WizardError;

/// Number of goal slots shown on the goals step.
pub const GOAL_SLOTS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    #[default]
    Identity,
    Goals,
    Admins,
}

impl Step {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::Goals => 2,
            Self::Admins => 3,
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Identity => Some(Self::Goals),
            Self::Goals => Some(Self::Admins),
            Self::Admins => None,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Option<Self> {
        match self {
            Self::Identity => None,
            Self::Goals => Some(Self::Identity),
            Self::Admins => Some(Self::Goals),
        }
    }

    #[must_use]
    pub const fn is_last(self) -> bool {
        self.next().is_none()
    }
}

impl TryFrom<u8> for Step {
    type Error = WizardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Identity),
            2 => Ok(Self::Goals),
            3 => Ok(Self::Admins),
            other => Err(WizardError::InvalidStep(other)),
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

/// Admin emails: the pending text input and the accepted list (most recent first).
#[derive(ToSchema, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminField {
    pub input: String,
    pub list: Vec<String>,
}

#[derive(ToSchema, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSet {
    /// Copied from the session on mount; users cannot edit it.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: AdminField,
    /// Empty string means the slot is unset.
    #[schema(value_type = Vec<String>)]
    pub goals: [String; GOAL_SLOTS],
}

/// Top-level state updates. No validation is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormUpdate {
    Step(Step),
    StepError(bool),
    Completed(bool),
    Loading(bool),
    SubmitError(Option<String>),
}

/// Updates inside [`FieldSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    Email(String),
    FirstName(String),
    LastName(String),
    AdminInput(String),
    AdminList(Vec<String>),
    /// Writes a single goal slot.
    Goal { index: usize, value: String },
    Goals([String; GOAL_SLOTS]),
}

#[derive(ToSchema, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    #[schema(value_type = u8)]
    step: Step,
    step_error: bool,
    completed: bool,
    loading: bool,
    submit_error: Option<String>,
    fields: FieldSet,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: Step::Identity,
            step_error: false,
            completed: false,
            // Stays true until the profile status has been fetched.
            loading: true,
            submit_error: None,
            fields: FieldSet::default(),
        }
    }
}

impl WizardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub const fn step_error(&self) -> bool {
        self.step_error
    }

    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    #[must_use]
    pub const fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn set_field(&mut self, update: FormUpdate) {
        match update {
            FormUpdate::Step(step) => self.step = step,
            FormUpdate::StepError(value) => self.step_error = value,
            FormUpdate::Completed(value) => self.completed = value,
            FormUpdate::Loading(value) => self.loading = value,
            FormUpdate::SubmitError(message) => self.submit_error = message,
        }
    }

    /// Apply an update inside the field set.
    ///
    /// # Errors
    /// Returns [`WizardError::GoalIndexOutOfRange`] when a goal index is not one of the
    /// [`GOAL_SLOTS`] slots; the state is left untouched.
    pub fn set_field_value(&mut self, update: FieldUpdate) -> Result<(), WizardError> {
        let fields = &mut self.fields;
        match update {
            FieldUpdate::Email(value) => fields.email = value,
            FieldUpdate::FirstName(value) => fields.first_name = value,
            FieldUpdate::LastName(value) => fields.last_name = value,
            FieldUpdate::AdminInput(value) => fields.admin.input = value,
            FieldUpdate::AdminList(list) => fields.admin.list = list,
            FieldUpdate::Goal { index, value } => {
                let slot = fields
                    .goals
                    .get_mut(index)
                    .ok_or(WizardError::GoalIndexOutOfRange(index))?;
                *slot = value;
            }
            FieldUpdate::Goals(goals) => fields.goals = goals,
        }
        Ok(())
    }
}
