//! Events a UI may send to a mounted wizard.
//!
//! The set is closed: email and the admin list are not editable from here, and an
//! unknown `type` fails to deserialize.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::wizard::FieldUpdate;

#[derive(ToSchema, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    FirstName { value: String },
    LastName { value: String },
    AdminInput { value: String },
    Goal { index: usize, value: String },
    AddAdmin,
    Next,
    Prev,
    DismissStepError,
}

impl WizardEvent {
    /// The store update for plain edits, `None` for actions.
    #[must_use]
    pub fn as_field_update(&self) -> Option<FieldUpdate> {
        match self {
            Self::FirstName { value } => Some(FieldUpdate::FirstName(value.clone())),
            Self::LastName { value } => Some(FieldUpdate::LastName(value.clone())),
            Self::AdminInput { value } => Some(FieldUpdate::AdminInput(value.clone())),
            Self::Goal { index, value } => Some(FieldUpdate::Goal {
                index: *index,
                value: value.clone(),
            }),
            Self::AddAdmin | Self::Next | Self::Prev | Self::DismissStepError => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edit_and_action_events() -> Result<(), serde_json::Error> {
        let edit: WizardEvent = serde_json::from_str(r#"{"type":"first_name","value":"Jo"}"#)?;
        assert_eq!(
            edit,
            WizardEvent::FirstName {
                value: "Jo".to_string()
            }
        );

        let goal: WizardEvent =
            serde_json::from_str(r#"{"type":"goal","index":2,"value":"grow"}"#)?;
        assert_eq!(
            goal.as_field_update(),
            Some(FieldUpdate::Goal {
                index: 2,
                value: "grow".to_string()
            })
        );

        let next: WizardEvent = serde_json::from_str(r#"{"type":"next"}"#)?;
        assert_eq!(next, WizardEvent::Next);
        assert_eq!(next.as_field_update(), None);
        Ok(())
    }

    #[test]
    fn rejects_unknown_and_read_only_fields() {
        assert!(serde_json::from_str::<WizardEvent>(r#"{"type":"email","value":"x@y.z"}"#).is_err());
        assert!(serde_json::from_str::<WizardEvent>(r#"{"type":"frist_name","value":"Jo"}"#).is_err());
        assert!(serde_json::from_str::<WizardEvent>(r#"{"type":"admin_list","value":[]}"#).is_err());
    }
}
