//! Render hints for a wizard state: header and prompt, inline messages, buttons.

use serde::Serialize;
use utoipa::ToSchema;

use super::sequencer::step_issues;
use super::state::{Step, WizardState};

const GOALS_HINT: &str = "You can add your goals now or add/update them at anytime later";
const COMPLETED_NOTICE: &str = "You've completed the initial set up.";
const GOALS_PROMPT: &str = "What are your main goals with Slayte?";
const ADMINS_PROMPT: &str =
    "Let us know who should be admins in your setup, and then you're on your way!";

#[derive(ToSchema, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Prev,
    Next,
}

#[derive(ToSchema, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub action: ButtonAction,
    pub label: String,
}

#[derive(ToSchema, Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub header: String,
    /// Question shown above the step's inputs; step 1 has none.
    pub prompt: Option<String>,
    pub state: WizardState,
    /// Inline validation messages for the current step.
    pub issues: Vec<String>,
    /// Modal text shown after a rejected "next".
    pub step_error_message: Option<String>,
    pub notice: Option<String>,
    pub buttons: Vec<ButtonView>,
}

impl WizardView {
    #[must_use]
    pub fn render(state: &WizardState) -> Self {
        let step = state.step();
        let fields = state.fields();

        let header = match step {
            Step::Identity => "Hi there.".to_string(),
            Step::Goals => format!("Hi {}", fields.first_name),
            Step::Admins => "Way to go!".to_string(),
        };

        let prompt = match step {
            Step::Identity => None,
            Step::Goals => Some(GOALS_PROMPT.to_string()),
            Step::Admins => Some(ADMINS_PROMPT.to_string()),
        };

        let notice = if state.completed() {
            Some(COMPLETED_NOTICE.to_string())
        } else if step == Step::Goals {
            Some(GOALS_HINT.to_string())
        } else {
            None
        };

        let step_error_message = state.step_error().then(|| {
            let verb = if step.is_last() {
                "Submitting"
            } else {
                "continuing"
            };
            format!("Please provide all required fields before {verb}")
        });

        let mut buttons = Vec::with_capacity(2);
        if step.prev().is_some() {
            buttons.push(ButtonView {
                action: ButtonAction::Prev,
                label: "Back".to_string(),
            });
        }
        buttons.push(ButtonView {
            action: ButtonAction::Next,
            label: if step.is_last() { "Finish" } else { "Proceed" }.to_string(),
        });

        Self {
            header,
            prompt,
            state: state.clone(),
            issues: step_issues(step, fields)
                .into_iter()
                .map(|issue| issue.message().to_string())
                .collect(),
            step_error_message,
            notice,
            buttons,
        }
    }
}
