use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::events::WizardEvent;
use crate::profile::{Profile, ProfileError, ProfileStore};
use crate::session::SessionContext;
use crate::wizard::{
    FieldUpdate, FormUpdate, SubmissionPayload, Transition, WizardError, WizardState, WizardView,
    sequencer,
};

pub const SUBMIT_FAILED_MESSAGE: &str = "We couldn't save your profile, please try again";

/// One mounted wizard, bound to the session that owns it.
#[derive(Debug)]
pub struct OnboardingFlow {
    session: Arc<SessionContext>,
    state: WizardState,
}

impl OnboardingFlow {
    /// A fresh wizard for `session`, still loading.
    #[must_use]
    pub fn new(session: Arc<SessionContext>) -> Self {
        let mut state = WizardState::new();
        // Email updates carry no index, so they cannot fail.
        let _ = state.set_field_value(FieldUpdate::Email(session.email.clone()));
        Self { session, state }
    }

    /// Create the wizard and load the completion status from the user's document.
    ///
    /// # Errors
    /// Returns an error if the profile store cannot be read.
    #[instrument(skip_all, fields(email = %session.email))]
    pub async fn mount(
        session: Arc<SessionContext>,
        store: &dyn ProfileStore,
    ) -> Result<Self, ProfileError> {
        let mut flow = Self::new(session);

        let completed = store
            .current_user(&flow.session)
            .await?
            .is_some_and(|document| document.completed_onboarding());

        flow.state.set_field(FormUpdate::Completed(completed));
        flow.state.set_field(FormUpdate::Loading(false));
        debug!("wizard mounted, completed: {}", completed);

        Ok(flow)
    }

    #[must_use]
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn view(&self) -> WizardView {
        WizardView::render(&self.state)
    }

    /// Apply one UI event. A completed wizard ignores further events.
    ///
    /// # Errors
    /// Returns an error if an edit addresses a goal slot that does not exist.
    pub async fn apply(
        &mut self,
        event: WizardEvent,
        store: &dyn ProfileStore,
    ) -> Result<(), WizardError> {
        if self.state.completed() {
            debug!("ignoring {:?} on a completed wizard", event);
            return Ok(());
        }

        if let Some(update) = event.as_field_update() {
            return self.state.set_field_value(update);
        }

        match event {
            WizardEvent::AddAdmin => {
                sequencer::add_admin(&mut self.state);
            }
            WizardEvent::Prev => {
                sequencer::prev(&mut self.state);
            }
            WizardEvent::DismissStepError => {
                self.state.set_field(FormUpdate::StepError(false));
            }
            WizardEvent::Next => match sequencer::next(&mut self.state) {
                Transition::Submit(payload) => self.submit(payload, store).await,
                Transition::Advanced(step) => debug!("advanced to step {}", step.number()),
                Transition::Rejected(step) => debug!("step {} rejected", step.number()),
            },
            WizardEvent::FirstName { .. }
            | WizardEvent::LastName { .. }
            | WizardEvent::AdminInput { .. }
            | WizardEvent::Goal { .. } => {}
        }

        Ok(())
    }

    /// Write the completed profile. Failures are logged and surfaced on the state so
    /// the user can retry.
    async fn submit(&mut self, payload: SubmissionPayload, store: &dyn ProfileStore) {
        self.state.set_field(FormUpdate::SubmitError(None));
        self.state.set_field(FormUpdate::Loading(true));

        let profile = Profile::completed(payload);
        match store.initialize_profile(&self.session, &profile).await {
            Ok(()) => {
                info!("onboarding completed for {}", self.session.email);
                self.state.set_field(FormUpdate::Completed(true));
            }
            Err(err) => {
                error!("failed to initialize profile: {}", err);
                self.state
                    .set_field(FormUpdate::SubmitError(Some(SUBMIT_FAILED_MESSAGE.to_string())));
            }
        }

        self.state.set_field(FormUpdate::Loading(false));
    }
}
