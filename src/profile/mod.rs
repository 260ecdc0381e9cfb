//! User documents and the profile written at the end of onboarding.
//!
//! Each user has one document keyed by email. Signup creates it with no profile;
//! finishing the wizard stores the profile on it.

mod memory;
mod postgres;

pub use self::memory::MemoryProfileStore;
pub use self::postgres::PgProfileStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::session::SessionContext;
use crate::wizard::SubmissionPayload;

#[derive(ToSchema, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub admins: Vec<String>,
    pub goals: Vec<String>,
    #[serde(default)]
    pub completed_onboarding: bool,
}

impl Profile {
    /// Build the profile stored when the wizard finishes.
    #[must_use]
    pub fn completed(payload: SubmissionPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            admins: payload.admins,
            goals: payload.goals,
            completed_onboarding: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDocument {
    pub id: Uuid,
    pub email: String,
    pub profile: Option<Profile>,
}

impl UserDocument {
    #[must_use]
    pub fn completed_onboarding(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|profile| profile.completed_onboarding)
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no user document for {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid profile document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Document store holding one user document per email.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), ProfileError>;

    /// Create the document for the session's email. Existing documents are kept.
    async fn create_user(&self, session: &SessionContext) -> Result<(), ProfileError>;

    async fn current_user(
        &self,
        session: &SessionContext,
    ) -> Result<Option<UserDocument>, ProfileError>;

    /// Replace the profile on the session's document.
    ///
    /// Fails with [`ProfileError::NotFound`] when no document exists.
    async fn initialize_profile(
        &self,
        session: &SessionContext,
        profile: &Profile,
    ) -> Result<(), ProfileError>;
}
