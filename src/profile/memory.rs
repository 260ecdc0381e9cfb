use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{Profile, ProfileError, ProfileStore, UserDocument};
use crate::session::SessionContext;

/// Process-local store, used when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    users: RwLock<HashMap<String, UserDocument>>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), ProfileError> {
        Ok(())
    }

    async fn create_user(&self, session: &SessionContext) -> Result<(), ProfileError> {
        let mut users = self.users.write().await;
        users
            .entry(session.email.clone())
            .or_insert_with(|| UserDocument {
                id: Uuid::new_v4(),
                email: session.email.clone(),
                profile: None,
            });
        debug!("user document ready for {}", session.email);
        Ok(())
    }

    async fn current_user(
        &self,
        session: &SessionContext,
    ) -> Result<Option<UserDocument>, ProfileError> {
        Ok(self.users.read().await.get(&session.email).cloned())
    }

    async fn initialize_profile(
        &self,
        session: &SessionContext,
        profile: &Profile,
    ) -> Result<(), ProfileError> {
        let mut users = self.users.write().await;
        let document = users
            .get_mut(&session.email)
            .ok_or_else(|| ProfileError::NotFound(session.email.clone()))?;
        document.profile = Some(profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn session() -> SessionContext {
        SessionContext::new("jo@example.com", SecretString::from("token"))
    }

    #[tokio::test]
    async fn create_user_is_idempotent() -> Result<(), ProfileError> {
        let store = MemoryProfileStore::new();
        store.create_user(&session()).await?;
        let first = store.current_user(&session()).await?;
        store.create_user(&session()).await?;
        let second = store.current_user(&session()).await?;

        assert!(first.is_some());
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn initialize_profile_updates_document() -> Result<(), ProfileError> {
        let store = MemoryProfileStore::new();
        store.create_user(&session()).await?;
        let profile = Profile {
            first_name: "Jo".to_string(),
            completed_onboarding: true,
            ..Profile::default()
        };
        store.initialize_profile(&session(), &profile).await?;

        let document = store.current_user(&session()).await?;
        assert_eq!(document.and_then(|doc| doc.profile), Some(profile));
        Ok(())
    }

    #[tokio::test]
    async fn initialize_profile_without_document_fails() {
        let store = MemoryProfileStore::new();
        let result = store
            .initialize_profile(&session(), &Profile::default())
            .await;
        assert!(matches!(result, Err(ProfileError::NotFound(email)) if email == "jo@example.com"));
    }
}
