//! Mounted wizards, one per session.
//!
//! Mounting loads the completion status once; later events run against the cached
//! state. Each wizard sits behind its own mutex so events from one session apply in
//! order. Unmounting only drops the registry's handle: a request still holding the
//! wizard finishes against its own copy and the result is discarded with it.

pub mod events;
pub mod flow;

pub use self::events::WizardEvent;
pub use self::flow::{OnboardingFlow, SUBMIT_FAILED_MESSAGE};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use ulid::Ulid;

use crate::profile::{ProfileError, ProfileStore};
use crate::session::SessionContext;

pub type SharedFlow = Arc<Mutex<OnboardingFlow>>;

#[derive(Default)]
pub struct OnboardingRegistry {
    flows: RwLock<HashMap<Ulid, SharedFlow>>,
}

impl OnboardingRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the mounted wizard for `token`, mounting it first if needed.
    ///
    /// # Errors
    /// Returns an error if mounting fails to read the profile store.
    pub async fn mount(
        &self,
        token: Ulid,
        session: Arc<SessionContext>,
        store: &dyn ProfileStore,
    ) -> Result<SharedFlow, ProfileError> {
        if let Some(flow) = self.get(&token).await {
            return Ok(flow);
        }

        let flow = Arc::new(Mutex::new(OnboardingFlow::mount(session, store).await?));

        // Another request may have mounted while the store was being read; keep the first.
        let mut flows = self.flows.write().await;
        Ok(flows.entry(token).or_insert(flow).clone())
    }

    pub async fn get(&self, token: &Ulid) -> Option<SharedFlow> {
        self.flows.read().await.get(token).cloned()
    }

    pub async fn unmount(&self, token: &Ulid) -> bool {
        self.flows.write().await.remove(token).is_some()
    }

    /// Unmount every wizard whose token fails `keep`; returns how many went.
    pub async fn retain(&self, keep: impl Fn(&Ulid) -> bool) -> usize {
        let mut flows = self.flows.write().await;
        let before = flows.len();
        flows.retain(|token, _| keep(token));
        before - flows.len()
    }

    pub async fn len(&self) -> usize {
        self.flows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MemoryProfileStore;
    use secrecy::SecretString;

    fn session() -> Arc<SessionContext> {
        Arc::new(SessionContext::new(
            "jo@example.com",
            SecretString::from("token"),
        ))
    }

    #[tokio::test]
    async fn mount_is_reused_until_unmounted() -> anyhow::Result<()> {
        let registry = OnboardingRegistry::new();
        let store = MemoryProfileStore::new();
        let token = Ulid::new();

        let first = registry.mount(token, session(), &store).await?;
        first
            .lock()
            .await
            .apply(
                WizardEvent::FirstName {
                    value: "Jo".to_string(),
                },
                &store,
            )
            .await?;

        let second = registry.mount(token, session(), &store).await?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.state().fields().first_name, "Jo");

        assert!(registry.unmount(&token).await);
        assert!(registry.get(&token).await.is_none());

        let fresh = registry.mount(token, session(), &store).await?;
        assert!(fresh.lock().await.state().fields().first_name.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn late_result_after_unmount_is_discarded() -> anyhow::Result<()> {
        let registry = OnboardingRegistry::new();
        let store = MemoryProfileStore::new();
        let token = Ulid::new();

        let held = registry.mount(token, session(), &store).await?;
        registry.unmount(&token).await;

        held.lock()
            .await
            .apply(
                WizardEvent::LastName {
                    value: "Li".to_string(),
                },
                &store,
            )
            .await?;

        assert!(registry.get(&token).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn retain_unmounts_dropped_tokens() -> anyhow::Result<()> {
        let registry = OnboardingRegistry::new();
        let store = MemoryProfileStore::new();
        let kept = Ulid::new();
        let dropped = Ulid::new();

        registry.mount(kept, session(), &store).await?;
        registry.mount(dropped, session(), &store).await?;

        assert_eq!(registry.retain(|token| *token == kept).await, 1);
        assert_eq!(registry.len().await, 1);
        assert!(registry.get(&kept).await.is_some());
        assert!(registry.get(&dropped).await.is_none());
        Ok(())
    }
}
