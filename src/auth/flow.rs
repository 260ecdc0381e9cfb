//! Form submit → authenticate → (signup) create user document → navigate.

use std::time::Duration;
use tracing::{error, info, instrument};

use super::{AuthError, AuthForm, AuthMode, Authenticator, FieldErrors};
use crate::profile::ProfileStore;
use crate::session::SessionContext;

pub const ONBOARDING_PATH: &str = "/onboarding";
pub const DEFAULT_NAVIGATION_DELAY_MS: u64 = 1000;

/// Where the UI should go after a successful login, and how long to show the
/// success state first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub path: &'static str,
    pub delay: Duration,
}

#[derive(Debug)]
pub enum AuthOutcome {
    /// Client-side validation failed; no backend call was made.
    Invalid(FieldErrors),
    Failed(AuthError),
    Authenticated {
        session: SessionContext,
        navigation: Navigation,
    },
}

#[instrument(skip_all, fields(mode = ?form.mode))]
pub async fn authenticate(
    form: &AuthForm,
    authenticator: &dyn Authenticator,
    store: &dyn ProfileStore,
    navigation_delay: Duration,
) -> AuthOutcome {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => return AuthOutcome::Invalid(errors),
    };

    let session = match authenticator.authenticate(&request).await {
        Ok(session) => session,
        Err(err) => {
            info!("authentication failed: {}", err);
            return AuthOutcome::Failed(err);
        }
    };

    if request.mode == AuthMode::Signup
        && let Err(err) = store.create_user(&session).await
    {
        error!("failed to create user document: {}", err);
        return AuthOutcome::Failed(AuthError::from(err));
    }

    AuthOutcome::Authenticated {
        session,
        navigation: Navigation {
            path: ONBOARDING_PATH,
            delay: navigation_delay,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthErrorCode, AuthField, AuthRequest};
    use crate::profile::{MemoryProfileStore, ProfileError};
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubAuthenticator {
        calls: AtomicUsize,
        reject_with: Option<&'static str>,
    }

    impl StubAuthenticator {
        fn accepting() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reject_with: None,
            }
        }

        fn rejecting(code: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reject_with: Some(code),
            }
        }
    }

    #[async_trait]
    impl Authenticator for StubAuthenticator {
        async fn authenticate(&self, request: &AuthRequest) -> Result<SessionContext, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reject_with {
                Some(code) => Err(AuthError::Rejected(AuthErrorCode::from_code(code))),
                None => Ok(SessionContext::new(
                    request.payload.email.clone(),
                    SecretString::from("id-token"),
                )),
            }
        }
    }

    fn form(mode: AuthMode, password2: Option<&str>) -> AuthForm {
        AuthForm {
            mode,
            email: "jo@example.com".to_string(),
            password: "password1".to_string(),
            password2: password2.map(str::to_string),
        }
    }

    const DELAY: Duration = Duration::from_millis(DEFAULT_NAVIGATION_DELAY_MS);

    #[tokio::test]
    async fn invalid_form_skips_backend() {
        let authenticator = StubAuthenticator::accepting();
        let store = MemoryProfileStore::new();
        let outcome =
            authenticate(&form(AuthMode::Signup, None), &authenticator, &store, DELAY).await;

        assert!(
            matches!(outcome, AuthOutcome::Invalid(errors) if errors.contains_key(&AuthField::Password2))
        );
        assert_eq!(authenticator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn signup_creates_user_document_and_navigates() -> Result<(), ProfileError> {
        let authenticator = StubAuthenticator::accepting();
        let store = MemoryProfileStore::new();
        let outcome = authenticate(
            &form(AuthMode::Signup, Some("password1")),
            &authenticator,
            &store,
            DELAY,
        )
        .await;

        let AuthOutcome::Authenticated {
            session,
            navigation,
        } = outcome
        else {
            panic!("expected successful signup");
        };
        assert_eq!(navigation.path, "/onboarding");
        assert_eq!(navigation.delay, Duration::from_millis(1000));
        assert!(store.current_user(&session).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn login_does_not_create_document() -> Result<(), ProfileError> {
        let authenticator = StubAuthenticator::accepting();
        let store = MemoryProfileStore::new();
        let outcome =
            authenticate(&form(AuthMode::Login, None), &authenticator, &store, DELAY).await;

        let AuthOutcome::Authenticated { session, .. } = outcome else {
            panic!("expected successful login");
        };
        assert!(store.current_user(&session).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_carries_message() {
        let authenticator = StubAuthenticator::rejecting("auth/wrong-password");
        let store = MemoryProfileStore::new();
        let outcome =
            authenticate(&form(AuthMode::Login, None), &authenticator, &store, DELAY).await;

        let AuthOutcome::Failed(err) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(err.code(), AuthErrorCode::WrongPassword);
        assert_eq!(
            err.message(),
            "The password provided for this user is invalid"
        );
    }

    #[tokio::test]
    async fn navigation_delay_is_configurable() {
        let authenticator = StubAuthenticator::accepting();
        let store = MemoryProfileStore::new();
        let outcome = authenticate(
            &form(AuthMode::Login, None),
            &authenticator,
            &store,
            Duration::from_millis(250),
        )
        .await;

        assert!(matches!(
            outcome,
            AuthOutcome::Authenticated { navigation, .. } if navigation.delay == Duration::from_millis(250)
        ));
    }
}
