//! Login and signup against the external identity provider.

pub mod client;
pub mod errors;
pub mod flow;
pub mod form;

pub use self::client::IdentityClient;
pub use self::errors::{AuthError, AuthErrorCode};
pub use self::flow::{AuthOutcome, DEFAULT_NAVIGATION_DELAY_MS, Navigation, ONBOARDING_PATH};
pub use self::form::{AuthField, AuthForm, AuthMode, AuthRequest, Credentials, FieldErrors};

use async_trait::async_trait;

use crate::session::SessionContext;

/// Credential verification and session issuance.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Sign in or sign up depending on `request.mode`.
    async fn authenticate(&self, request: &AuthRequest) -> Result<SessionContext, AuthError>;
}
