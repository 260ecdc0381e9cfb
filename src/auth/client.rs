//! REST client for an identity-toolkit style provider.
//!
//! Signup calls `accounts:signUp`, login calls `accounts:signInWithPassword`. Both
//! authenticate with the project API key as the `key` query parameter and answer
//! with `{ idToken, email, localId }`, or `{ error: { message } }` on failure.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::{AuthError, AuthErrorCode, AuthMode, AuthRequest, Authenticator};
use crate::APP_USER_AGENT;
use crate::session::SessionContext;

const REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    email: Option<String>,
}

#[derive(Debug)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl IdentityClient {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, api_key: SecretString) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("Invalid identity provider URL: {base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported identity provider URL scheme: {}", parsed.scheme());
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .context("Failed to build identity provider client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    #[must_use]
    pub fn endpoint_url(&self, mode: AuthMode) -> String {
        let method = match mode {
            AuthMode::Signup => "accounts:signUp",
            AuthMode::Login => "accounts:signInWithPassword",
        };
        format!("{}/v1/{method}", self.base_url)
    }
}

#[async_trait]
impl Authenticator for IdentityClient {
    #[instrument(skip(self, request), fields(mode = ?request.mode))]
    async fn authenticate(&self, request: &AuthRequest) -> Result<SessionContext, AuthError> {
        let url = self.endpoint_url(request.mode);
        let body = json!({
            "email": request.payload.email,
            "password": request.payload.password.expose_secret(),
            "returnSecureToken": true,
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let json_response: Value = response.json().await.unwrap_or_default();
            let reason = json_response["error"]["message"].as_str().unwrap_or("");
            debug!("identity provider rejected request: {} {}", status, reason);

            if reason.is_empty() {
                return Err(AuthError::Response(format!("{url} - {status}")));
            }
            return Err(AuthError::Rejected(AuthErrorCode::from_provider(reason)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Response(format!("invalid token response: {err}")))?;

        Ok(SessionContext::new(
            token
                .email
                .unwrap_or_else(|| request.payload.email.clone()),
            SecretString::from(token.id_token),
        ))
    }
}
