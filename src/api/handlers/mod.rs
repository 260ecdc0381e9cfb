//! API handlers and the helpers they share.

pub mod auth;
pub mod health;
pub mod onboarding;
pub mod root;

use axum::http::{HeaderMap, header::AUTHORIZATION};
use ulid::Ulid;

/// Extract the session token from `Authorization: Bearer <ulid>`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<Ulid> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Ulid::from_string(token.trim()).ok()
}
