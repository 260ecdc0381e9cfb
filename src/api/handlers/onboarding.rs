//! Onboarding wizard endpoints. All of them require `Authorization: Bearer <session>`.

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use ulid::Ulid;

use super::bearer_token;
use crate::api::AppState;
use crate::onboarding::WizardEvent;
use crate::session::SessionContext;
use crate::wizard::WizardView;

/// Resolve the bearer token to a live session. Expired sessions also lose their wizard.
async fn require_session(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<(Ulid, Arc<SessionContext>), StatusCode> {
    let token = bearer_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;
    if let Some(session) = state.sessions.get(&token).await {
        return Ok((token, session));
    }
    if state.flows.unmount(&token).await {
        debug!("dropped wizard of expired session {}", token);
    }
    Err(StatusCode::UNAUTHORIZED)
}

#[utoipa::path(
    get,
    path = "/v1/onboarding",
    responses(
        (status = 200, description = "Wizard mounted (or already mounted)", body = WizardView),
        (status = 401, description = "Missing, unknown or expired session"),
        (status = 503, description = "Profile store unavailable", body = String)
    ),
    tag = "onboarding"
)]
#[instrument(skip_all)]
pub async fn mount(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    let (token, session) = match require_session(&headers, &state).await {
        Ok(found) => found,
        Err(status) => return status.into_response(),
    };

    match state.flows.mount(token, session, state.store.as_ref()).await {
        Ok(flow) => {
            let view = flow.lock().await.view();
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => {
            error!("Failed to mount onboarding wizard: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Profile store unavailable".to_string(),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/onboarding/events",
    request_body = WizardEvent,
    responses(
        (status = 200, description = "Event applied", body = WizardView),
        (status = 400, description = "Event rejected", body = String),
        (status = 401, description = "Missing, unknown or expired session"),
        (status = 404, description = "Wizard not mounted", body = String)
    ),
    tag = "onboarding"
)]
#[instrument(skip_all)]
pub async fn apply_event(
    headers: HeaderMap,
    state: Extension<Arc<AppState>>,
    payload: Option<Json<WizardEvent>>,
) -> impl IntoResponse {
    let (token, _session) = match require_session(&headers, &state).await {
        Ok(found) => found,
        Err(status) => return status.into_response(),
    };

    let event = match payload {
        Some(Json(event)) => event,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let Some(flow) = state.flows.get(&token).await else {
        return (StatusCode::NOT_FOUND, "Wizard not mounted".to_string()).into_response();
    };

    let mut flow = flow.lock().await;
    if let Err(err) = flow.apply(event, state.store.as_ref()).await {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }

    (StatusCode::OK, Json(flow.view())).into_response()
}

#[utoipa::path(
    delete,
    path = "/v1/onboarding",
    responses(
        (status = 204, description = "Wizard unmounted"),
        (status = 401, description = "Missing, unknown or expired session")
    ),
    tag = "onboarding"
)]
#[instrument(skip_all)]
pub async fn unmount(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    let (token, _session) = match require_session(&headers, &state).await {
        Ok(found) => found,
        Err(status) => return status.into_response(),
    };

    state.flows.unmount(&token).await;
    StatusCode::NO_CONTENT.into_response()
}
