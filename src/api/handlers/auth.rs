//! `POST /v1/auth`: login or signup, then hand out a session token.

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::auth::{AuthErrorCode, AuthForm, AuthOutcome, FieldErrors, flow};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token for the onboarding endpoints.
    pub session: String,
    pub email: String,
    pub redirect: String,
    pub redirect_after_ms: u64,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct FieldErrorsResponse {
    #[schema(value_type = Object)]
    pub errors: FieldErrors,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuthErrorResponse {
    pub code: String,
    pub message: String,
}

fn status_for(code: &AuthErrorCode) -> StatusCode {
    match code {
        AuthErrorCode::UserNotFound | AuthErrorCode::WrongPassword => StatusCode::UNAUTHORIZED,
        AuthErrorCode::EmailAlreadyInUse => StatusCode::CONFLICT,
        AuthErrorCode::Other(_) => StatusCode::BAD_GATEWAY,
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth",
    request_body = AuthForm,
    responses(
        (status = 200, description = "Authenticated; navigate to the onboarding wizard", body = AuthResponse),
        (status = 400, description = "Form validation failed", body = FieldErrorsResponse),
        (status = 401, description = "Unknown user or wrong password", body = AuthErrorResponse),
        (status = 409, description = "Email already signed up", body = AuthErrorResponse),
        (status = 502, description = "Identity provider or profile store failure", body = AuthErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn authenticate(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<AuthForm>>,
) -> impl IntoResponse {
    let form: AuthForm = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let outcome = flow::authenticate(
        &form,
        state.authenticator.as_ref(),
        state.store.as_ref(),
        state.config.navigation_delay(),
    )
    .await;

    match outcome {
        AuthOutcome::Invalid(errors) => {
            (StatusCode::BAD_REQUEST, Json(FieldErrorsResponse { errors })).into_response()
        }
        AuthOutcome::Failed(err) => {
            let code = err.code();
            let body = AuthErrorResponse {
                code: code.to_string(),
                message: err.message().to_string(),
            };
            (status_for(&code), Json(body)).into_response()
        }
        AuthOutcome::Authenticated {
            session,
            navigation,
        } => {
            let email = session.email.clone();
            let token = state.sessions.insert(session).await;
            info!("session established for {}", email);

            let body = AuthResponse {
                session: token.to_string(),
                email,
                redirect: navigation.path.to_string(),
                redirect_after_ms: u64::try_from(navigation.delay.as_millis()).unwrap_or(u64::MAX),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
    }
}
