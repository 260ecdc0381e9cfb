use crate::{
    api::handlers::{health, root},
    auth::Authenticator,
    config::AppConfig,
    onboarding::OnboardingRegistry,
    profile::ProfileStore,
    session::SessionRegistry,
};
use anyhow::{Context, Result, anyhow};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{
        HeaderName, HeaderValue, Method, Request,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, options},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, debug, info, info_span};
use ulid::Ulid;
use url::Url;
use utoipa_axum::router::OpenApiRouter;

pub(crate) mod handlers;
mod openapi;

pub use openapi::openapi;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Everything the handlers share.
pub struct AppState {
    pub config: AppConfig,
    pub sessions: SessionRegistry,
    pub flows: OnboardingRegistry,
    pub authenticator: Arc<dyn Authenticator>,
    pub store: Arc<dyn ProfileStore>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        authenticator: Arc<dyn Authenticator>,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        let sessions = SessionRegistry::new(config.session_ttl());
        Self {
            config,
            sessions,
            flows: OnboardingRegistry::new(),
            authenticator,
            store,
        }
    }

    /// Drop expired sessions and unmount any wizard left without a live session.
    /// Returns the number of wizards unmounted.
    pub async fn sweep_expired(&self) -> usize {
        let expired = self.sessions.purge_expired().await;
        let live = self.sessions.tokens().await;
        let unmounted = self.flows.retain(|token| live.contains(token)).await;

        if !expired.is_empty() || unmounted > 0 {
            debug!(
                "swept {} expired sessions, {} wizards",
                expired.len(),
                unmounted
            );
        }
        unmounted
    }
}

/// Periodically sweep `state` until the runtime shuts down.
fn spawn_sweeper(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            state.sweep_expired().await;
        }
    });
}

/// Build the API router with all documented routes registered.
#[must_use]
pub fn router() -> OpenApiRouter {
    openapi::api_router()
}

/// Assemble the full application: documented routes, `/`, and the middleware stack.
///
/// # Errors
/// Returns an error if the frontend base URL cannot be turned into a CORS origin.
pub fn app(state: Arc<AppState>) -> Result<Router> {
    let frontend_origin = frontend_origin(state.config.frontend_base_url())?;

    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(AllowOrigin::exact(frontend_origin))
        .allow_credentials(true);

    let (router, _openapi) = router().split_for_parts();
    let app = router
        .route("/", get(root::root))
        .route("/health", options(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(state)),
        );

    Ok(app)
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, state: AppState) -> Result<()> {
    info!(
        "Profile store: {}, session ttl: {}s",
        state.store.backend(),
        state.config.session_ttl().as_secs()
    );

    let state = Arc::new(state);
    spawn_sweeper(state.clone(), SWEEP_INTERVAL);

    let app = app(state)?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {err}");
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn frontend_origin(frontend_base_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(frontend_base_url)
        .with_context(|| format!("Invalid frontend base URL: {frontend_base_url}"))?;
    let host = parsed.host_str().ok_or_else(|| {
        anyhow!("Frontend base URL must include a valid host: {frontend_base_url}")
    })?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build frontend origin header")
}
