use crate::{
    api::{self, AppState},
    auth::{Authenticator, IdentityClient},
    config::AppConfig,
    profile::{MemoryProfileStore, PgProfileStore, ProfileStore},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: Option<String>,
    pub identity_url: String,
    pub identity_api_key: SecretString,
    pub frontend_base_url: String,
    pub navigation_delay_ms: u64,
    pub session_ttl_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the profile store or identity client cannot be set up, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let store: Arc<dyn ProfileStore> = match &args.dsn {
        Some(dsn) => Arc::new(
            PgProfileStore::connect(dsn)
                .await
                .context("Failed to connect to database")?,
        ),
        None => {
            warn!("No --dsn given, profiles are kept in memory");
            Arc::new(MemoryProfileStore::new())
        }
    };

    let authenticator: Arc<dyn Authenticator> = Arc::new(
        IdentityClient::new(&args.identity_url, args.identity_api_key)
            .context("Failed to build identity provider client")?,
    );

    let config = AppConfig::new(args.frontend_base_url)
        .with_navigation_delay_ms(args.navigation_delay_ms)
        .with_session_ttl_seconds(args.session_ttl_seconds);

    debug!("Config: {:?}", config);

    api::new(args.port, AppState::new(config, authenticator, store)).await
}
