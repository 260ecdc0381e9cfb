//! Map parsed command-line arguments to the action the binary runs.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{ARG_DSN, ARG_PORT, identity, onboarding};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches.get_one::<String>(ARG_DSN).cloned();

    let identity_opts = identity::Options::parse(matches)?;
    let onboarding_opts = onboarding::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn,
        identity_url: identity_opts.url,
        identity_api_key: identity_opts.api_key,
        frontend_base_url: onboarding_opts.frontend_base_url,
        navigation_delay_ms: onboarding_opts.navigation_delay_ms,
        session_ttl_seconds: onboarding_opts.session_ttl_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn builds_server_args() {
        temp_env::with_vars(
            [
                ("ONBOARDING_DSN", None::<&str>),
                ("ONBOARDING_PORT", None),
                ("ONBOARDING_FRONTEND_BASE_URL", None),
                ("ONBOARDING_NAVIGATION_DELAY_MS", None),
                ("ONBOARDING_SESSION_TTL_SECONDS", None),
                ("ONBOARDING_IDENTITY_URL", Some("https://identity.tld")),
                ("ONBOARDING_IDENTITY_API_KEY", Some("api-key")),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(["onboarding", "-p", "9090"]);
                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(args.port, 9090);
                    assert_eq!(args.dsn, None);
                    assert_eq!(args.identity_url, "https://identity.tld");
                    assert_eq!(args.identity_api_key.expose_secret(), "api-key");
                    assert_eq!(args.frontend_base_url, "http://localhost:3000");
                    assert_eq!(args.navigation_delay_ms, 1000);
                    assert_eq!(args.session_ttl_seconds, 43200);
                }
            },
        );
    }
}
