use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

use crate::auth::DEFAULT_NAVIGATION_DELAY_MS;
use crate::session::DEFAULT_SESSION_TTL_SECONDS;

pub const ARG_FRONTEND_BASE_URL: &str = "frontend-base-url";
pub const ARG_NAVIGATION_DELAY_MS: &str = "navigation-delay-ms";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_FRONTEND_BASE_URL)
                .long(ARG_FRONTEND_BASE_URL)
                .help("Frontend base URL, used as the only allowed CORS origin")
                .env("ONBOARDING_FRONTEND_BASE_URL")
                .default_value("http://localhost:3000"),
        )
        .arg(
            Arg::new(ARG_NAVIGATION_DELAY_MS)
                .long(ARG_NAVIGATION_DELAY_MS)
                .help("Delay the UI waits before moving to the wizard after a successful login")
                .env("ONBOARDING_NAVIGATION_DELAY_MS")
                .default_value("1000")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session lifetime in seconds")
                .env("ONBOARDING_SESSION_TTL_SECONDS")
                .default_value("43200")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub frontend_base_url: String,
    pub navigation_delay_ms: u64,
    pub session_ttl_seconds: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if a defaulted argument is somehow missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            frontend_base_url: matches
                .get_one::<String>(ARG_FRONTEND_BASE_URL)
                .cloned()
                .context("missing required argument: --frontend-base-url")?,
            navigation_delay_ms: matches
                .get_one::<u64>(ARG_NAVIGATION_DELAY_MS)
                .copied()
                .unwrap_or(DEFAULT_NAVIGATION_DELAY_MS),
            session_ttl_seconds: matches
                .get_one::<u64>(ARG_SESSION_TTL_SECONDS)
                .copied()
                .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
        })
    }
}
