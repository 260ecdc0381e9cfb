use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_IDENTITY_URL: &str = "identity-url";
pub const ARG_IDENTITY_API_KEY: &str = "identity-api-key";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_IDENTITY_URL)
                .long(ARG_IDENTITY_URL)
                .help("Identity provider base URL, example: https://identitytoolkit.googleapis.com")
                .env("ONBOARDING_IDENTITY_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_IDENTITY_API_KEY)
                .long(ARG_IDENTITY_API_KEY)
                .help("Identity provider API key")
                .env("ONBOARDING_IDENTITY_API_KEY")
                .hide_env_values(true)
                .required(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub url: String,
    pub api_key: SecretString,
}

impl Options {
    /// # Errors
    /// Returns an error if either identity argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_IDENTITY_URL)
            .cloned()
            .context("missing required argument: --identity-url")?;
        let api_key = matches
            .get_one::<String>(ARG_IDENTITY_API_KEY)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --identity-api-key")?;

        Ok(Self { url, api_key })
    }
}
