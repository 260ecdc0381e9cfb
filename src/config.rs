//! Runtime settings shared by the HTTP handlers.

use std::time::Duration;

use crate::auth::DEFAULT_NAVIGATION_DELAY_MS;
use crate::session::DEFAULT_SESSION_TTL_SECONDS;

#[derive(Clone, Debug)]
pub struct AppConfig {
    frontend_base_url: String,
    navigation_delay: Duration,
    session_ttl: Duration,
}

impl AppConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            navigation_delay: Duration::from_millis(DEFAULT_NAVIGATION_DELAY_MS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECONDS),
        }
    }

    #[must_use]
    pub fn with_navigation_delay_ms(mut self, millis: u64) -> Self {
        self.navigation_delay = Duration::from_millis(millis);
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl = Duration::from_secs(seconds);
        self
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    #[must_use]
    pub const fn navigation_delay(&self) -> Duration {
        self.navigation_delay
    }

    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::new("https://app.example.com".to_string());
        assert_eq!(config.frontend_base_url(), "https://app.example.com");
        assert_eq!(config.navigation_delay(), Duration::from_millis(1000));
        assert_eq!(config.session_ttl(), Duration::from_secs(12 * 60 * 60));
    }

    #[test]
    fn overrides() {
        let config = AppConfig::new("https://app.example.com".to_string())
            .with_navigation_delay_ms(0)
            .with_session_ttl_seconds(60);
        assert_eq!(config.navigation_delay(), Duration::ZERO);
        assert_eq!(config.session_ttl(), Duration::from_secs(60));
    }
}
