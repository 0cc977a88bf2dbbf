use std::time::Duration;

use reqwest::Url;
use strum::{Display, EnumString};

use crate::error::ClientError;

pub const TEST_BASE_URL: &str = "https://test-api.navlungo.com/v2.1";
pub const PROD_BASE_URL: &str = "https://domestic-api.navlungo.com/v2.1";

pub const ENVIRONMENT_ENV: &str = "NAVLUNGO_ENV";
pub const BASE_URL_ENV: &str = "NAVLUNGO_BASE_URL";
pub const API_TOKEN_ENV: &str = "NAVLUNGO_API_TOKEN";
pub const TIMEOUT_ENV: &str = "NAVLUNGO_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Deployment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Environment {
    Test,
    #[default]
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Test => TEST_BASE_URL,
            Environment::Production => PROD_BASE_URL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ClientConfig {
    pub fn for_environment(environment: Environment) -> Self {
        ClientConfig {
            base_url: environment.base_url().to_string(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("navlungo-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a configuration from `NAVLUNGO_*` environment variables.
    ///
    /// `NAVLUNGO_BASE_URL` takes precedence over `NAVLUNGO_ENV`; unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let environment = match lookup(ENVIRONMENT_ENV) {
            Some(name) => name
                .parse::<Environment>()
                .map_err(|_| ClientError::InvalidConfig(format!("unknown environment `{name}`")))?,
            None => Environment::default(),
        };

        let mut config = Self::for_environment(environment);
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        config.api_token = lookup(API_TOKEN_ENV).filter(|token| !token.is_empty());
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs = secs.parse::<u64>().map_err(|e| {
                ClientError::InvalidConfig(format!("invalid {TIMEOUT_ENV} `{secs}`: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Parses and checks the configured base URL.
    pub fn parsed_base_url(&self) -> Result<Url, ClientError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_production() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.base_url, PROD_BASE_URL);
        assert_eq!(config.api_token, None);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn selects_test_environment() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENVIRONMENT_ENV, "test"),
            (API_TOKEN_ENV, "abc"),
            (TIMEOUT_ENV, "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, TEST_BASE_URL);
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn explicit_base_url_wins() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENVIRONMENT_ENV, "test"),
            (BASE_URL_ENV, "http://localhost:8080/v2.1"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/v2.1");
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = ClientConfig::from_lookup(lookup(&[(ENVIRONMENT_ENV, "staging")])).unwrap_err();

        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_base_url_without_hierarchy() {
        let config = ClientConfig::default().with_base_url("mailto:ops@navlungo.com");

        assert!(matches!(
            config.parsed_base_url(),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }
}
