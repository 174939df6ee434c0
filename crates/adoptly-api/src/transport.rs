// Transport configuration for building the reqwest::Client.
//
// Base URL and timeout are resolved once, here, and handed to the client
// constructor. Nothing downstream reads the environment.

use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Host used when no override is supplied.
pub const DEFAULT_BASE_URL: &str = "https://pets-react-query-backend.eapi.joincoded.com";

/// Fixed per-request timeout. Not exposed to configuration files or flags.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved transport configuration for [`PetClient`](crate::PetClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build a config for an explicit base URL.
    pub fn new(base_url: Url) -> Result<Self, Error> {
        match base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config(format!(
                    "unsupported URL scheme '{other}' (expected http or https)"
                )));
            }
        }
        Ok(Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Resolve the base URL from an optional override.
    ///
    /// A non-blank override wins; otherwise the default host is used.
    pub fn with_base_url_override(override_url: Option<&str>) -> Result<Self, Error> {
        match override_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Self::new(Url::parse(raw)?),
            None => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("adoptly/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))
    }
}
