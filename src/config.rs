use crate::err::NewDirectionsClientError;
use crate::DirectionsClient;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// The base URL of the public openrouteservice API.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org/";

/// The request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The environment variable holding the openrouteservice API key.
pub const API_KEY_VAR: &str = "ORS_API_KEY";
/// The environment variable which overrides the service base URL.
pub const BASE_URL_VAR: &str = "ORS_BASE_URL";
/// The environment variable which overrides the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "ORS_TIMEOUT_SECS";

/// Contains resources used by a `DirectionsClient`.
/// If creating multiple `DirectionsClient`s, the same `ClientSeed`
/// should be reused for each, so they share a connection pool.
#[derive(Clone, Debug)]
pub struct ClientSeed {
    client: reqwest::Client,
}

impl ClientSeed {
    /// Create a new `ClientSeed`. Every request sent with this seed gives up
    /// after `timeout_in_seconds`, which must not be zero.
    pub fn new(
        timeout_in_seconds: u64,
    ) -> Result<Self, NewDirectionsClientError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout(timeout_in_seconds)?)
            .build()?;
        Ok(Self { client })
    }

    /// Create a new `ClientSeed` from an existing `reqwest::Client`. The
    /// client's own timeout settings are used.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

/// Convert a timeout in seconds into the per-request timeout of a client.
pub(crate) fn request_timeout(
    timeout_in_seconds: u64,
) -> Result<Duration, NewDirectionsClientError> {
    if timeout_in_seconds == 0 {
        return Err(NewDirectionsClientError::ZeroTimeout);
    }
    Ok(Duration::from_secs(timeout_in_seconds))
}

/// Settings for talking to the directions service, usually read from the
/// environment.
#[derive(Clone, PartialEq)]
pub struct DirectionsConfig {
    pub api_key: String,
    pub base_url: Url,
    pub timeout_in_seconds: u64,
}

impl DirectionsConfig {
    /// Create a config for the public openrouteservice API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Url::parse(DEFAULT_BASE_URL)
                .expect("the default base URL is valid"),
            timeout_in_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the config from the `ORS_API_KEY`, `ORS_BASE_URL` and
    /// `ORS_TIMEOUT_SECS` environment variables. Only the API key is
    /// required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key.trim());

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = Url::parse(base_url.trim())?;
        }

        if let Some(timeout) = lookup(TIMEOUT_VAR) {
            config.timeout_in_seconds = match timeout.trim().parse::<u64>() {
                Ok(seconds) if seconds > 0 => seconds,
                _ => return Err(ConfigError::InvalidTimeout(timeout)),
            };
        }

        Ok(config)
    }

    /// Create a `DirectionsClient` using these settings.
    pub fn client(&self) -> Result<DirectionsClient, ConfigError> {
        let seed = ClientSeed::new(self.timeout_in_seconds)?;
        Ok(DirectionsClient::new(self.base_url.clone(), seed)?)
    }
}

impl std::fmt::Debug for DirectionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_in_seconds", &self.timeout_in_seconds)
            .finish()
    }
}

/// Errors that can occur when reading a `DirectionsConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The ORS_API_KEY environment variable is not set")]
    MissingApiKey,
    #[error("Invalid ORS_BASE_URL value: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error(
        "Invalid ORS_TIMEOUT_SECS value \"{0}\", expected a positive \
         whole number of seconds"
    )]
    InvalidTimeout(String),
    #[error("Could not create the directions client: {0}")]
    Client(#[from] NewDirectionsClientError),
}
