use crate::coord::ParseCoordinateError;
use reqwest::StatusCode;
use thiserror::Error;

/// Identifies which end of a route an invalid coordinate belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Encapsulates all errors that can occur when requesting a route.
#[derive(Debug, Error)]
pub enum Error {
    /// The origin or destination text was not a valid coordinate. No
    /// request was sent to the directions service.
    #[error("Invalid {endpoint} coordinate: {source}")]
    InvalidCoordinate {
        /// Which coordinate was invalid.
        endpoint: Endpoint,
        source: ParseCoordinateError,
    },
    /// An error which originated from the underlying HTTP library, such as
    /// a timeout or a connection failure.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),
    /// The directions service responded with a non-success status code.
    #[error(
        "Directions service returned {status}{}",
        remote_message_suffix(.message)
    )]
    Remote {
        status: StatusCode,
        /// The raw response body.
        body: String,
        /// The error message reported by the service, if the body
        /// contained one.
        message: Option<String>,
    },
    /// The response was valid but did not contain any routes.
    #[error("Directions service returned no routes")]
    EmptyRoute,
    /// The response body did not match the expected schema.
    #[error("Malformed directions response: {0}")]
    MalformedResponse(#[from] ParseRouteError),
}

fn remote_message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

impl Error {
    /// Return true if this error was caused by invalid coordinate text.
    pub fn is_invalid_coordinate(&self) -> bool {
        matches!(self, Self::InvalidCoordinate { .. })
    }

    /// Return true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Network(err) => err.is_timeout(),
            _ => false,
        }
    }

    /// Return the HTTP status code returned by the directions service, if
    /// this error was caused by a non-success response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error denoting that a directions response body could not be turned into
/// a route.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{msg}")]
pub struct ParseRouteError {
    pub(crate) msg: String,
}

impl ParseRouteError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        ParseRouteError { msg: msg.into() }
    }

    /// Return a description of what was wrong with the response.
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<serde_json::Error> for ParseRouteError {
    fn from(error: serde_json::Error) -> Self {
        ParseRouteError::new(error.to_string())
    }
}

/// Errors that can occur when creating a new `DirectionsClient`.
#[derive(Debug, Error)]
pub enum NewDirectionsClientError {
    /// The base URL could not be parsed.
    #[error("Could not parse a URL: {0}")]
    UrlParse(#[from] url::ParseError),
    /// The base URL cannot be used as a base for the directions endpoint.
    #[error("URL is not usable as a directions service base URL: {0}")]
    UrlFormat(String),
    /// The request timeout was zero, which would fail every request.
    #[error("The request timeout must be at least one second")]
    ZeroTimeout,
    /// An error originating in the underlying HTTP client.
    #[error("Error occurred in the underlying HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl NewDirectionsClientError {
    pub(crate) fn url(msg: &str) -> Self {
        NewDirectionsClientError::UrlFormat(msg.to_owned())
    }
}
