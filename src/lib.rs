//! # Overview
//! This crate requests driving routes from the
//! [openrouteservice](https://openrouteservice.org/) directions API.
//! It validates loosely formatted `"<lon>,<lat>"` coordinate strings,
//! sends a single request to the `driving-car` directions endpoint and
//! turns the response into a `RouteResult` (polyline points, distance and
//! duration), or into a typed `Error` describing what went wrong.
//!
//! # Usage
//! 1. Put these dependencies in your Cargo.toml:
//!     ```toml
//!     [dependencies]
//!     orsroute = "0.1"
//!     tokio = { version = "1", features = ["macros", "rt-multi-thread"] }
//!     ```
//! 1. Put this in `main.rs` to create and use a `DirectionsClient`:
//!     ```rust,no_run
//!     use orsroute::{ClientSeed, DirectionsClient};
//!
//!     #[tokio::main]
//!     async fn main() {
//!         let seed = ClientSeed::new(30).unwrap();
//!         let client = DirectionsClient::openrouteservice(seed);
//!         let route = client
//!             .get_route("-101.189,20.126", "-101.200,20.130", "my-api-key")
//!             .await
//!             .unwrap();
//!
//!         println!(
//!             "{} km in {} min",
//!             route.distance_km(),
//!             route.duration_minutes()
//!         );
//!         // Most map widgets want (lat, lon) pairs:
//!         let polyline = route.lat_lon_points();
//!         println!("{} points", polyline.len());
//!     }
//!     ```
//!
//! A blocking client is available in the `blocking` module when the
//! `blocking` feature is enabled.

mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
mod config;
mod coord;
mod err;
pub mod prefs;
mod response;
mod route;
pub mod trace;

use api::DirectionsUrl;
pub use config::{
    ClientSeed, ConfigError, DirectionsConfig, API_KEY_VAR, BASE_URL_VAR,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TIMEOUT_VAR,
};
pub use coord::{Coordinate, ParseCoordinateError};
pub use err::{Endpoint, Error, NewDirectionsClientError, ParseRouteError};
pub use reqwest::StatusCode;
pub use route::{RouteRequest, RouteResult};
use url::Url;

type Result<T> = std::result::Result<T, Error>;

/// A client for requesting driving routes from a directions service.
///
/// The client holds no per-request state, so it can be cloned cheaply and
/// used for many concurrent requests.
#[derive(Clone, Debug)]
pub struct DirectionsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl DirectionsClient {
    /// Create a new `DirectionsClient` which talks to the directions service
    /// at `base_url`.
    ///
    /// # Example
    /// ```rust
    /// use orsroute::{ClientSeed, DirectionsClient};
    /// use url::Url;
    /// let seed = ClientSeed::new(30).unwrap();
    /// let url = Url::parse("http://localhost:8080/ors").unwrap();
    /// let client = DirectionsClient::new(url, seed).unwrap();
    /// assert_eq!(
    ///     client.directions_url().as_str(),
    ///     "http://localhost:8080/ors/v2/directions/driving-car"
    /// );
    /// ```
    pub fn new(
        base_url: Url,
        client_seed: ClientSeed,
    ) -> std::result::Result<Self, NewDirectionsClientError> {
        let base_url = validate_base_url(base_url)?;

        Ok(DirectionsClient {
            client: client_seed.client().clone(),
            base_url,
        })
    }

    /// Create a new `DirectionsClient` for the public openrouteservice API.
    pub fn openrouteservice(client_seed: ClientSeed) -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .expect("the default base URL is valid");
        DirectionsClient {
            client: client_seed.client().clone(),
            base_url,
        }
    }

    /// Return the base URL of the directions service.
    pub fn base_url(&self) -> &Url {
        DirectionsUrl::base_url(self)
    }

    /// Return the URL of the driving directions endpoint.
    pub fn directions_url(&self) -> Url {
        DirectionsUrl::directions_url(self)
    }

    /// Request a driving route between two `"<lon>,<lat>"` coordinates.
    ///
    /// Both coordinates are validated before anything is sent, so invalid
    /// input always results in `Error::InvalidCoordinate` and no network
    /// traffic. Otherwise exactly one request is made; it is never retried.
    /// Only the first route in the response is returned.
    pub async fn get_route(
        &self,
        origin_text: &str,
        destination_text: &str,
        api_key: &str,
    ) -> Result<RouteResult> {
        let request =
            RouteRequest::parse(origin_text, destination_text, api_key)?;
        self.route(request).await
    }

    /// Request a driving route for an already validated `RouteRequest`.
    pub async fn route(&self, request: RouteRequest) -> Result<RouteResult> {
        let query = api::directions_query(
            request.api_key(),
            request.origin(),
            request.destination(),
        );

        tracing::debug!(
            origin = %request.origin(),
            destination = %request.destination(),
            "requesting driving route"
        );

        let res = self
            .client
            .get(self.directions_url())
            .header("Accept", api::ACCEPT)
            .query(&query)
            .send()
            .await
            .map_err(log_network_error)?;

        let status = res.status();
        let body = res.text().await.map_err(log_network_error)?;
        let route = response::http_response_to_route(status, &body)?;

        tracing::debug!(
            points = route.points().len(),
            distance_meters = route.distance_meters(),
            duration_seconds = route.duration_seconds(),
            "received driving route"
        );
        Ok(route)
    }
}

impl DirectionsUrl for DirectionsClient {
    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Ensure the URL ends with a slash and can have the endpoint path
/// appended to it. Joining the endpoint path would silently drop a query
/// or fragment, so URLs with either are rejected.
pub(crate) fn validate_base_url(
    base_url: Url,
) -> std::result::Result<Url, NewDirectionsClientError> {
    if base_url.cannot_be_a_base() {
        let url_err_msg = "the directions service URL must be a valid base URL";
        return Err(NewDirectionsClientError::url(url_err_msg));
    }
    if base_url.query().is_some() || base_url.fragment().is_some() {
        let url_err_msg =
            "the directions service URL must not have a query or fragment";
        return Err(NewDirectionsClientError::url(url_err_msg));
    }

    Ok(api::add_slash_if_necessary(base_url))
}

pub(crate) fn log_network_error(err: reqwest::Error) -> Error {
    // reqwest includes the URL, and so the API key, in its error messages.
    let err = err.without_url();
    tracing::warn!(
        error = %err,
        timeout = err.is_timeout(),
        "directions request failed"
    );
    Error::Network(err)
}
