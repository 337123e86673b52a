//! A blocking version of `DirectionsClient`.
//!
//! The blocking client must not be used from within an async runtime.

use crate::api::{self, DirectionsUrl};
use crate::config::request_timeout;
use crate::err::{Error, NewDirectionsClientError};
use crate::response::http_response_to_route;
use crate::route::{RouteRequest, RouteResult};
use url::Url;

type Result<T> = std::result::Result<T, Error>;
type StdResult<T, E> = std::result::Result<T, E>;

/// A blocking client for requesting driving routes from a directions
/// service.
#[derive(Clone, Debug)]
pub struct DirectionsClient {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl DirectionsClient {
    /// Create a new blocking `DirectionsClient`. Requests give up after
    /// `timeout_in_seconds`, which must not be zero.
    ///
    /// # Example
    /// ```rust,no_run
    /// # fn run() {
    /// use orsroute::blocking::DirectionsClient;
    /// use url::Url;
    /// let url = Url::parse("https://api.openrouteservice.org/").unwrap();
    /// let client = DirectionsClient::new(url, 30).unwrap();
    /// let route = client
    ///     .get_route("-101.189,20.126", "-101.2,20.13", "my-api-key")
    ///     .unwrap();
    /// # }
    /// ```
    pub fn new(
        base_url: Url,
        timeout_in_seconds: u64,
    ) -> StdResult<Self, NewDirectionsClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(request_timeout(timeout_in_seconds)?)
            .build()?;
        Self::new_with_client(base_url, client)
    }

    /// Create a new blocking `DirectionsClient`, passing in an existing
    /// `reqwest::blocking::Client`.
    ///
    /// If creating multiple `DirectionsClient`s,
    /// the same `reqwest::blocking::Client` should be used for each.
    pub fn new_with_client(
        base_url: Url,
        reqwest_client: reqwest::blocking::Client,
    ) -> StdResult<Self, NewDirectionsClientError> {
        let base_url = crate::validate_base_url(base_url)?;
        Ok(DirectionsClient {
            client: reqwest_client,
            base_url,
        })
    }

    pub fn client(&self) -> &reqwest::blocking::Client {
        &self.client
    }

    /// Return the base URL of the directions service.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the URL of the driving directions endpoint.
    pub fn directions_url(&self) -> Url {
        DirectionsUrl::directions_url(self)
    }

    /// Request a driving route between two `"<lon>,<lat>"` coordinates.
    /// See `crate::DirectionsClient::get_route`.
    pub fn get_route(
        &self,
        origin_text: &str,
        destination_text: &str,
        api_key: &str,
    ) -> Result<RouteResult> {
        let request =
            RouteRequest::parse(origin_text, destination_text, api_key)?;
        self.route(request)
    }

    /// Request a driving route for an already validated `RouteRequest`.
    pub fn route(&self, request: RouteRequest) -> Result<RouteResult> {
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
            .client()
            .get(self.directions_url())
            .header("Accept", api::ACCEPT)
            .query(&query)
            .send()
            .map_err(crate::log_network_error)?;

        let status = res.status();
        let body = res.text().map_err(crate::log_network_error)?;
        http_response_to_route(status, &body)
    }
}

impl DirectionsUrl for DirectionsClient {
    fn base_url(&self) -> &Url {
        &self.base_url
    }
}
