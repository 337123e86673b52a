use crate::coord::Coordinate;
use crate::err::{Endpoint, Error, ParseRouteError};
use crate::response::http_response_to_route;
use reqwest::StatusCode;
use serde::Serialize;

/// A validated request for a driving route between two coordinates.
///
/// The API key is not included in the `Debug` output.
#[derive(Clone, PartialEq)]
pub struct RouteRequest {
    origin: Coordinate,
    destination: Coordinate,
    api_key: String,
}

impl RouteRequest {
    /// Create a new `RouteRequest` from coordinates which have already
    /// been validated.
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            origin,
            destination,
            api_key: api_key.into(),
        }
    }

    /// Parse the origin and destination from `"<lon>,<lat>"` strings.
    /// The origin is checked first, so if both are invalid the returned
    /// error refers to the origin.
    ///
    /// # Example
    /// ```rust
    /// use orsroute::RouteRequest;
    /// let req =
    ///     RouteRequest::parse("-101.189,20.126", "-101.2,20.13", "KEY")
    ///         .unwrap();
    /// assert_eq!(req.origin().lon(), -101.189);
    /// let no_lat = RouteRequest::parse("-101.189", "-101.2,20.13", "KEY");
    /// assert!(no_lat.is_err());
    /// ```
    pub fn parse(
        origin_text: &str,
        destination_text: &str,
        api_key: &str,
    ) -> Result<Self, Error> {
        let origin = origin_text.parse().map_err(|source| {
            Error::InvalidCoordinate {
                endpoint: Endpoint::Origin,
                source,
            }
        })?;
        let destination = destination_text.parse().map_err(|source| {
            Error::InvalidCoordinate {
                endpoint: Endpoint::Destination,
                source,
            }
        })?;
        Ok(Self::new(origin, destination, api_key))
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for RouteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRequest")
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// A driving route returned by the directions service.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteResult {
    points: Vec<Coordinate>,
    distance_meters: f64,
    duration_seconds: f64,
}

impl RouteResult {
    /// Create a new `RouteResult`. The route must contain at least two
    /// points, and the distance and duration must be finite and
    /// non-negative.
    pub fn new(
        points: Vec<Coordinate>,
        distance_meters: f64,
        duration_seconds: f64,
    ) -> Result<Self, ParseRouteError> {
        if points.len() < 2 {
            return Err(ParseRouteError::new(format!(
                "expected at least 2 route points but found {}",
                points.len()
            )));
        }
        if !is_non_negative(distance_meters) {
            return Err(ParseRouteError::new(format!(
                "invalid route distance {}",
                distance_meters
            )));
        }
        if !is_non_negative(duration_seconds) {
            return Err(ParseRouteError::new(format!(
                "invalid route duration {}",
                duration_seconds
            )));
        }

        Ok(Self {
            points,
            distance_meters,
            duration_seconds,
        })
    }

    /// Build a route from the status and body of a directions response.
    /// Only the first route in the body is used.
    ///
    /// A non-success status is an `Error::Remote`, a response without
    /// routes is an `Error::EmptyRoute`, and a first route which cannot be
    /// read is an `Error::MalformedResponse`.
    pub fn from_response_body(
        status: StatusCode,
        body: &str,
    ) -> Result<Self, Error> {
        http_response_to_route(status, body)
    }

    /// The points of the route polyline, in (longitude, latitude) order.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consume the route and return its polyline points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// The route polyline as `(latitude, longitude)` tuples, ready to be
    /// plotted on maps which use that order.
    pub fn lat_lon_points(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(Coordinate::to_lat_lon).collect()
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    /// The first point of the route.
    pub fn origin(&self) -> Coordinate {
        self.points[0]
    }

    /// The last point of the route.
    pub fn destination(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
