use serde::{Deserialize, Serialize};
use std::str::FromStr;

const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// A geographical coordinate, stored in (longitude, latitude) order.
///
/// A `Coordinate` can only be created with an in-range longitude and
/// latitude, so every value of this type is a valid point on Earth.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    /// Create a new `Coordinate`, returning an error if either component
    /// is outside of its valid range.
    ///
    /// # Example
    /// ```rust
    /// use orsroute::Coordinate;
    /// let coord = Coordinate::new(-101.189, 20.126).unwrap();
    /// assert_eq!(coord.lon(), -101.189);
    /// assert!(Coordinate::new(200.0, 20.126).is_err());
    /// ```
    pub fn new(lon: f64, lat: f64) -> Result<Self, ParseCoordinateError> {
        if !in_range(lon, LONGITUDE_RANGE) {
            return Err(ParseCoordinateError::LongitudeOutOfRange(lon));
        }
        if !in_range(lat, LATITUDE_RANGE) {
            return Err(ParseCoordinateError::LatitudeOutOfRange(lat));
        }
        Ok(Self { lon, lat })
    }

    /// Return the longitude component of this `Coordinate`.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Return the latitude component of this `Coordinate`.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Return this coordinate as a `(latitude, longitude)` tuple, the order
    /// most map widgets expect.
    pub fn to_lat_lon(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    value.is_finite() && value >= min && value <= max
}

/// Formats as `"<lon>,<lat>"`, the same format accepted by `FromStr`.
impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parse a `"<lon>,<lat>"` string. Whitespace around each component is
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCoordinateError::Empty);
        }

        let (lon_str, lat_str) = match s.split_once(',') {
            Some((lon, lat)) if !lat.contains(',') => (lon.trim(), lat.trim()),
            _ => return Err(ParseCoordinateError::Format(s.to_owned())),
        };

        let lon: f64 = lon_str
            .parse()
            .map_err(|_| ParseCoordinateError::Number(lon_str.to_owned()))?;
        let lat: f64 = lat_str
            .parse()
            .map_err(|_| ParseCoordinateError::Number(lat_str.to_owned()))?;

        Coordinate::new(lon, lat)
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = ParseCoordinateError;

    fn try_from((lon, lat): (f64, f64)) -> Result<Self, Self::Error> {
        Coordinate::new(lon, lat)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coord: Coordinate) -> Self {
        (coord.lon, coord.lat)
    }
}

/// An error indicating that a `Coordinate` could not be parsed or
/// was out of range.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseCoordinateError {
    #[error("coordinate is empty")]
    Empty,
    #[error("expected \"<lon>,<lat>\" but found \"{0}\"")]
    Format(String),
    #[error("\"{0}\" is not a number")]
    Number(String),
    #[error("longitude {0} is outside of [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("latitude {0} is outside of [-90, 90]")]
    LatitudeOutOfRange(f64),
}
