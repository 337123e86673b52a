//! The JSON schema of a directions response, and the conversion of a raw
//! HTTP response into a `RouteResult`.

use crate::coord::Coordinate;
use crate::err::{Error, ParseRouteError};
use crate::route::RouteResult;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Only the first feature is ever turned into a route, so the others are
/// kept as raw JSON and never validated.
#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    pub features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    /// Each position is `[lon, lat]`, or `[lon, lat, elevation]` when
    /// elevation was requested.
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Properties {
    pub summary: Summary,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct Summary {
    pub distance: f64,
    pub duration: f64,
}

/// The error body returned by openrouteservice. Depending on which layer
/// rejected the request, `error` is either an object or a plain string.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured { code: Option<i64>, message: String },
    Text(String),
}

impl ErrorDetail {
    fn into_message(self) -> String {
        match self {
            Self::Structured {
                code: Some(code),
                message,
            } => format!("{} (code {})", message, code),
            Self::Structured {
                code: None,
                message,
            } => message,
            Self::Text(message) => message,
        }
    }
}

/// Try to extract the error message from an openrouteservice error body.
pub(crate) fn remote_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| payload.error.into_message())
}

/// Convert the status and body of a directions response into a route,
/// using only the first feature of the response.
pub(crate) fn http_response_to_route(
    status: StatusCode,
    body: &str,
) -> Result<RouteResult, Error> {
    if !status.is_success() {
        let message = remote_error_message(body);
        tracing::warn!(
            status = status.as_u16(),
            reason = message.as_deref().unwrap_or("<none>"),
            "directions service returned an error status"
        );
        return Err(Error::Remote {
            status,
            body: body.to_owned(),
            message,
        });
    }

    let response: DirectionsResponse =
        serde_json::from_str(body).map_err(log_parse_error)?;

    let first = match response.features.into_iter().next() {
        Some(first) => first,
        None => return Err(Error::EmptyRoute),
    };
    let feature: Feature =
        serde_json::from_value(first).map_err(log_parse_error)?;

    feature_to_route(feature).map_err(Error::from)
}

fn log_parse_error(err: serde_json::Error) -> ParseRouteError {
    tracing::warn!(error = %err, "could not parse directions response");
    ParseRouteError::from(err)
}

fn feature_to_route(
    feature: Feature,
) -> Result<RouteResult, ParseRouteError> {
    let points = feature
        .geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(index, position)| position_to_coordinate(index, position))
        .collect::<Result<Vec<_>, _>>()?;

    let Summary { distance, duration } = feature.properties.summary;
    RouteResult::new(points, distance, duration)
}

fn position_to_coordinate(
    index: usize,
    position: &[f64],
) -> Result<Coordinate, ParseRouteError> {
    match position {
        [lon, lat, ..] => Coordinate::new(*lon, *lat).map_err(|err| {
            ParseRouteError::new(format!(
                "route position {} is invalid: {}",
                index, err
            ))
        }),
        _ => Err(ParseRouteError::new(format!(
            "route position {} has {} values, expected at least 2",
            index,
            position.len()
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::{http_response_to_route, remote_error_message};
    use crate::coord::Coordinate;
    use crate::err::Error;
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    const EXAMPLE_BODY: &str = r#"{"features":[{
        "geometry":{"coordinates":[[-101.189,20.126],[-101.2,20.13]]},
        "properties":{"summary":{"distance":1500.0,"duration":180.0}}
    }]}"#;

    fn coord(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat).unwrap()
    }

    fn feature(coordinates: Value, summary: Value) -> Value {
        json!({
            "geometry": { "coordinates": coordinates },
            "properties": { "summary": summary }
        })
    }

    fn body(features: Vec<Value>) -> String {
        json!({ "features": features }).to_string()
    }

    fn assert_malformed(body: &str) {
        let result = http_response_to_route(StatusCode::OK, body);
        assert!(
            matches!(result, Err(Error::MalformedResponse(_))),
            "expected malformed response for body {:?}",
            body
        );
    }

    #[test]
    fn example_response() {
        let route =
            http_response_to_route(StatusCode::OK, EXAMPLE_BODY).unwrap();
        assert_eq!(
            route.points(),
            &[coord(-101.189, 20.126), coord(-101.2, 20.13)]
        );
        assert_eq!(route.distance_meters(), 1500.0);
        assert_eq!(route.duration_seconds(), 180.0);
    }

    #[test]
    fn points_preserve_length_and_order() {
        let coordinates: Vec<[f64; 2]> = (0..50)
            .map(|i| [-101.0 - i as f64 * 0.01, 20.0 + i as f64 * 0.005])
            .collect();
        let body = json!({
            "type": "FeatureCollection",
            "bbox": [-101.49, 20.0, -101.0, 20.245],
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates
                },
                "properties": {
                    "segments": [],
                    "summary": { "distance": 52000.4, "duration": 3100.9 }
                }
            }],
            "metadata": { "service": "routing" }
        });

        let route =
            http_response_to_route(StatusCode::OK, &body.to_string()).unwrap();
        assert_eq!(route.points().len(), coordinates.len());
        for (point, [lon, lat]) in route.points().iter().zip(coordinates) {
            assert_eq!(point.lon(), lon);
            assert_eq!(point.lat(), lat);
        }
    }

    #[test]
    fn only_first_feature_is_used() {
        let body = body(vec![
            feature(
                json!([[1.0, 1.0], [2.0, 2.0]]),
                json!({ "distance": 10.0, "duration": 1.0 }),
            ),
            feature(
                json!([[3.0, 3.0], [4.0, 4.0], [5.0, 5.0]]),
                json!({ "distance": 99.0, "duration": 9.0 }),
            ),
        ]);
        let route = http_response_to_route(StatusCode::OK, &body).unwrap();
        assert_eq!(route.points().len(), 2);
        assert_eq!(route.distance_meters(), 10.0);
    }

    #[test]
    fn malformed_alternate_routes_are_ignored() {
        let body = body(vec![
            feature(
                json!([[1.0, 1.0], [2.0, 2.0]]),
                json!({ "distance": 10.0, "duration": 1.0 }),
            ),
            feature(json!([[3.0, 3.0]]), json!({ "distance": 99.0 })),
            json!("not a feature"),
        ]);
        let route = http_response_to_route(StatusCode::OK, &body).unwrap();
        assert_eq!(route.points(), &[coord(1.0, 1.0), coord(2.0, 2.0)]);
        assert_eq!(route.duration_seconds(), 1.0);
    }

    #[test]
    fn elevation_is_ignored() {
        let body = body(vec![feature(
            json!([[1.0, 1.0, 1800.0], [2.0, 2.0, 1795.5]]),
            json!({ "distance": 10.0, "duration": 1.0 }),
        )]);
        let route = http_response_to_route(StatusCode::OK, &body).unwrap();
        assert_eq!(route.points(), &[coord(1.0, 1.0), coord(2.0, 2.0)]);
    }

    #[test]
    fn empty_features() {
        let result =
            http_response_to_route(StatusCode::OK, r#"{"features":[]}"#);
        assert!(matches!(result, Err(Error::EmptyRoute)));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let two_points = json!([[1.0, 1.0], [2.0, 2.0]]);
        let summary = json!({ "distance": 1.0, "duration": 1.0 });

        assert_malformed("{}");
        assert_malformed("not json at all");
        assert_malformed("");
        let no_properties = json!({
            "geometry": { "coordinates": two_points.clone() }
        });
        assert_malformed(&body(vec![no_properties]));
        assert_malformed(&body(vec![feature(
            two_points,
            json!({ "distance": 1.0 }),
        )]));
        let no_geometry = json!({ "properties": { "summary": summary } });
        assert_malformed(&body(vec![no_geometry]));
    }

    #[test]
    fn invalid_geometry_is_malformed() {
        let summary = json!({ "distance": 1.0, "duration": 1.0 });

        // A single point is not a route.
        assert_malformed(&body(vec![feature(
            json!([[1.0, 1.0]]),
            summary.clone(),
        )]));
        assert_malformed(&body(vec![feature(
            json!([[1.0], [2.0, 2.0]]),
            summary.clone(),
        )]));
        assert_malformed(&body(vec![feature(
            json!([[1.0, 1.0], [2.0, 95.0]]),
            summary,
        )]));
        assert_malformed(&body(vec![feature(
            json!([[1.0, 1.0], [2.0, 2.0]]),
            json!({ "distance": -1.0, "duration": 1.0 }),
        )]));
    }

    #[test]
    fn non_success_status_is_remote_error() {
        let message = "Could not find routable point within a radius of \
                       350.0 meters";
        let body = json!({ "error": { "code": 2010, "message": message } })
            .to_string();
        let err =
            http_response_to_route(StatusCode::NOT_FOUND, &body).unwrap_err();
        match err {
            Error::Remote {
                status,
                body: err_body,
                message: err_message,
            } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(err_body, body);
                assert_eq!(
                    err_message,
                    Some(format!("{} (code 2010)", message))
                );
            }
            _ => panic!(),
        }
    }

    #[test]
    fn non_success_status_wins_over_valid_body() {
        let err = http_response_to_route(
            StatusCode::INTERNAL_SERVER_ERROR,
            EXAMPLE_BODY,
        )
        .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn error_message_formats() {
        assert_eq!(
            remote_error_message(r#"{"error":"Access disallowed"}"#),
            Some("Access disallowed".to_owned())
        );
        assert_eq!(
            remote_error_message(r#"{"error":{"message":"Quota exceeded"}}"#),
            Some("Quota exceeded".to_owned())
        );
        assert_eq!(remote_error_message("<html>Bad Gateway</html>"), None);
    }
}
