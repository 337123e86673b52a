use crate::coord::Coordinate;
use url::Url;

/// The path of the driving directions endpoint, relative to the service
/// base URL.
pub(crate) const DRIVING_CAR_PATH: &str = "v2/directions/driving-car";

/// The `Accept` header sent with every directions request.
pub(crate) const ACCEPT: &str = "application/json, application/geo+json";

/// Provides the URL of the directions endpoint used by a client.
pub(crate) trait DirectionsUrl {
    fn base_url(&self) -> &Url;

    fn directions_url(&self) -> Url {
        self.base_url()
            .join(DRIVING_CAR_PATH)
            .expect("since url ends with '/' this should never fail")
    }
}

/// The query parameters for a directions request, in the order the
/// directions service documents them.
pub(crate) fn directions_query(
    api_key: &str,
    origin: Coordinate,
    destination: Coordinate,
) -> [(&'static str, String); 3] {
    [
        ("api_key", api_key.to_owned()),
        ("start", origin.to_string()),
        ("end", destination.to_string()),
    ]
}

/// If the given url ends with a slash, return the url without
/// any modifications. If the given url does not end with a slash,
/// append a slash to the end and return a new `Url`.
pub(crate) fn add_slash_if_necessary(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
