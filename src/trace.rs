//! The "trace route" workflow of a map screen: the origin is a persisted
//! home coordinate, the destination is typed in, picked on the map, or taken
//! from the device's current location.

use crate::coord::Coordinate;
use crate::route::RouteResult;
use crate::{DirectionsClient, Error};
use thiserror::Error;

/// The preference key under which the home coordinate is stored, as a
/// `"<lon>,<lat>"` string.
pub const HOME_KEY: &str = "origin_coordinates";

/// Supplies the current location of the device.
pub trait LocationProvider {
    /// Return the current location, or `None` if it is unavailable, for
    /// example because permission was not granted or there is no fix yet.
    fn current_location(&self) -> Option<Coordinate>;
}

impl<F> LocationProvider for F
where
    F: Fn() -> Option<Coordinate>,
{
    fn current_location(&self) -> Option<Coordinate> {
        self()
    }
}

/// A string key-value store which survives process restarts.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> std::io::Result<()>;
}

/// The outcome of `ensure_home`.
#[derive(Clone, Debug, PartialEq)]
pub enum HomeOrigin {
    /// A home coordinate was already stored. It is returned as stored and
    /// is only validated when a route is requested.
    Existing(String),
    /// No home coordinate was stored, so the current location was stored.
    Stored(Coordinate),
    /// No home coordinate was stored and the current location is
    /// unavailable.
    Unavailable,
}

/// Make sure a home coordinate is stored, using the current location the
/// first time this is called.
pub fn ensure_home<S, L>(
    store: &mut S,
    location: &L,
) -> std::io::Result<HomeOrigin>
where
    S: PreferenceStore + ?Sized,
    L: LocationProvider + ?Sized,
{
    if let Some(existing) = store.get(HOME_KEY) {
        return Ok(HomeOrigin::Existing(existing));
    }

    match location.current_location() {
        Some(coord) => {
            store.set(HOME_KEY, &coord.to_string())?;
            tracing::info!(home = %coord, "stored current location as home");
            Ok(HomeOrigin::Stored(coord))
        }
        None => {
            tracing::debug!("no home stored and current location unavailable");
            Ok(HomeOrigin::Unavailable)
        }
    }
}

/// Return the current location as destination text, or `None` if the
/// location is unavailable.
pub fn destination_from_location<L>(location: &L) -> Option<String>
where
    L: LocationProvider + ?Sized,
{
    location.current_location().map(|coord| coord.to_string())
}

/// Request a route from the stored home coordinate to `destination_text`.
///
/// A missing home or a blank destination is reported without contacting the
/// directions service. The store is only read.
pub async fn trace_route<S>(
    client: &DirectionsClient,
    store: &S,
    destination_text: &str,
    api_key: &str,
) -> Result<RouteResult, TraceError>
where
    S: PreferenceStore + ?Sized,
{
    let origin_text = store.get(HOME_KEY).ok_or(TraceError::MissingOrigin)?;
    if destination_text.trim().is_empty() {
        return Err(TraceError::MissingDestination);
    }

    Ok(client
        .get_route(&origin_text, destination_text, api_key)
        .await?)
}

/// Errors that can occur when tracing a route from home.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("No home coordinate has been stored")]
    MissingOrigin,
    #[error("No destination was given")]
    MissingDestination,
    #[error(transparent)]
    Route(#[from] Error),
}
