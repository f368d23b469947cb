use thiserror::Error;

/// Failures of the geocoding adapter.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid coordinate in geocoder response: lat={lat:?} lon={lon:?}")]
    InvalidCoordinate { lat: String, lon: String },
}

/// User-visible outcome of an operation that degraded instead of failing.
///
/// None of these are fatal; the caller shows the message and keeps its
/// previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Notice {
    #[error("CSV imported, but no product code column was found")]
    ImportWithoutCode,

    #[error("place not found, try \"City, State\"")]
    PlaceNotFound,

    #[error("geocoding failed, please try again")]
    GeocodingFailed,

    #[error("suggestion {0} not found")]
    SuggestionNotFound(String),
}
