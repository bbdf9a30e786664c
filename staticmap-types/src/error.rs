//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A location mapping does not contain one of the coordinate keys.
    #[error("location is missing the `{0}` coordinate")]
    MissingCoordinate(&'static str),
    /// The value cannot be interpreted as a location.
    #[error("cannot read coordinates from {0}")]
    UnsupportedCoordinateSource(String),
    /// Requested number of circle points is outside of the `[10, 360]` range.
    #[error("number of circle points must be between 10 and 360, got {0}")]
    InvalidPointCount(usize),
    /// Encoded polyline string is malformed.
    #[error("invalid polyline: {0}")]
    InvalidPolyline(String),
}
