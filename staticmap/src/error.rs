//! Error types used by the crate.

use staticmap_types::error::GeoError;
use thiserror::Error;

/// Static map error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StaticMapError {
    /// Required options were not given and have no default.
    #[error("the following required options are missing: {}", .0.join(", "))]
    MissingOption(Vec<String>),
    /// Options that are not recognized.
    #[error("the following options do not exist: {}", .0.join(", "))]
    UnknownOption(Vec<String>),
    /// Option is recognized, but its value has a wrong type or shape.
    #[error("invalid value for option `{option}`: {reason}")]
    InvalidOptionValue {
        /// Name of the option.
        option: String,
        /// What is wrong with the value.
        reason: String,
    },
    /// Map width or height is above the API limit.
    #[error("{dimension} {value} is above the max limit {max}")]
    DimensionTooLarge {
        /// `width` or `height`.
        dimension: &'static str,
        /// Requested value.
        value: u32,
        /// Maximum allowed value.
        max: u32,
    },
    /// Image format is not one of the supported ones.
    #[error("unsupported image format `{0}`")]
    UnsupportedFormat(String),
    /// Map type is not one of the supported ones.
    #[error("unsupported map type `{0}`")]
    UnsupportedMapType(String),
    /// Map has neither entities nor both center and zoom set.
    #[error("map needs markers, paths or center and zoom to build a URL")]
    NothingToBuild,
    /// Path has less than two points.
    #[error("path needs at least 2 points, got {0}")]
    InsufficientPoints(usize),
    /// Argument has a wrong type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Location could not be read.
    #[error(transparent)]
    Geo(#[from] GeoError),
}
