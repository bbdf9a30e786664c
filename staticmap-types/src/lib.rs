//! Geographic points and polyline encoding used to describe static map contents.
//!
//! * [`HasCoordinates`] is the capability of anything that knows its latitude and longitude.
//! * [`GeoPoint`] is the concrete, precision normalized point used by markers and paths.
//! * [`PolylineEncoder`] converts point sequences into the compact polyline format.

pub mod error;

mod coordinates;
pub use coordinates::*;

mod point;
pub use point::*;

pub mod polyline;
pub use polyline::{EncodedPolyline, PolylineEncoder};

pub mod sphere;

#[cfg(feature = "geo-types")]
mod geo_types;
