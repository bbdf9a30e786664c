use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coordinates::HasCoordinates;
use crate::error::GeoError;

/// Number of decimal digits coordinates are rounded to.
pub const COORDINATE_PRECISION: i32 = 6;

/// Point on the Earth surface given by latitude and longitude in degrees.
///
/// Both coordinates are rounded to [`COORDINATE_PRECISION`] decimal digits when they are set.
/// Integral values are displayed without fractional part, so `GeoPoint::new(10.0, 20.0)` is
/// rendered as `10,20`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(from = "LatLng", into = "LatLng")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize, Serialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        Self::new(value.lat, value.lng)
    }
}

impl From<GeoPoint> for LatLng {
    fn from(value: GeoPoint) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl GeoPoint {
    /// Creates a new point, normalizing both coordinates.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: normalize(lat),
            lng: normalize(lng),
        }
    }

    /// Copies coordinates of any location-like value.
    pub fn from_coordinates(source: &impl HasCoordinates) -> Self {
        Self::new(source.lat(), source.lng())
    }

    /// Reads a point from a mapping with numeric `lat` and `lng` entries.
    ///
    /// Other entries of the mapping are ignored.
    pub fn from_mapping(mapping: &Map<String, Value>) -> Result<Self, GeoError> {
        let lng = coordinate(mapping, "lng")?;
        let lat = coordinate(mapping, "lat")?;
        Ok(Self::new(lat, lng))
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Sets latitude, rounding it to [`COORDINATE_PRECISION`] digits.
    pub fn set_lat(&mut self, lat: f64) {
        self.lat = normalize(lat);
    }

    /// Sets longitude, rounding it to [`COORDINATE_PRECISION`] digits.
    pub fn set_lng(&mut self, lng: f64) {
        self.lng = normalize(lng);
    }

    /// Returns the point as `lat,lng` string used in URL parameters.
    pub fn to_url_token(&self) -> String {
        self.to_string()
    }
}

impl HasCoordinates for GeoPoint {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl TryFrom<&Value> for GeoPoint {
    type Error = GeoError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(mapping) => Self::from_mapping(mapping),
            other => Err(GeoError::UnsupportedCoordinateSource(format!(
                "non-mapping value `{other}`"
            ))),
        }
    }
}

impl TryFrom<Value> for GeoPoint {
    type Error = GeoError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

fn coordinate(mapping: &Map<String, Value>, key: &'static str) -> Result<f64, GeoError> {
    let value = mapping.get(key).ok_or(GeoError::MissingCoordinate(key))?;
    value.as_f64().ok_or_else(|| {
        GeoError::UnsupportedCoordinateSource(format!("non-numeric `{key}` value `{value}`"))
    })
}

/// Rounds the value to [`COORDINATE_PRECISION`] decimal digits.
///
/// Negative zero is collapsed into zero, so it is never displayed as `-0`.
pub fn normalize(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_PRECISION);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
