//! Calculations on a spherical Earth model.

use std::f64::consts::{FRAC_PI_4, PI};
use std::ops::RangeInclusive;

use crate::coordinates::HasCoordinates;
use crate::point::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of points generated by [`HasCoordinates::endpoints_for_circle`].
pub const DEFAULT_CIRCLE_POINTS: usize = 60;

/// Allowed number of points for [`HasCoordinates::endpoints_for_circle_with`].
pub const CIRCLE_POINTS_RANGE: RangeInclusive<usize> = 10..=360;

/// Rhumb line distance between two points in whole meters.
///
/// For points on the same parallel the east-west component is scaled by the cosine of the
/// starting latitude. The formula is not exactly symmetric.
pub fn rhumb_distance<A, B>(from: &A, to: &B) -> u64
where
    A: HasCoordinates + ?Sized,
    B: HasCoordinates + ?Sized,
{
    let d_lat = (to.lat() - from.lat()).to_radians();
    let mut d_lon = (to.lng() - from.lng()).abs().to_radians();

    let d_phi = ((to.lat_rad() / 2.0 + FRAC_PI_4).tan()
        / (from.lat_rad() / 2.0 + FRAC_PI_4).tan())
    .ln();
    let q = if d_lat.abs() > 1e-10 {
        d_lat / d_phi
    } else {
        from.lat_rad().cos()
    };

    if d_lon > PI {
        d_lon = 2.0 * PI - d_lon;
    }

    let d = (d_lat * d_lat + q * q * d_lon * d_lon).sqrt();
    (d * EARTH_RADIUS_KM * 1000.0).round() as u64
}

/// Destination point after travelling `distance` meters along the great circle that starts at
/// `from` with the initial `heading` in degrees.
pub fn destination<A>(from: &A, distance: f64, heading: f64) -> GeoPoint
where
    A: HasCoordinates + ?Sized,
{
    let d = distance / 1000.0 / EARTH_RADIUS_KM;
    let heading = heading.to_radians();
    let lat = from.lat_rad();
    let lng = from.lng_rad();

    let y = (lat.sin() * d.cos() + lat.cos() * d.sin() * heading.cos()).asin();
    let x = lng + (heading.sin() * d.sin() * lat.cos()).atan2(d.cos() - lat.sin() * y.sin());

    GeoPoint::new(y.to_degrees(), x.to_degrees())
}

/// `num_points` points of a circle with `radius` meters around `center`, starting due north
/// and going clockwise.
pub(crate) fn circle<A>(center: &A, radius: f64, num_points: usize) -> Vec<GeoPoint>
where
    A: HasCoordinates + ?Sized,
{
    let step = 360.0 / num_points as f64;
    (0..num_points)
        .map(|i| destination(center, radius, i as f64 * step))
        .collect()
}
