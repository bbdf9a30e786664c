use crate::error::GeoError;
use crate::point::GeoPoint;
use crate::sphere;

/// Anything that knows its position on the Earth surface.
///
/// Latitude and longitude are given in degrees. All the spherical helpers are provided on top of
/// the two accessors, so any location-like type (a database row, a GPS fix, a marker) gets them
/// by implementing this trait.
pub trait HasCoordinates {
    /// Latitude in degrees.
    fn lat(&self) -> f64;
    /// Longitude in degrees.
    fn lng(&self) -> f64;

    /// Latitude in radians.
    fn lat_rad(&self) -> f64 {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lng_rad(&self) -> f64 {
        self.lng().to_radians()
    }

    /// Distance to the `other` point in whole meters.
    ///
    /// The distance is measured along the rhumb line (a track of constant bearing on the Mercator
    /// projection), not along the great circle. See [`sphere::rhumb_distance`].
    fn distance_to(&self, other: &impl HasCoordinates) -> u64 {
        sphere::rhumb_distance(self, other)
    }

    /// Point reached by travelling `distance` meters from this point with the given `heading`
    /// (degrees clockwise from north).
    fn endpoint(&self, distance: f64, heading: f64) -> GeoPoint {
        sphere::destination(self, distance, heading)
    }

    /// [`DEFAULT_CIRCLE_POINTS`](sphere::DEFAULT_CIRCLE_POINTS) points lying on a circle of
    /// `radius` meters around this point.
    fn endpoints_for_circle(&self, radius: f64) -> Vec<GeoPoint> {
        sphere::circle(self, radius, sphere::DEFAULT_CIRCLE_POINTS)
    }

    /// Same as [`HasCoordinates::endpoints_for_circle`] with a custom number of points.
    ///
    /// `num_points` must be in range `[10, 360]`.
    fn endpoints_for_circle_with(
        &self,
        radius: f64,
        num_points: usize,
    ) -> Result<Vec<GeoPoint>, GeoError> {
        if !sphere::CIRCLE_POINTS_RANGE.contains(&num_points) {
            return Err(GeoError::InvalidPointCount(num_points));
        }

        Ok(sphere::circle(self, radius, num_points))
    }
}

impl<T: HasCoordinates + ?Sized> HasCoordinates for &T {
    fn lat(&self) -> f64 {
        (*self).lat()
    }

    fn lng(&self) -> f64 {
        (*self).lng()
    }
}

/// `(lat, lng)` pair.
impl HasCoordinates for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }

    fn lng(&self) -> f64 {
        self.1
    }
}
