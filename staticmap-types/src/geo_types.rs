use geo_types::{Coord, CoordNum, Point};
use num_traits::ToPrimitive;

use crate::coordinates::HasCoordinates;

impl<T: CoordNum> HasCoordinates for Point<T> {
    fn lat(&self) -> f64 {
        self.y().to_f64().unwrap_or(f64::NAN)
    }

    fn lng(&self) -> f64 {
        self.x().to_f64().unwrap_or(f64::NAN)
    }
}

impl<T: CoordNum> HasCoordinates for Coord<T> {
    fn lat(&self) -> f64 {
        self.y.to_f64().unwrap_or(f64::NAN)
    }

    fn lng(&self) -> f64 {
        self.x.to_f64().unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;
    use geo_types::point;

    #[test]
    fn point_is_lon_lat() {
        let point = point!(x: 10.5, y: 59.5);
        assert_eq!(GeoPoint::from_coordinates(&point).to_url_token(), "59.5,10.5");
    }

    #[test]
    fn integer_coord() {
        let coord = Coord { x: 2, y: 1 };
        assert_eq!(coord.lat(), 1.0);
        assert_eq!(coord.lng(), 2.0);
    }
}
