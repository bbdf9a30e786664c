use serde_json::Value;
use staticmap_types::{GeoPoint, HasCoordinates, PolylineEncoder};

use crate::encoding::style_pair;
use crate::error::StaticMapError;
use crate::options::{as_options, bool_value, reject_unknown, string_value, u32_value};

/// Options a path accepts.
pub const PATH_OPTIONS: [&str; 5] = ["weight", "color", "fillcolor", "points", "encode_points"];

/// A line or a polygon drawn over the map.
///
/// A path is an ordered sequence of unique points. Pushing a point that is already in the path
/// does nothing. If [fill color](Path::fillcolor) is set the API renders the path as a closed
/// polygon; the points themselves are sent as they are.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<GeoPoint>,
    weight: Option<u32>,
    color: Option<String>,
    fillcolor: Option<String>,
    encode_points: bool,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            weight: None,
            color: None,
            fillcolor: None,
            encode_points: true,
        }
    }
}

impl Path {
    /// Line weight the API uses when [`Path::weight`] is not set.
    pub const DEFAULT_WEIGHT: u32 = 5;

    /// Creates an empty path with encoded points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path from a sequence of points, dropping duplicates.
    pub fn from_points<P: HasCoordinates>(points: impl IntoIterator<Item = P>) -> Self {
        let mut path = Self::new();
        path.extend(points);
        path
    }

    /// Creates a path from point mappings and an options mapping.
    ///
    /// Points can also be given with the `points` option. They go before the `points`
    /// arguments.
    ///
    /// ```
    /// use serde_json::json;
    /// use staticmap::Path;
    ///
    /// let path = Path::from_options(
    ///     &[json!({"lat": 1, "lng": 2}), json!({"lat": 3, "lng": 4})],
    ///     &json!({"color": "red", "encode_points": false}),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(path.serialize().unwrap(), "path=color:red|1,2|3,4");
    /// ```
    pub fn from_options(points: &[Value], options: &Value) -> Result<Self, StaticMapError> {
        let mut path = Self::new();

        if let Some(options) = as_options(options, "path")? {
            reject_unknown(options.keys(), &PATH_OPTIONS)?;
            for (name, value) in options {
                match name.as_str() {
                    "weight" => path.set_weight(u32_value(name, value)?),
                    "color" => path.set_color(string_value(name, value)?),
                    "fillcolor" => path.set_fillcolor(string_value(name, value)?),
                    "points" => path.set_points_value(value)?,
                    "encode_points" => {
                        path.set_encode_points(bool_value(name, value)?.unwrap_or(true))
                    }
                    _ => {}
                }
            }
        }

        for point in points {
            path.push_value(point)?;
        }

        Ok(path)
    }

    /// Appends the point unless the path already has it.
    pub fn push(&mut self, point: impl HasCoordinates) -> &mut Self {
        let point = GeoPoint::from_coordinates(&point);
        if !self.points.contains(&point) {
            self.points.push(point);
        }

        self
    }

    /// Same as [`Path::push`] for a point given as a `lat`/`lng` mapping.
    pub fn push_value(&mut self, point: &Value) -> Result<&mut Self, StaticMapError> {
        let point = GeoPoint::try_from(point)?;
        Ok(self.push(point))
    }

    /// Replaces all points of the path.
    pub fn set_points<P: HasCoordinates>(&mut self, points: impl IntoIterator<Item = P>) {
        self.points.clear();
        self.extend(points);
    }

    /// Replaces all points of the path with the contents of an array of point mappings.
    ///
    /// Fails with [`StaticMapError::InvalidArgument`] if the value is not an array. The path
    /// is left unchanged if any of the points is invalid.
    pub fn set_points_value(&mut self, points: &Value) -> Result<(), StaticMapError> {
        let Value::Array(values) = points else {
            return Err(StaticMapError::InvalidArgument(format!(
                "path points must be an array, got `{points}`"
            )));
        };

        let points = values
            .iter()
            .map(GeoPoint::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.set_points(points);

        Ok(())
    }

    /// Points of the path.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Iterates over the points of the path.
    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Line weight in pixels.
    pub fn weight(&self) -> Option<u32> {
        self.weight
    }

    /// Line weight, falling back to [`Path::DEFAULT_WEIGHT`].
    pub fn effective_weight(&self) -> u32 {
        self.weight.unwrap_or(Self::DEFAULT_WEIGHT)
    }

    /// Sets the line weight.
    pub fn set_weight(&mut self, weight: Option<u32>) {
        self.weight = weight;
    }

    /// Sets the line weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Line color, a color name or a 24-bit (`0xAABBCC`) or 32-bit (`0xAABBCCDD`) hex value.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Sets the line color.
    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color;
    }

    /// Sets the line color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Fill color of the polygon.
    pub fn fillcolor(&self) -> Option<&str> {
        self.fillcolor.as_deref()
    }

    /// Sets the fill color, turning the path into a polygon.
    pub fn set_fillcolor(&mut self, fillcolor: Option<String>) {
        self.fillcolor = fillcolor;
    }

    /// Sets the fill color.
    pub fn with_fillcolor(mut self, fillcolor: impl Into<String>) -> Self {
        self.fillcolor = Some(fillcolor.into());
        self
    }

    /// Whether the points are sent polyline encoded.
    pub fn is_encoding_points(&self) -> bool {
        self.encode_points
    }

    /// Sets whether the points are sent polyline encoded.
    pub fn set_encode_points(&mut self, encode_points: bool) {
        self.encode_points = encode_points;
    }

    /// Sets whether the points are sent polyline encoded.
    pub fn with_encode_points(mut self, encode_points: bool) -> Self {
        self.encode_points = encode_points;
        self
    }

    /// Returns the `path=` URL parameter.
    ///
    /// Fails with [`StaticMapError::InsufficientPoints`] if the path has less than 2 points.
    pub fn serialize(&self) -> Result<String, StaticMapError> {
        if self.points.len() < 2 {
            return Err(StaticMapError::InsufficientPoints(self.points.len()));
        }

        let mut params: Vec<String> = [
            ("weight", self.weight.map(|weight| weight.to_string())),
            ("color", self.color.clone()),
            ("fillcolor", self.fillcolor.clone()),
        ]
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| style_pair(name, value)))
        .collect();

        if self.encode_points {
            let encoded = PolylineEncoder::encode(&self.points);
            params.push(format!("enc:{}", encoded.points()));
        } else {
            params.extend(self.points.iter().map(GeoPoint::to_url_token));
        }

        Ok(format!("path={}", params.join("|")))
    }
}

impl<P: HasCoordinates> Extend<P> for Path {
    fn extend<T: IntoIterator<Item = P>>(&mut self, iter: T) {
        for point in iter {
            self.push(point);
        }
    }
}

impl<P: HasCoordinates> FromIterator<P> for Path {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Self::from_points(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn two_point_path() -> Path {
        let mut path = Path::new().with_encode_points(false);
        path.push((1.0, 2.0)).push((3.0, 4.0));
        path
    }

    #[test]
    fn defaults() {
        let path = Path::new();
        assert!(path.is_empty());
        assert!(path.is_encoding_points());
        assert_eq!(path.weight(), None);
        assert_eq!(path.effective_weight(), 5);
        assert_eq!(path.color(), None);
        assert_eq!(path.fillcolor(), None);
    }

    #[test]
    fn options() {
        let path = Path::from_options(
            &[],
            &json!({
                "weight": 5,
                "color": "0x0000ff",
                "fillcolor": "0x110000ff",
                "encode_points": false
            }),
        )
        .unwrap();

        assert_eq!(path.weight(), Some(5));
        assert_eq!(path.color(), Some("0x0000ff"));
        assert_eq!(path.fillcolor(), Some("0x110000ff"));
        assert!(!path.is_encoding_points());
    }

    #[test]
    fn unknown_option() {
        assert_eq!(
            Path::from_options(&[], &json!({"width": 3})),
            Err(StaticMapError::UnknownOption(vec!["width".to_string()]))
        );
    }

    #[test]
    fn points_option_goes_first() {
        let path = Path::from_options(
            &[json!({"lat": 5, "lng": 6})],
            &json!({"points": [{"lat": 1, "lng": 2}, {"lat": 3, "lng": 4}]}),
        )
        .unwrap();

        assert_eq!(
            path.points(),
            &[
                GeoPoint::new(1.0, 2.0),
                GeoPoint::new(3.0, 4.0),
                GeoPoint::new(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn duplicates_are_dropped() {
        let mut path = Path::new();
        path.push((1.0, 2.0)).push(GeoPoint::new(1.0, 2.0));
        assert_eq!(path.len(), 1);

        path.push_value(&json!({"lat": 1, "lng": 2})).unwrap();
        assert_eq!(path.points(), &[GeoPoint::new(1.0, 2.0)]);
    }

    #[test]
    fn clear_points() {
        let mut path = two_point_path();
        path.clear();
        assert_eq!(path.len(), 0);
    }

    #[test]
    fn set_points_requires_array() {
        let mut path = two_point_path();
        assert_matches!(
            path.set_points_value(&Value::Null),
            Err(StaticMapError::InvalidArgument(_))
        );
        assert_eq!(path.len(), 2);

        path.set_points_value(&json!([{"lat": 7, "lng": 8}, {"lat": 7, "lng": 8}]))
            .unwrap();
        assert_eq!(path.points(), &[GeoPoint::new(7.0, 8.0)]);
    }

    #[test]
    fn serialize_needs_two_points() {
        let mut path = two_point_path();
        path.set_points(Vec::<GeoPoint>::new());
        assert_eq!(path.serialize(), Err(StaticMapError::InsufficientPoints(0)));

        path.push((1.0, 1.0));
        assert_eq!(path.serialize(), Err(StaticMapError::InsufficientPoints(1)));
    }

    #[test]
    fn serialize_literal_points() {
        let path = two_point_path();
        assert_eq!(path.serialize().unwrap(), "path=1,2|3,4");
        assert_eq!(path.with_weight(3).serialize().unwrap(), "path=weight:3|1,2|3,4");
    }

    #[test]
    fn serialize_style() {
        let path = two_point_path()
            .with_color("0x0000ff")
            .with_fillcolor("0x110000ff")
            .with_weight(5);
        assert_eq!(
            path.serialize().unwrap(),
            "path=weight:5|color:0x0000ff|fillcolor:0x110000ff|1,2|3,4"
        );
    }

    #[test]
    fn serialize_encoded_points() {
        let path = two_point_path().with_encode_points(true);
        assert_eq!(path.serialize().unwrap(), "path=enc:_ibE_seK_seK_seK");
    }

    #[test]
    fn collect_into_path() {
        let path: Path = [(1.0, 2.0), (3.0, 4.0), (1.0, 2.0)].into_iter().collect();
        assert_eq!(path.len(), 2);
    }
}
