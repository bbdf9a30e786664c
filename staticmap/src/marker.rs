use serde_json::Value;
use staticmap_types::{GeoPoint, HasCoordinates};

use crate::encoding::style_pair;
use crate::error::StaticMapError;
use crate::options::{as_options, bool_value, reject_unknown, string_value, Options};

/// Style options a marker accepts.
pub const MARKER_OPTIONS: [&str; 5] = ["color", "size", "label", "icon", "shadow"];

const DEFAULT_COLOR: &str = "red";
const DEFAULT_SIZE: &str = "mid";

/// A point on the map displayed as a pin or a custom icon.
///
/// By default the marker is a red pin of `mid` size without a label. When an [icon](Marker::icon)
/// is set, color, size and label are not sent to the API, and `shadow` is sent only together
/// with the icon.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    location: GeoPoint,
    color: Option<String>,
    size: Option<String>,
    label: Option<String>,
    icon: Option<String>,
    shadow: Option<bool>,
}

impl Marker {
    /// Creates a marker with default style at the given location.
    pub fn new(location: impl HasCoordinates) -> Self {
        Self {
            location: GeoPoint::from_coordinates(&location),
            color: Some(DEFAULT_COLOR.to_string()),
            size: Some(DEFAULT_SIZE.to_string()),
            label: None,
            icon: None,
            shadow: None,
        }
    }

    /// Creates a marker at the given location with style from the `options` mapping.
    ///
    /// Recognized options are listed in [`MARKER_OPTIONS`], options not given keep their
    /// defaults. `null` value of an option clears it.
    pub fn with_options(
        location: impl HasCoordinates,
        options: &Value,
    ) -> Result<Self, StaticMapError> {
        let mut marker = Self::new(location);
        if let Some(options) = as_options(options, "marker")? {
            reject_unknown(options.keys(), &MARKER_OPTIONS)?;
            marker.apply_options(options)?;
        }

        Ok(marker)
    }

    /// Creates a marker from a single mapping holding the `lat` and `lng` coordinates together
    /// with style options.
    ///
    /// ```
    /// use serde_json::json;
    /// use staticmap::Marker;
    ///
    /// let marker = Marker::from_options(&json!({"lat": 1, "lng": 2, "label": "a"})).unwrap();
    /// assert_eq!(marker.label(), Some("A"));
    /// assert_eq!(marker.location_token(), "1,2");
    /// ```
    pub fn from_options(options: &Value) -> Result<Self, StaticMapError> {
        let location = GeoPoint::try_from(options)?;
        let mut marker = Self::new(location);

        if let Some(options) = as_options(options, "marker")? {
            let style_keys = options.keys().filter(|key| !matches!(key.as_str(), "lat" | "lng"));
            reject_unknown(style_keys, &MARKER_OPTIONS)?;
            marker.apply_options(options)?;
        }

        Ok(marker)
    }

    fn apply_options(&mut self, options: &Options) -> Result<(), StaticMapError> {
        for (name, value) in options {
            match name.as_str() {
                "color" => self.set_color(string_value(name, value)?),
                "size" => self.set_size(string_value(name, value)?),
                "label" => self.set_label(string_value(name, value)?),
                "icon" => self.set_icon(string_value(name, value)?),
                "shadow" => self.set_shadow(bool_value(name, value)?),
                _ => {}
            }
        }

        Ok(())
    }

    /// Location of the marker.
    pub fn location(&self) -> &GeoPoint {
        &self.location
    }

    /// Color of the marker, in lower case.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Sets the color. Either a color name (`red`, `green`) or a hex value (`0xFFAA00`).
    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color.map(|color| color.to_lowercase());
    }

    /// Sets the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.set_color(Some(color.into()));
        self
    }

    /// Size of the marker: `tiny`, `small` or `mid`.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Sets the size.
    pub fn set_size(&mut self, size: Option<String>) {
        self.size = size;
    }

    /// Sets the size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.set_size(Some(size.into()));
        self
    }

    /// Label of the marker, in upper case.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sets the label. The API displays a single alphanumeric character.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label.map(|label| label.to_uppercase());
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.set_label(Some(label.into()));
        self
    }

    /// URL of a custom icon.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Sets the custom icon URL.
    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    /// Sets the custom icon URL.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.set_icon(Some(icon.into()));
        self
    }

    /// Whether the custom icon is rendered with a shadow.
    pub fn shadow(&self) -> Option<bool> {
        self.shadow
    }

    /// Sets the shadow flag of the custom icon.
    pub fn set_shadow(&mut self, shadow: Option<bool>) {
        self.shadow = shadow;
    }

    /// Sets the shadow flag of the custom icon.
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.set_shadow(Some(shadow));
        self
    }

    /// Whether the marker uses a custom icon.
    pub fn has_icon(&self) -> bool {
        self.icon.is_some()
    }

    /// Style of the marker as `name:value` pairs joined with `|`, names in alphabetical order.
    ///
    /// Markers with equal style keys look the same on the map and are put into the same
    /// `markers` parameter.
    pub fn style_key(&self) -> String {
        let shape = |value: &Option<String>| {
            if self.has_icon() {
                None
            } else {
                value.clone()
            }
        };
        let shadow = self
            .shadow
            .filter(|_| self.has_icon())
            .map(|shadow| shadow.to_string());

        [
            ("color", shape(&self.color)),
            ("icon", self.icon.clone()),
            ("label", shape(&self.label)),
            ("shadow", shadow),
            ("size", shape(&self.size)),
        ]
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| style_pair(name, value)))
        .collect::<Vec<_>>()
        .join("|")
    }

    /// Location as `lat,lng`.
    pub fn location_token(&self) -> String {
        self.location.to_url_token()
    }
}

impl HasCoordinates for Marker {
    fn lat(&self) -> f64 {
        self.location.lat()
    }

    fn lng(&self) -> f64 {
        self.location.lng()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use serde_json::json;
    use staticmap_types::error::GeoError;

    #[test]
    fn default_style() {
        let marker = Marker::from_options(&json!({"lat": 1, "lng": 2})).unwrap();
        assert_eq!(marker.color(), Some("red"));
        assert_eq!(marker.size(), Some("mid"));
        assert_eq!(marker.label(), None);
        assert_eq!(marker.icon(), None);
        assert_eq!(marker.shadow(), None);
        assert_eq!(marker.style_key(), "color:red|size:mid");
    }

    #[test]
    fn location_from_object() {
        let marker = Marker::with_options((10.0, 20.0), &json!({"size": "small"})).unwrap();
        assert_eq!(marker.lat(), 10.0);
        assert_eq!(marker.lng(), 20.0);
        assert_eq!(marker.size(), Some("small"));
        assert_eq!(marker.location_token(), "10,20");
    }

    #[test]
    fn missing_coordinate() {
        assert_matches!(
            Marker::from_options(&json!({"lat": 10})),
            Err(StaticMapError::Geo(GeoError::MissingCoordinate("lng")))
        );
        assert_matches!(
            Marker::from_options(&json!({"lng": 20, "color": "blue"})),
            Err(StaticMapError::Geo(GeoError::MissingCoordinate("lat")))
        );
    }

    #[test]
    fn unknown_option() {
        assert_eq!(
            Marker::from_options(&json!({"lat": 2, "lng": 1, "invalid_option": "error?"})),
            Err(StaticMapError::UnknownOption(vec!["invalid_option".to_string()]))
        );
        assert_matches!(
            Marker::with_options((1.0, 2.0), &json!({"lat": 1})),
            Err(StaticMapError::UnknownOption(_))
        );
    }

    #[test]
    fn display_transforms() {
        let marker =
            Marker::from_options(&json!({"lat": 1, "lng": 2, "label": "a", "color": "Green"}))
                .unwrap();
        assert_eq!(marker.label(), Some("A"));
        assert_eq!(marker.color(), Some("green"));
    }

    #[test]
    fn style_key_is_sorted() {
        let marker = Marker::new((1.0, 2.0))
            .with_color("green")
            .with_label("a")
            .with_size("small");
        assert_eq!(marker.style_key(), "color:green|label:A|size:small");
    }

    #[test]
    fn icon_overrides_shape_style() {
        let marker = Marker::new((1.0, 2.0))
            .with_label("a")
            .with_icon("http://www.icon.com/")
            .with_shadow(false);

        assert!(marker.has_icon());
        assert_eq!(marker.style_key(), "icon:http://www.icon.com/|shadow:false");
    }

    #[test]
    fn icon_url_is_escaped() {
        let marker = Marker::new((1.0, 2.0)).with_icon("http://www.icon.com/foo bar/");
        assert_eq!(marker.style_key(), "icon:http://www.icon.com/foo%20bar/");
    }

    #[test]
    fn shadow_requires_icon() {
        let mut marker = Marker::new((1.0, 2.0))
            .with_icon("http://www.icon.com/")
            .with_shadow(true);
        marker.set_icon(None);

        assert!(!marker.has_icon());
        assert_eq!(marker.style_key(), "color:red|size:mid");
    }

    #[test]
    fn null_option_clears_default() {
        let marker = Marker::with_options((1.0, 2.0), &json!({"size": null})).unwrap();
        assert_eq!(marker.style_key(), "color:red");
    }

    #[test]
    fn marker_as_location() {
        let marker = Marker::new((0.0, 0.0)).with_color("blue");
        assert_eq!(marker.distance_to(&(1.0, 0.0)), 111195);

        let north = marker.endpoint(111195.0, 0.0);
        assert_abs_diff_eq!(north.lat(), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(north.lng(), 0.0, epsilon = 1e-5);

        let center = Marker::new(north);
        assert_eq!(center.location_token(), north.to_url_token());
    }

    #[test]
    fn value_equality() {
        assert_eq!(Marker::new((1.0, 2.0)), Marker::new(GeoPoint::new(1.0, 2.0)));
        assert_ne!(Marker::new((1.0, 2.0)), Marker::new((1.0, 2.0)).with_label("b"));
    }
}
