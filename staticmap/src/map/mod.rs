//! [`MapBuilder`] and its options.

use std::collections::HashMap;

use serde_json::Value;
use staticmap_types::{GeoPoint, HasCoordinates};

use crate::config::{KeyPolicy, MapDefaults, API_URL};
use crate::encoding::escape;
use crate::error::StaticMapError;
use crate::marker::Marker;
use crate::options::{as_options, bool_value, invalid, reject_unknown, string_value, u32_value};
use crate::path::Path;

mod format;
mod size;

pub use format::{ImageFormat, MapType};
pub use size::{MapSize, MAX_HEIGHT, MAX_WIDTH};

/// Options that must be given when a map is created from options.
pub const REQUIRED_OPTIONS: [&str; 3] = ["key", "size", "sensor"];
/// Options that may be given when a map is created from options.
pub const OPTIONAL_OPTIONS: [&str; 6] =
    ["center", "zoom", "format", "maptype", "mobile", "language"];

/// Something drawn over the map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEntity {
    /// A marker.
    Marker(Marker),
    /// A path.
    Path(Path),
}

impl From<Marker> for MapEntity {
    fn from(value: Marker) -> Self {
        Self::Marker(value)
    }
}

impl From<Path> for MapEntity {
    fn from(value: Path) -> Self {
        Self::Path(value)
    }
}

/// Markers sharing the same [style key](Marker::style_key).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup<'a> {
    style_key: String,
    markers: Vec<&'a Marker>,
}

impl<'a> MarkerGroup<'a> {
    /// Style key shared by the markers of the group.
    pub fn style_key(&self) -> &str {
        &self.style_key
    }

    /// Markers of the group in the order they were added to the map.
    pub fn markers(&self) -> &[&'a Marker] {
        &self.markers
    }

    /// The `markers=` URL parameter of the group.
    pub fn url_param(&self) -> String {
        let mut values = Vec::with_capacity(self.markers.len() + 1);
        if !self.style_key.is_empty() {
            values.push(self.style_key.clone());
        }
        values.extend(self.markers.iter().map(|marker| marker.location_token()));

        format!("markers={}", values.join("|"))
    }
}

/// State of a static map: options of the image together with markers and paths drawn over it.
///
/// Call [`MapBuilder::build`] to get the URL of the image.
///
/// ```
/// use staticmap::{MapBuilder, MapSize, Path};
///
/// let path = Path::from_points([(1.0, 2.0), (3.0, 4.0)]).with_encode_points(false);
/// let map = MapBuilder::new(MapSize::new(400, 600).unwrap(), false)
///     .with_key("MY_KEY")
///     .with_entity(path);
///
/// assert_eq!(
///     map.build().unwrap(),
///     "http://maps.google.com/maps/api/staticmap?key=MY_KEY&size=400x600&sensor=false&path=1,2|3,4"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MapBuilder {
    api_url: String,
    key: Option<String>,
    size: MapSize,
    sensor: bool,
    center: Option<String>,
    zoom: Option<u32>,
    format: Option<ImageFormat>,
    maptype: Option<MapType>,
    mobile: Option<bool>,
    language: Option<String>,
    entities: Vec<MapEntity>,
}

impl MapBuilder {
    /// Creates an empty map with the required options.
    pub fn new(size: MapSize, sensor: bool) -> Self {
        Self {
            api_url: API_URL.to_string(),
            key: None,
            size,
            sensor,
            center: None,
            zoom: None,
            format: None,
            maptype: None,
            mobile: None,
            language: None,
            entities: Vec::new(),
        }
    }

    /// Creates an empty map from the `options` mapping.
    ///
    /// Required options ([`REQUIRED_OPTIONS`]) absent from `options` are taken from `defaults`.
    /// With [`KeyPolicy::Optional`] the `key` option is not required.
    ///
    /// Fails with [`StaticMapError::MissingOption`] listing all required options that are still
    /// missing, then with [`StaticMapError::UnknownOption`] listing all options that are not
    /// recognized, then with the error of the first invalid option value.
    pub fn from_options(options: &Value, defaults: &MapDefaults) -> Result<Self, StaticMapError> {
        let mut options = as_options(options, "map")?.cloned().unwrap_or_default();

        if let Some(key) = &defaults.key {
            options.entry("key").or_insert_with(|| Value::String(key.clone()));
        }
        if let Some(size) = defaults.size {
            options
                .entry("size")
                .or_insert_with(|| Value::String(size.to_string()));
        }
        if let Some(sensor) = defaults.sensor {
            options.entry("sensor").or_insert(Value::Bool(sensor));
        }

        let missing: Vec<String> = REQUIRED_OPTIONS
            .iter()
            .filter(|name| !(**name == "key" && defaults.key_policy == KeyPolicy::Optional))
            .filter(|name| !options.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            log::debug!("Map options are missing required {missing:?}");
            return Err(StaticMapError::MissingOption(missing));
        }

        let known: Vec<&str> = REQUIRED_OPTIONS.into_iter().chain(OPTIONAL_OPTIONS).collect();
        reject_unknown(options.keys(), &known)?;

        let size = match options.get("size") {
            Some(value) => MapSize::try_from(value)?,
            None => return Err(StaticMapError::MissingOption(vec!["size".to_string()])),
        };
        let sensor = match options.get("sensor").map(|value| bool_value("sensor", value)) {
            Some(Ok(Some(sensor))) => sensor,
            Some(Err(err)) => return Err(err),
            _ => return Err(invalid("sensor", "sensor flag must be set")),
        };

        let mut map = Self::new(size, sensor).with_api_url(defaults.api_url.clone());
        for (name, value) in &options {
            match name.as_str() {
                "key" => map.set_key(string_value(name, value)?),
                "center" => map.set_center(center_value(value)?),
                "zoom" => map.set_zoom(u32_value(name, value)?),
                "format" => map.set_format(
                    string_value(name, value)?
                        .map(|format| format.parse())
                        .transpose()?,
                ),
                "maptype" => map.set_maptype(
                    string_value(name, value)?
                        .map(|map_type| map_type.parse())
                        .transpose()?,
                ),
                "mobile" => map.set_mobile(bool_value(name, value)?),
                "language" => map.set_language(string_value(name, value)?),
                _ => {}
            }
        }

        Ok(map)
    }

    /// Creates an empty map using only the `defaults`.
    pub fn from_defaults(defaults: &MapDefaults) -> Result<Self, StaticMapError> {
        Self::from_options(&Value::Null, defaults)
    }

    /// Base URL of the API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Sets the base URL of the API.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// API key.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Sets the API key. Maps without a key do not have the `key` URL parameter.
    pub fn set_key(&mut self, key: Option<String>) {
        self.key = key;
    }

    /// Sets the API key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Image size.
    pub fn size(&self) -> MapSize {
        self.size
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Sets the image size.
    pub fn set_size(&mut self, size: MapSize) {
        self.size = size;
    }

    /// Updates the image size from a `"WxH"` string, `[w, h]` array or a mapping with `width`
    /// and/or `height`.
    pub fn set_size_value(&mut self, size: &Value) -> Result<(), StaticMapError> {
        self.size.update(size)
    }

    /// Sets the image width, up to [`MAX_WIDTH`].
    pub fn set_width(&mut self, width: u32) -> Result<(), StaticMapError> {
        self.size.set_width(width)
    }

    /// Sets the image height, up to [`MAX_HEIGHT`].
    pub fn set_height(&mut self, height: u32) -> Result<(), StaticMapError> {
        self.size.set_height(height)
    }

    /// Whether the application uses a location sensor.
    pub fn sensor(&self) -> bool {
        self.sensor
    }

    /// Sets the sensor flag.
    pub fn set_sensor(&mut self, sensor: bool) {
        self.sensor = sensor;
    }

    /// Center of the map: an address or a `lat,lng` string.
    pub fn center(&self) -> Option<&str> {
        self.center.as_deref()
    }

    /// Sets the center of the map.
    pub fn set_center(&mut self, center: Option<String>) {
        self.center = center;
    }

    /// Sets the center of the map.
    pub fn with_center(mut self, center: impl Into<String>) -> Self {
        self.center = Some(center.into());
        self
    }

    /// Sets the center of the map to the given point.
    pub fn with_center_point(mut self, center: &impl HasCoordinates) -> Self {
        self.center = Some(GeoPoint::from_coordinates(center).to_url_token());
        self
    }

    /// Zoom level.
    pub fn zoom(&self) -> Option<u32> {
        self.zoom
    }

    /// Sets the zoom level.
    pub fn set_zoom(&mut self, zoom: Option<u32>) {
        self.zoom = zoom;
    }

    /// Sets the zoom level.
    pub fn with_zoom(mut self, zoom: u32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Image format. The API uses PNG if not set.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Sets the image format.
    pub fn set_format(&mut self, format: Option<ImageFormat>) {
        self.format = format;
    }

    /// Sets the image format.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Map type. The API uses road map if not set.
    pub fn maptype(&self) -> Option<MapType> {
        self.maptype
    }

    /// Sets the map type.
    pub fn set_maptype(&mut self, maptype: Option<MapType>) {
        self.maptype = maptype;
    }

    /// Sets the map type.
    pub fn with_maptype(mut self, maptype: MapType) -> Self {
        self.maptype = Some(maptype);
        self
    }

    /// Whether map tiles for small mobile screens are requested.
    pub fn mobile(&self) -> Option<bool> {
        self.mobile
    }

    /// Sets the mobile flag.
    pub fn set_mobile(&mut self, mobile: Option<bool>) {
        self.mobile = mobile;
    }

    /// Sets the mobile flag.
    pub fn with_mobile(mut self, mobile: bool) -> Self {
        self.mobile = Some(mobile);
        self
    }

    /// Language of the map labels.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Sets the language of the map labels.
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    /// Sets the language of the map labels.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Adds a marker or a path to the map, unless an equal one is already there.
    pub fn add(&mut self, entity: impl Into<MapEntity>) -> &mut Self {
        let entity = entity.into();
        if !self.entities.contains(&entity) {
            self.entities.push(entity);
        }

        self
    }

    /// Same as [`MapBuilder::add`].
    pub fn with_entity(mut self, entity: impl Into<MapEntity>) -> Self {
        self.add(entity);
        self
    }

    /// Creates a marker from a mapping with coordinates and style (see
    /// [`Marker::from_options`]) and adds it to the map.
    pub fn marker(&mut self, options: &Value) -> Result<&mut Self, StaticMapError> {
        let marker = Marker::from_options(options)?;
        Ok(self.add(marker))
    }

    /// Creates a path (see [`Path::from_options`]) and adds it to the map.
    pub fn path(&mut self, points: &[Value], options: &Value) -> Result<&mut Self, StaticMapError> {
        let path = Path::from_options(points, options)?;
        Ok(self.add(path))
    }

    /// Iterates over markers and paths in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &MapEntity> {
        self.entities.iter()
    }

    /// Number of markers and paths.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the map has no markers nor paths.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Markers of the map.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.entities.iter().filter_map(|entity| match entity {
            MapEntity::Marker(marker) => Some(marker),
            MapEntity::Path(_) => None,
        })
    }

    /// Paths of the map.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entities.iter().filter_map(|entity| match entity {
            MapEntity::Path(path) => Some(path),
            MapEntity::Marker(_) => None,
        })
    }

    /// Markers grouped by their style key.
    ///
    /// Groups are ordered by the first marker with the given style, markers inside a group keep
    /// the order they were added in.
    pub fn grouped_markers(&self) -> Vec<MarkerGroup<'_>> {
        let mut groups: Vec<MarkerGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for marker in self.markers() {
            let style_key = marker.style_key();
            match index.get(&style_key).copied() {
                Some(position) => groups[position].markers.push(marker),
                None => {
                    index.insert(style_key.clone(), groups.len());
                    groups.push(MarkerGroup {
                        style_key,
                        markers: vec![marker],
                    });
                }
            }
        }

        log::trace!("Grouped {} markers by {} styles", self.markers().count(), groups.len());

        groups
    }

    /// Whether the map has enough data to build a URL: at least one marker or path, or both
    /// center and zoom.
    pub fn can_build(&self) -> bool {
        !self.entities.is_empty() || (self.center.is_some() && self.zoom.is_some())
    }

    /// Builds the URL of the map image.
    ///
    /// Fails with [`StaticMapError::NothingToBuild`] if [`MapBuilder::can_build`] is false and
    /// with [`StaticMapError::InsufficientPoints`] if any of the paths has less than 2 points.
    pub fn build(&self) -> Result<String, StaticMapError> {
        if !self.can_build() {
            return Err(StaticMapError::NothingToBuild);
        }

        let mut params: Vec<String> = self
            .scalar_params()
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| format!("{name}={}", escape(&value))))
            .collect();

        let groups = self.grouped_markers();
        params.extend(groups.iter().map(MarkerGroup::url_param));

        let mut path_count = 0;
        for path in self.paths() {
            params.push(path.serialize()?);
            path_count += 1;
        }

        let url = format!("{}?{}", self.api_url, params.join("&"));
        log::debug!(
            "Built static map URL of {} chars with {} marker groups and {path_count} paths",
            url.len(),
            groups.len()
        );

        Ok(url)
    }

    /// Same as [`MapBuilder::build`].
    pub fn url(&self) -> Result<String, StaticMapError> {
        self.build()
    }

    fn scalar_params(&self) -> [(&'static str, Option<String>); 9] {
        [
            ("key", self.key.clone()),
            ("size", Some(self.size.to_string())),
            ("sensor", Some(self.sensor.to_string())),
            ("center", self.center.clone()),
            ("zoom", self.zoom.map(|zoom| zoom.to_string())),
            ("format", self.format.map(|format| format.to_string())),
            ("maptype", self.maptype.map(|maptype| maptype.to_string())),
            ("mobile", self.mobile.map(|mobile| mobile.to_string())),
            ("language", self.language.clone()),
        ]
    }
}

/// Center is either a text (address or `lat,lng`) or a location mapping.
fn center_value(value: &Value) -> Result<Option<String>, StaticMapError> {
    match value {
        Value::Object(_) => Ok(Some(GeoPoint::try_from(value)?.to_url_token())),
        other => string_value("center", other),
    }
}
