use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StaticMapError;
use crate::options::{invalid, u32_value};

/// Maximum image width supported by the API.
pub const MAX_WIDTH: u32 = 640;
/// Maximum image height supported by the API.
pub const MAX_HEIGHT: u32 = 640;

/// Size of the map image in pixels.
///
/// Can be read from a `"WxH"` string, a `[width, height]` array or a
/// `{"width": w, "height": h}` mapping. Displayed as `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "Value", into = "String")]
pub struct MapSize {
    width: u32,
    height: u32,
}

impl MapSize {
    /// Creates a new size, checking the API limits.
    pub fn new(width: u32, height: u32) -> Result<Self, StaticMapError> {
        Ok(Self {
            width: check_width(width)?,
            height: check_height(height)?,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sets the width, checking it against [`MAX_WIDTH`].
    pub fn set_width(&mut self, width: u32) -> Result<(), StaticMapError> {
        self.width = check_width(width)?;
        Ok(())
    }

    /// Sets the height, checking it against [`MAX_HEIGHT`].
    pub fn set_height(&mut self, height: u32) -> Result<(), StaticMapError> {
        self.height = check_height(height)?;
        Ok(())
    }

    /// Applies a size value to this size.
    ///
    /// Unlike parsing a new size, a mapping may contain only one of `width` and `height`, the
    /// other dimension is then kept.
    pub fn update(&mut self, value: &Value) -> Result<(), StaticMapError> {
        let (width, height) = dimensions(value)?;
        let mut updated = *self;
        if let Some(width) = width {
            updated.set_width(width)?;
        }
        if let Some(height) = height {
            updated.set_height(height)?;
        }

        *self = updated;
        Ok(())
    }
}

fn check_width(width: u32) -> Result<u32, StaticMapError> {
    check_dimension("width", width, MAX_WIDTH)
}

fn check_height(height: u32) -> Result<u32, StaticMapError> {
    check_dimension("height", height, MAX_HEIGHT)
}

fn check_dimension(dimension: &'static str, value: u32, max: u32) -> Result<u32, StaticMapError> {
    if value > max {
        log::debug!("Rejecting map {dimension} {value}");
        return Err(StaticMapError::DimensionTooLarge {
            dimension,
            value,
            max,
        });
    }

    Ok(value)
}

fn dimensions(value: &Value) -> Result<(Option<u32>, Option<u32>), StaticMapError> {
    match value {
        Value::String(text) => {
            let (width, height) = text
                .split_once('x')
                .ok_or_else(|| invalid("size", format!("expected `WxH`, got `{text}`")))?;
            let width = u32_value("size", &Value::String(width.to_string()))?;
            let height = u32_value("size", &Value::String(height.to_string()))?;
            Ok((width, height))
        }
        Value::Array(items) => match items.as_slice() {
            [width, height] => Ok((u32_value("size", width)?, u32_value("size", height)?)),
            _ => Err(invalid(
                "size",
                format!("expected [width, height], got {} items", items.len()),
            )),
        },
        Value::Object(mapping) => {
            let dimension = |name: &str| match mapping.get(name) {
                Some(value) => u32_value("size", value),
                None => Ok(None),
            };
            Ok((dimension("width")?, dimension("height")?))
        }
        other => Err(invalid("size", format!("unsupported size value `{other}`"))),
    }
}

impl TryFrom<&Value> for MapSize {
    type Error = StaticMapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match dimensions(value)? {
            (Some(width), Some(height)) => Self::new(width, height),
            _ => Err(invalid("size", "both width and height must be given")),
        }
    }
}

impl TryFrom<Value> for MapSize {
    type Error = StaticMapError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl From<MapSize> for String {
    fn from(value: MapSize) -> Self {
        value.to_string()
    }
}

impl Display for MapSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn parse_forms() {
        let expected = MapSize::new(200, 300).unwrap();
        assert_eq!(MapSize::try_from(&json!("200x300")).unwrap(), expected);
        assert_eq!(MapSize::try_from(&json!([200, 300])).unwrap(), expected);
        assert_eq!(
            MapSize::try_from(&json!({"width": 200, "height": 300})).unwrap(),
            expected
        );
        assert_eq!(expected.to_string(), "200x300");
    }

    #[test]
    fn dimension_limits() {
        assert!(MapSize::new(640, 640).is_ok());
        assert_eq!(
            MapSize::new(641, 100),
            Err(StaticMapError::DimensionTooLarge {
                dimension: "width",
                value: 641,
                max: 640
            })
        );
        assert_matches!(
            MapSize::try_from(&json!("100x641")),
            Err(StaticMapError::DimensionTooLarge {
                dimension: "height",
                ..
            })
        );
    }

    #[test]
    fn partial_update() {
        let mut size = MapSize::new(300, 400).unwrap();
        size.update(&json!({"height": 500})).unwrap();
        assert_eq!(size.to_string(), "300x500");
        size.update(&json!({"width": 500})).unwrap();
        assert_eq!(size.to_string(), "500x500");

        assert_matches!(
            size.update(&json!({"width": 100, "height": 700})),
            Err(StaticMapError::DimensionTooLarge { .. })
        );
        assert_eq!(size.to_string(), "500x500");
    }

    #[test]
    fn malformed_sizes() {
        assert_matches!(
            MapSize::try_from(&json!("200")),
            Err(StaticMapError::InvalidOptionValue { .. })
        );
        assert_matches!(
            MapSize::try_from(&json!([200])),
            Err(StaticMapError::InvalidOptionValue { .. })
        );
        assert_matches!(
            MapSize::try_from(&json!({"width": 200})),
            Err(StaticMapError::InvalidOptionValue { .. })
        );
    }

    #[test]
    fn serde_as_string() {
        let size: MapSize = serde_json::from_value(json!("640x480")).unwrap();
        assert_eq!(serde_json::to_value(size).unwrap(), json!("640x480"));
    }
}
