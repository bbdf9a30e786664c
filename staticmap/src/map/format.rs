use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StaticMapError;

/// Image format of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum ImageFormat {
    /// 8-bit PNG, same as [`ImageFormat::Png8`].
    Png,
    /// 8-bit PNG.
    Png8,
    /// 32-bit PNG.
    Png32,
    /// GIF.
    Gif,
    /// Compressed JPEG.
    Jpg,
    /// Non-progressive JPEG.
    JpgBaseline,
}

impl ImageFormat {
    /// All supported formats.
    pub const ALL: [ImageFormat; 6] = [
        Self::Png,
        Self::Png8,
        Self::Png32,
        Self::Gif,
        Self::Jpg,
        Self::JpgBaseline,
    ];

    /// Value of the `format` URL parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Png8 => "png8",
            Self::Png32 => "png32",
            Self::Gif => "gif",
            Self::Jpg => "jpg",
            Self::JpgBaseline => "jpg-basedline",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = StaticMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| StaticMapError::UnsupportedFormat(s.to_string()))
    }
}

/// Type of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum MapType {
    /// Standard road map.
    Roadmap,
    /// Satellite imagery.
    Satellite,
    /// Physical relief.
    Terrain,
    /// Satellite imagery with roads and labels.
    Hybrid,
}

impl MapType {
    /// All supported map types.
    pub const ALL: [MapType; 4] = [Self::Roadmap, Self::Satellite, Self::Terrain, Self::Hybrid];

    /// Value of the `maptype` URL parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roadmap => "roadmap",
            Self::Satellite => "satellite",
            Self::Terrain => "terrain",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for MapType {
    type Err = StaticMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|map_type| map_type.as_str() == s)
            .ok_or_else(|| StaticMapError::UnsupportedMapType(s.to_string()))
    }
}

macro_rules! string_conversions {
    ($type:ty) => {
        impl Display for $type {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $type {
            type Error = StaticMapError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$type> for String {
            fn from(value: $type) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

string_conversions!(ImageFormat);
string_conversions!(MapType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_formats() {
        for name in ["png", "png8", "png32", "gif", "jpg", "jpg-basedline"] {
            let format: ImageFormat = name.parse().unwrap();
            assert_eq!(format.to_string(), name);
        }

        assert_eq!(
            "not_supported".parse::<ImageFormat>(),
            Err(StaticMapError::UnsupportedFormat("not_supported".to_string()))
        );
    }

    #[test]
    fn parse_map_types() {
        for name in ["roadmap", "satellite", "terrain", "hybrid"] {
            let map_type: MapType = name.parse().unwrap();
            assert_eq!(map_type.to_string(), name);
        }

        assert_eq!(
            "not_supported".parse::<MapType>(),
            Err(StaticMapError::UnsupportedMapType("not_supported".to_string()))
        );
    }

    #[test]
    fn serde_names() {
        let format: ImageFormat = serde_json::from_str("\"jpg\"").unwrap();
        assert_eq!(format, ImageFormat::Jpg);
        assert!(serde_json::from_str::<MapType>("\"street\"").is_err());
    }
}
