use serde::{Deserialize, Serialize};

use crate::error::StaticMapError;
use crate::map::MapSize;

/// Static maps API endpoint.
pub const API_URL: &str = "http://maps.google.com/maps/api/staticmap";

/// Whether the `key` option must be present when a map is created from options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// `key` must be given (possibly as `null`) or come from the defaults.
    #[default]
    Required,
    /// `key` may be omitted, for deployments that do not use API keys.
    Optional,
}

/// Values used by [`MapBuilder::from_options`](crate::MapBuilder::from_options) for the
/// required options that are not given explicitly.
///
/// ```
/// use staticmap::{KeyPolicy, MapDefaults};
///
/// let defaults = MapDefaults::from_json(r#"{"size": "300x500", "sensor": false}"#).unwrap();
/// assert_eq!(defaults.size.unwrap().to_string(), "300x500");
/// assert_eq!(defaults.key_policy, KeyPolicy::Required);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapDefaults {
    /// Base URL of the API.
    pub api_url: String,
    /// Default API key.
    pub key: Option<String>,
    /// Default image size.
    pub size: Option<MapSize>,
    /// Default sensor flag.
    pub sensor: Option<bool>,
    /// Whether the key is required.
    pub key_policy: KeyPolicy,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            api_url: API_URL.to_string(),
            key: None,
            size: None,
            sensor: None,
            key_policy: KeyPolicy::default(),
        }
    }
}

impl MapDefaults {
    /// Reads defaults from a JSON document. Missing fields get their default values.
    pub fn from_json(json: &str) -> Result<Self, StaticMapError> {
        serde_json::from_str(json)
            .map_err(|err| StaticMapError::InvalidArgument(format!("invalid map defaults: {err}")))
    }

    /// Sets the default key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the default size.
    pub fn with_size(mut self, size: MapSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the default sensor flag.
    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Sets the key policy.
    pub fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    /// Sets the API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_document() {
        assert_eq!(MapDefaults::from_json("{}").unwrap(), MapDefaults::default());
    }

    #[test]
    fn full_document() {
        let defaults = MapDefaults::from_json(
            r#"{
                "api_url": "https://maps.example.com/staticmap",
                "key": "MY_KEY",
                "size": [640, 480],
                "sensor": true,
                "key_policy": "optional"
            }"#,
        )
        .unwrap();

        assert_eq!(
            defaults,
            MapDefaults::default()
                .with_api_url("https://maps.example.com/staticmap")
                .with_key("MY_KEY")
                .with_size(MapSize::new(640, 480).unwrap())
                .with_sensor(true)
                .with_key_policy(KeyPolicy::Optional)
        );
    }

    #[test]
    fn invalid_document() {
        assert_matches!(
            MapDefaults::from_json(r#"{"size": "1000x10"}"#),
            Err(StaticMapError::InvalidArgument(_))
        );
        assert_matches!(
            MapDefaults::from_json(r#"{"key_policy": "sometimes"}"#),
            Err(StaticMapError::InvalidArgument(_))
        );
    }
}
