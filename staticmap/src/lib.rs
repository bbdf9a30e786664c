//! Builds URLs of static map images.
//!
//! A [`MapBuilder`] holds the map options (size, center, zoom, image format etc.) together with
//! [`Marker`]s and [`Path`]s, and assembles them into a single query string URL. Markers with
//! identical style are grouped into one `markers` parameter, path points are polyline encoded
//! by default.
//!
//! ```
//! use serde_json::json;
//! use staticmap::{MapBuilder, MapSize, Marker};
//! use staticmap::staticmap_types::GeoPoint;
//!
//! let mut map = MapBuilder::new(MapSize::new(400, 600).unwrap(), false);
//! map.add(Marker::new(GeoPoint::new(2.0, 1.0)));
//! map.marker(&json!({"lat": 6, "lng": 5, "color": "green"})).unwrap();
//!
//! let url = map.build().unwrap();
//! assert!(url.contains("markers=color:red|size:mid|2,1"));
//! assert!(url.contains("markers=color:green|size:mid|6,5"));
//! ```

pub use staticmap_types;

mod config;
pub use config::{KeyPolicy, MapDefaults, API_URL};

pub mod error;
pub use error::StaticMapError;

mod encoding;
mod options;

mod map;
pub use map::*;

mod marker;
pub use marker::{Marker, MARKER_OPTIONS};

mod path;
pub use path::{Path, PATH_OPTIONS};
