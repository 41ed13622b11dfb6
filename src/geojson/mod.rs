pub mod types;
pub mod writer;

pub use types::{
    Feature, FeatureCollection, GeoJson, GeoJsonError, GeoJsonKind, Geometry, Position,
};
pub use writer::{read_geojson, to_json_string, write_geojson};
