//! georings - Generate synthetic GeoJSON ring fixtures around a point

pub mod config;
pub mod domain;
pub mod geojson;
pub mod geometry;
pub mod layers;
