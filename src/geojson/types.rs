use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A `[lng, lat]` position in WGS84 degrees
pub type Position = [f64; 2];

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("expected a GeoJSON object, but received {0}")]
    NotAnObject(&'static str),
    #[error("GeoJSON object is missing a 'type' member")]
    MissingType,
    #[error("unknown GeoJSON type '{0}'")]
    UnknownType(String),
    #[error("malformed {kind}: {source}")]
    Malformed {
        kind: GeoJsonKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The nine GeoJSON object types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoJsonKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Feature,
    FeatureCollection,
}

impl GeoJsonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoJsonKind::Point => "Point",
            GeoJsonKind::MultiPoint => "MultiPoint",
            GeoJsonKind::LineString => "LineString",
            GeoJsonKind::MultiLineString => "MultiLineString",
            GeoJsonKind::Polygon => "Polygon",
            GeoJsonKind::MultiPolygon => "MultiPolygon",
            GeoJsonKind::GeometryCollection => "GeometryCollection",
            GeoJsonKind::Feature => "Feature",
            GeoJsonKind::FeatureCollection => "FeatureCollection",
        }
    }

    pub fn from_type_name(name: &str) -> Option<GeoJsonKind> {
        match name {
            "Point" => Some(GeoJsonKind::Point),
            "MultiPoint" => Some(GeoJsonKind::MultiPoint),
            "LineString" => Some(GeoJsonKind::LineString),
            "MultiLineString" => Some(GeoJsonKind::MultiLineString),
            "Polygon" => Some(GeoJsonKind::Polygon),
            "MultiPolygon" => Some(GeoJsonKind::MultiPolygon),
            "GeometryCollection" => Some(GeoJsonKind::GeometryCollection),
            "Feature" => Some(GeoJsonKind::Feature),
            "FeatureCollection" => Some(GeoJsonKind::FeatureCollection),
            _ => None,
        }
    }

    /// Classify a raw JSON value by its `type` member
    pub fn of(value: &Value) -> Result<GeoJsonKind, GeoJsonError> {
        let object = match value {
            Value::Object(o) => o,
            Value::Null => return Err(GeoJsonError::NotAnObject("null")),
            Value::Bool(_) => return Err(GeoJsonError::NotAnObject("a boolean")),
            Value::Number(_) => return Err(GeoJsonError::NotAnObject("a number")),
            Value::String(_) => return Err(GeoJsonError::NotAnObject("a string")),
            Value::Array(_) => return Err(GeoJsonError::NotAnObject("an array")),
        };

        let name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(GeoJsonError::MissingType)?;

        GeoJsonKind::from_type_name(name).ok_or_else(|| GeoJsonError::UnknownType(name.to_string()))
    }

    /// Point and MultiPoint carry no vertices that could be dropped
    pub fn is_linear(&self) -> bool {
        !matches!(self, GeoJsonKind::Point | GeoJsonKind::MultiPoint)
    }
}

impl fmt::Display for GeoJsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    pub fn kind(&self) -> GeoJsonKind {
        match self {
            Geometry::Point { .. } => GeoJsonKind::Point,
            Geometry::MultiPoint { .. } => GeoJsonKind::MultiPoint,
            Geometry::LineString { .. } => GeoJsonKind::LineString,
            Geometry::MultiLineString { .. } => GeoJsonKind::MultiLineString,
            Geometry::Polygon { .. } => GeoJsonKind::Polygon,
            Geometry::MultiPolygon { .. } => GeoJsonKind::MultiPolygon,
            Geometry::GeometryCollection { .. } => GeoJsonKind::GeometryCollection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Any top-level GeoJSON document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl GeoJson {
    pub fn kind(&self) -> GeoJsonKind {
        match self {
            GeoJson::Geometry(g) => g.kind(),
            GeoJson::Feature(_) => GeoJsonKind::Feature,
            GeoJson::FeatureCollection(_) => GeoJsonKind::FeatureCollection,
        }
    }

    /// Convert a parsed JSON value, dispatching on its `type` member
    pub fn from_value(value: Value) -> Result<GeoJson, GeoJsonError> {
        let kind = GeoJsonKind::of(&value)?;
        let malformed = |source: serde_json::Error| GeoJsonError::Malformed { kind, source };

        match kind {
            GeoJsonKind::Feature => serde_json::from_value(value)
                .map(GeoJson::Feature)
                .map_err(malformed),
            GeoJsonKind::FeatureCollection => serde_json::from_value(value)
                .map(GeoJson::FeatureCollection)
                .map_err(malformed),
            _ => serde_json::from_value(value)
                .map(GeoJson::Geometry)
                .map_err(malformed),
        }
    }
}

impl FromStr for GeoJson {
    type Err = GeoJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        GeoJson::from_value(value)
    }
}
