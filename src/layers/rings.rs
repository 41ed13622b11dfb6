use clap::ValueEnum;
use serde::Deserialize;

use crate::domain::{Center, RingPolygon, RingSpec};
use crate::geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use crate::geometry::ring::{RingError, reversed};

/// Shape of the emitted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// One Polygon feature per ring
    #[default]
    FeatureCollection,
    /// A single MultiPolygon geometry
    MultiPolygon,
}

/// Configuration for concentric ring generation
#[derive(Debug, Clone)]
pub struct RingsConfig {
    pub center: Center,
    /// Rings from outermost to innermost
    pub rings: Vec<RingSpec>,
    /// Punch the next ring's shape out of each polygon
    pub holes: bool,
    pub mode: OutputMode,
}

impl Default for RingsConfig {
    fn default() -> Self {
        Self {
            center: Center::default(),
            rings: RingSpec::defaults(),
            holes: true,
            mode: OutputMode::default(),
        }
    }
}

impl RingsConfig {
    pub fn with_center(mut self, center: Center) -> Self {
        self.center = center;
        self
    }

    pub fn with_rings(mut self, rings: Vec<RingSpec>) -> Self {
        self.rings = rings;
        self
    }

    pub fn with_holes(mut self, holes: bool) -> Self {
        self.holes = holes;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Build one polygon per ring spec
///
/// Polygon `i` is bounded by ring `i`. With `with_holes`, ring `i + 1` is
/// generated again, reversed, and used as its hole, so each polygon is a band
/// between two consecutive radii. The last polygon is always solid.
pub fn assemble_polygons(
    center: Center,
    specs: &[RingSpec],
    with_holes: bool,
) -> Result<Vec<RingPolygon>, RingError> {
    let mut polygons = Vec::with_capacity(specs.len());

    for (i, spec) in specs.iter().enumerate() {
        let outer = center.ring(spec.radius, spec.points)?;

        let polygon = match specs.get(i + 1) {
            Some(inner) if with_holes => {
                let hole = center.ring(inner.radius, inner.points)?;
                RingPolygon::with_holes(outer, vec![reversed(&hole)])
            }
            _ => RingPolygon::new(outer),
        };

        polygons.push(polygon);
    }

    Ok(polygons)
}

pub fn to_feature_collection(polygons: &[RingPolygon]) -> GeoJson {
    let features = polygons
        .iter()
        .map(|p| {
            Feature::new(Geometry::Polygon {
                coordinates: p.rings(),
            })
        })
        .collect();

    GeoJson::FeatureCollection(FeatureCollection { features })
}

pub fn to_multi_polygon(polygons: &[RingPolygon]) -> GeoJson {
    GeoJson::Geometry(Geometry::MultiPolygon {
        coordinates: polygons.iter().map(RingPolygon::rings).collect(),
    })
}

/// Generate the full fixture document described by `config`
pub fn generate_rings(config: &RingsConfig) -> Result<GeoJson, RingError> {
    let polygons = assemble_polygons(config.center, &config.rings, config.holes)?;

    for (spec, polygon) in config.rings.iter().zip(&polygons) {
        log::debug!(
            "ring {}: {} positions, {} hole(s)",
            spec,
            polygon.outer.len(),
            polygon.holes.len()
        );
    }

    Ok(match config.mode {
        OutputMode::FeatureCollection => to_feature_collection(&polygons),
        OutputMode::MultiPolygon => to_multi_polygon(&polygons),
    })
}
