use geo::{LineString, Polygon, SimplifyVwPreserve};
use thiserror::Error;

use crate::geojson::{Feature, FeatureCollection, GeoJson, Geometry, Position};

#[derive(Debug, Error, PartialEq)]
pub enum SimplifyError {
    #[error("tolerance must be a finite positive number, got {0}")]
    InvalidTolerance(f64),
}

fn to_line_string(points: &[Position]) -> LineString<f64> {
    points
        .iter()
        .map(|&[x, y]| geo::coord! { x: x, y: y })
        .collect()
}

fn from_line_string(line: &LineString<f64>) -> Vec<Position> {
    line.0.iter().map(|c| [c.x, c.y]).collect()
}

/// Visvalingam-Whyatt simplification of an open line
///
/// Vertices are dropped smallest-triangle-first while the triangle they
/// form with their neighbours is below `area`, in square degrees. Removals
/// that would make the line cross itself are skipped.
pub fn simplify_polyline(points: &[Position], area: f64) -> Vec<Position> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let simplified = to_line_string(points).simplify_vw_preserve(&area);

    from_line_string(&simplified)
}

/// Simplify the rings of one polygon, outer boundary first
///
/// Rings are simplified together so a hole never crosses its boundary.
/// A ring that would drop below four positions is kept as it was.
pub fn simplify_polygon(rings: &[Vec<Position>], area: f64) -> Vec<Vec<Position>> {
    let Some((outer, holes)) = rings.split_first() else {
        return Vec::new();
    };
    if rings.iter().any(|r| r.len() < 4) {
        return rings.to_vec();
    }

    let polygon = Polygon::new(
        to_line_string(outer),
        holes.iter().map(|h| to_line_string(h)).collect(),
    );
    let simplified = polygon.simplify_vw_preserve(&area);

    let mut result = Vec::with_capacity(rings.len());
    result.push(from_line_string(simplified.exterior()));
    result.extend(simplified.interiors().iter().map(from_line_string));

    if result.len() != rings.len() {
        return rings.to_vec();
    }

    result
        .into_iter()
        .zip(rings)
        .map(|(new, old)| if new.len() < 4 { old.clone() } else { new })
        .collect()
}

/// Simplify every linear geometry in a GeoJSON document
///
/// `tolerance` is a triangle area in square degrees. Points and MultiPoints
/// come back unchanged. The input is never mutated.
pub fn simplify(value: &GeoJson, tolerance: f64) -> Result<GeoJson, SimplifyError> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(SimplifyError::InvalidTolerance(tolerance));
    }
    if !value.kind().is_linear() {
        return Ok(value.clone());
    }

    let simplified = match value {
        GeoJson::Geometry(g) => GeoJson::Geometry(simplify_geometry(g, tolerance)),
        GeoJson::Feature(f) => GeoJson::Feature(simplify_feature(f, tolerance)),
        GeoJson::FeatureCollection(fc) => GeoJson::FeatureCollection(FeatureCollection {
            features: fc
                .features
                .iter()
                .map(|f| simplify_feature(f, tolerance))
                .collect(),
        }),
    };
    Ok(simplified)
}

fn simplify_feature(feature: &Feature, epsilon: f64) -> Feature {
    Feature {
        geometry: feature
            .geometry
            .as_ref()
            .map(|g| simplify_geometry(g, epsilon)),
        ..feature.clone()
    }
}

fn simplify_geometry(geometry: &Geometry, epsilon: f64) -> Geometry {
    match geometry {
        Geometry::Point { .. } | Geometry::MultiPoint { .. } => geometry.clone(),
        Geometry::LineString { coordinates } => Geometry::LineString {
            coordinates: simplify_polyline(coordinates, epsilon),
        },
        Geometry::MultiLineString { coordinates } => Geometry::MultiLineString {
            coordinates: coordinates
                .iter()
                .map(|line| simplify_polyline(line, epsilon))
                .collect(),
        },
        Geometry::Polygon { coordinates } => Geometry::Polygon {
            coordinates: simplify_polygon(coordinates, epsilon),
        },
        Geometry::MultiPolygon { coordinates } => Geometry::MultiPolygon {
            coordinates: coordinates
                .iter()
                .map(|polygon| simplify_polygon(polygon, epsilon))
                .collect(),
        },
        Geometry::GeometryCollection { geometries } => Geometry::GeometryCollection {
            geometries: geometries
                .iter()
                .map(|g| simplify_geometry(g, epsilon))
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ring::generate_ring;

    fn zigzag() -> Vec<Position> {
        (0..100)
            .map(|i| {
                let x = i as f64;
                let y = if i % 2 == 0 { 0.0 } else { 0.0001 };
                [x, y]
            })
            .collect()
    }

    #[test]
    fn test_simplify_polyline_short() {
        let points = vec![[0.0, 0.0], [1.0, 1.0]];
        let result = simplify_polyline(&points, 1.0);
        assert_eq!(result, points);
    }

    #[test]
    fn test_small_triangle_removed_large_kept() {
        // (1, 0.001) spans 0.001 square degrees, (3, 5) spans 5
        let points = vec![
            [0.0, 0.0],
            [1.0, 0.001],
            [2.0, 0.0],
            [3.0, 5.0],
            [4.0, 0.0],
        ];
        let result = simplify_polyline(&points, 0.01);
        assert_eq!(
            result,
            vec![[0.0, 0.0], [2.0, 0.0], [3.0, 5.0], [4.0, 0.0]]
        );
    }

    #[test]
    fn test_tolerance_is_an_area() {
        let points = vec![[0.0, 0.0], [1.0, 0.001], [2.0, 0.0]];
        // Offset of 0.001 degrees survives an area of 0.0005 square degrees
        assert_eq!(simplify_polyline(&points, 0.0005), points);
        assert_eq!(
            simplify_polyline(&points, 0.002),
            vec![[0.0, 0.0], [2.0, 0.0]]
        );
    }

    #[test]
    fn test_simplify_polyline_reduces_points() {
        let points = zigzag();
        let result = simplify_polyline(&points, 0.001);
        assert!(result.len() < points.len());
        assert_eq!(result.first(), points.first());
        assert_eq!(result.last(), points.last());
    }

    #[test]
    fn test_simplify_polygon_preserves_minimum() {
        let ring = generate_ring(51.5074, -0.1278, 50.0, 10).unwrap();
        let result = simplify_polygon(&[ring.clone()], 1.0);
        assert_eq!(result.len(), 1);
        assert!(result[0].len() >= 4);
        assert_eq!(result[0].first(), result[0].last());
    }

    #[test]
    fn test_simplify_polygon_keeps_closure() {
        let ring = generate_ring(0.0, 0.0, 1000.0, 360).unwrap();
        let result = simplify_polygon(&[ring.clone()], 1e-8);
        assert!(result[0].len() >= 4);
        assert!(result[0].len() < ring.len());
        assert_eq!(result[0].first(), result[0].last());
    }

    #[test]
    fn test_simplify_polygon_keeps_hole() {
        let outer = generate_ring(0.0, 0.0, 1000.0, 120).unwrap();
        let mut hole = generate_ring(0.0, 0.0, 500.0, 60).unwrap();
        hole.reverse();

        let result = simplify_polygon(&[outer, hole], 1e-8);
        assert_eq!(result.len(), 2);
        assert!(result[1].len() >= 4);
    }

    #[test]
    fn test_invalid_tolerance() {
        let value = GeoJson::Geometry(Geometry::LineString {
            coordinates: zigzag(),
        });
        for tolerance in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(simplify(&value, tolerance).is_err());
        }
    }

    #[test]
    fn test_points_untouched() {
        let value = GeoJson::Geometry(Geometry::MultiPoint {
            coordinates: zigzag(),
        });
        assert_eq!(simplify(&value, 10.0).unwrap(), value);
    }

    #[test]
    fn test_feature_collection_recurses() {
        let line = Feature::new(Geometry::LineString {
            coordinates: zigzag(),
        });
        let empty = Feature {
            id: Some(serde_json::json!("empty")),
            geometry: None,
            properties: None,
        };
        let value = GeoJson::FeatureCollection(FeatureCollection {
            features: vec![line, empty.clone()],
        });

        let GeoJson::FeatureCollection(fc) = simplify(&value, 0.001).unwrap() else {
            panic!("expected a feature collection");
        };

        let Some(Geometry::LineString { coordinates }) = &fc.features[0].geometry else {
            panic!("expected a line string");
        };
        assert!(coordinates.len() < 100);
        assert_eq!(fc.features[1], empty);
    }
}
