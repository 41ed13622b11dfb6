use std::f64::consts::PI;
use thiserror::Error;

use crate::domain::Ring;

/// Mean Earth radius in meters used by the flat-earth conversion
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum RingError {
    #[error("a ring needs at least one point")]
    NoPoints,
    #[error("center latitude {0} is a pole; longitude scaling is undefined")]
    PolarLatitude(f64),
}

/// Generate a closed ring approximating a circle around a center point
///
/// Points are sampled at uniform angles starting due east and turning
/// counterclockwise. Meter offsets are converted to degrees with a
/// flat-earth approximation:
/// - dlat = dy / R * 180/pi
/// - dlng = dx / (R * cos(center_lat)) * 180/pi
///
/// This is only accurate for radii that are small relative to the Earth.
/// The output values are used as golden fixtures, so the conversion must
/// stay exactly this one.
///
/// # Arguments
/// * `center_lat`, `center_lng` - Center in decimal degrees
/// * `radius_meters` - Circle radius in meters (not validated)
/// * `num_points` - Distinct points before closure
///
/// # Returns
/// * `num_points + 1` positions as `[lng, lat]`, the last a copy of the first
pub fn generate_ring(
    center_lat: f64,
    center_lng: f64,
    radius_meters: f64,
    num_points: usize,
) -> Result<Ring, RingError> {
    if num_points == 0 {
        return Err(RingError::NoPoints);
    }
    if center_lat.abs() == 90.0 {
        return Err(RingError::PolarLatitude(center_lat));
    }

    let lng_scale = EARTH_RADIUS_M * center_lat.to_radians().cos();

    let mut coords: Ring = (0..num_points)
        .map(|i| {
            let angle = (i as f64 / num_points as f64) * 2.0 * PI;
            let dx = radius_meters * angle.cos();
            let dy = radius_meters * angle.sin();

            let lat = center_lat + (dy / EARTH_RADIUS_M) * (180.0 / PI);
            let lng = center_lng + (dx / lng_scale) * (180.0 / PI);
            [lng, lat]
        })
        .collect();

    coords.push(coords[0]);
    Ok(coords)
}

/// Reverse the winding of a ring; closure is preserved
pub fn reversed(ring: &[[f64; 2]]) -> Ring {
    ring.iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: (f64, f64) = (51.5074, -0.1278);

    #[test]
    fn test_ring_length_and_closure() {
        for points in 1..=32 {
            let ring = generate_ring(LONDON.0, LONDON.1, 50.0, points).unwrap();
            assert_eq!(ring.len(), points + 1);
            assert_eq!(ring.first(), ring.last());
        }
    }

    #[test]
    fn test_first_point_is_due_east() {
        let ring = generate_ring(LONDON.0, LONDON.1, 50.0, 10).unwrap();
        assert_eq!(ring.len(), 11);

        let [lng, lat] = ring[0];
        assert_eq!(lat, 51.5074);
        assert!(lng > -0.1278);

        let expected_dlng =
            (50.0 / (EARTH_RADIUS_M * LONDON.0.to_radians().cos())) * (180.0 / PI);
        assert!((lng - (-0.1278 + expected_dlng)).abs() < 1e-12);
        assert_eq!(ring[10], ring[0]);
    }

    #[test]
    fn test_counterclockwise_order() {
        // Second of four points sits due north
        let ring = generate_ring(0.0, 0.0, 100.0, 4).unwrap();
        let [lng, lat] = ring[1];
        assert!(lng.abs() < 1e-12);
        assert!(lat > 0.0);
    }

    #[test]
    fn test_quarter_circumference_radius() {
        let radius = EARTH_RADIUS_M * PI / 2.0;
        let ring = generate_ring(0.0, 0.0, radius, 4).unwrap();

        assert!((ring[0][0] - 90.0).abs() < 1e-9);
        assert!(ring[0][1].abs() < 1e-9);
        assert!(ring[1][0].abs() < 1e-9);
        assert!((ring[1][1] - 90.0).abs() < 1e-9);
        assert!((ring[2][0] + 90.0).abs() < 1e-9);
        assert!((ring[3][1] + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_points_rejected() {
        assert_eq!(
            generate_ring(LONDON.0, LONDON.1, 50.0, 0),
            Err(RingError::NoPoints)
        );
    }

    #[test]
    fn test_polar_center_rejected() {
        assert_eq!(
            generate_ring(90.0, 0.0, 50.0, 8),
            Err(RingError::PolarLatitude(90.0))
        );
        assert_eq!(
            generate_ring(-90.0, 10.0, 50.0, 8),
            Err(RingError::PolarLatitude(-90.0))
        );
    }

    #[test]
    fn test_negative_radius_is_accepted() {
        // Mirrored through the center rather than rejected
        let ring = generate_ring(LONDON.0, LONDON.1, -50.0, 4).unwrap();
        assert!(ring[0][0] < LONDON.1);
    }

    #[test]
    fn test_reversed_ring() {
        let ring = generate_ring(LONDON.0, LONDON.1, 40.0, 9).unwrap();
        let rev = reversed(&ring);

        assert_eq!(rev.len(), ring.len());
        assert_eq!(rev.first(), rev.last());

        let mut expected = ring.clone();
        expected.reverse();
        assert_eq!(rev, expected);
    }
}
