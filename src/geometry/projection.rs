use std::f64::consts::PI;

use super::ring::EARTH_RADIUS_M;
use crate::domain::Center;

/// Local tangent-plane projection around a center point
///
/// The exact inverse of the ring generator's degree conversion:
/// - x = (lng - center_lng) * R * cos(center_lat) * pi/180
/// - y = (lat - center_lat) * R * pi/180
///
/// Projecting a generated ring gives back the planar circle it was
/// sampled from.
#[derive(Debug, Clone)]
pub struct Projector {
    center: Center,
    cos_lat: f64,
}

impl Projector {
    pub fn new(center: Center) -> Self {
        Self {
            center,
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    /// Project a lat/lng point to local meters
    ///
    /// # Returns
    /// * (x, y) in meters, east and north of the center
    pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
        let x = (lng - self.center.lng) * (PI / 180.0) * EARTH_RADIUS_M * self.cos_lat;
        let y = (lat - self.center.lat) * (PI / 180.0) * EARTH_RADIUS_M;
        (x, y)
    }

    /// Planar distance of a `[lng, lat]` position from the center, in meters
    pub fn distance(&self, position: [f64; 2]) -> f64 {
        let (x, y) = self.project(position[1], position[0]);
        x.hypot(y)
    }

    /// Largest deviation of any ring position from the expected radius
    pub fn max_radial_error(&self, ring: &[[f64; 2]], radius_m: f64) -> f64 {
        ring.iter()
            .map(|&p| (self.distance(p) - radius_m.abs()).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ring::generate_ring;

    #[test]
    fn test_projector_center() {
        let proj = Projector::new(Center::new(37.7749, -122.4194));
        let (x, y) = proj.project(37.7749, -122.4194);
        assert!(x.abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn test_projector_1km_north() {
        let proj = Projector::new(Center::new(37.7749, -122.4194));

        // 1 degree latitude ≈ 111.19 km on a 6371 km sphere
        let (_, y) = proj.project(37.7749 + 0.009, -122.4194);
        assert!((y - 1000.0).abs() < 10.0);
    }

    #[test]
    fn test_generated_points_sit_on_radius() {
        let center = Center::new(51.5074, -0.1278);
        let proj = Projector::new(center);

        for &(radius, points) in &[(50.0, 10), (40.0, 9), (30.0, 8), (100.0, 64), (1.0, 3)] {
            let ring = generate_ring(center.lat, center.lng, radius, points).unwrap();
            for &p in &ring {
                assert!((proj.distance(p) - radius).abs() < 1e-6);
            }
            assert!(proj.max_radial_error(&ring, radius) < 1e-6);
        }
    }
}
