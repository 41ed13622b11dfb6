/// A closed ring of `[lng, lat]` positions; first equals last
pub type Ring = Vec<[f64; 2]>;

/// A polygon built from generated rings
#[derive(Debug, Clone, PartialEq)]
pub struct RingPolygon {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl RingPolygon {
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }

    /// Rings in GeoJSON order: outer boundary first, then holes
    pub fn rings(&self) -> Vec<Ring> {
        let mut rings = Vec::with_capacity(1 + self.holes.len());
        rings.push(self.outer.clone());
        rings.extend(self.holes.iter().cloned());
        rings
    }

    pub fn is_valid(&self) -> bool {
        self.outer.len() >= 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rings_outer_first() {
        let outer = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let hole = vec![[0.2, 0.2], [0.4, 0.4], [0.4, 0.2], [0.2, 0.2]];
        let polygon = RingPolygon::with_holes(outer.clone(), vec![hole.clone()]);

        assert_eq!(polygon.rings(), vec![outer, hole]);
        assert!(polygon.is_valid());
    }

    #[test]
    fn test_short_ring_is_invalid() {
        let polygon = RingPolygon::new(vec![[0.0, 0.0], [0.0, 0.0]]);
        assert!(!polygon.is_valid());
    }
}
