use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::geometry::ring::{RingError, generate_ring};

use super::Ring;

/// Central London, the point the stock fixtures are generated around
pub const DEFAULT_CENTER: Center = Center {
    lat: 51.5074,
    lng: -0.1278,
};

/// A WGS84 point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub lat: f64,
    pub lng: f64,
}

impl Center {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Generate a closed ring of `points` positions at `radius_m` around this center
    pub fn ring(&self, radius_m: f64, points: usize) -> Result<Ring, RingError> {
        generate_ring(self.lat, self.lng, radius_m, points)
    }
}

impl Default for Center {
    fn default() -> Self {
        DEFAULT_CENTER
    }
}

/// Radius and point count for one generated ring
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RingSpec {
    #[serde(alias = "radius_m")]
    pub radius: f64,
    pub points: usize,
}

impl RingSpec {
    pub fn new(radius: f64, points: usize) -> Self {
        Self { radius, points }
    }

    /// The three shrinking rings of the stock fixture: 50m/10, 40m/9, 30m/8
    pub fn defaults() -> Vec<RingSpec> {
        vec![
            RingSpec::new(50.0, 10),
            RingSpec::new(40.0, 9),
            RingSpec::new(30.0, 8),
        ]
    }
}

impl fmt::Display for RingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.radius, self.points)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseRingSpecError {
    #[error("expected RADIUS:POINTS, got '{0}'")]
    Format(String),
    #[error("invalid radius '{0}'")]
    Radius(String),
    #[error("invalid point count '{0}'")]
    Points(String),
}

impl FromStr for RingSpec {
    type Err = ParseRingSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (radius, points) = s
            .split_once(':')
            .ok_or_else(|| ParseRingSpecError::Format(s.to_string()))?;

        let radius: f64 = radius
            .trim()
            .parse()
            .map_err(|_| ParseRingSpecError::Radius(radius.to_string()))?;
        let points: usize = points
            .trim()
            .parse()
            .map_err(|_| ParseRingSpecError::Points(points.to_string()))?;

        Ok(Self { radius, points })
    }
}
