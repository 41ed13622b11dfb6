pub mod center;
pub mod polygon;

pub use center::{Center, RingSpec};
pub use polygon::{Ring, RingPolygon};
