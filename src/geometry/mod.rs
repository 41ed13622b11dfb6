pub mod projection;
pub mod ring;
pub mod simplify;

pub use projection::Projector;
pub use ring::{EARTH_RADIUS_M, RingError, generate_ring, reversed};
pub use simplify::{SimplifyError, simplify};
