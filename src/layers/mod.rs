pub mod rings;

pub use rings::{
    OutputMode, RingsConfig, assemble_polygons, generate_rings, to_feature_collection,
    to_multi_polygon,
};
