//! Geometry module for county regions
//!
//! # Submodules
//! - `types` - Coordinates, boundaries, bounding boxes and regions
//! - `spatial` - R-tree entry type for the spatial index
//! - `ops` - Distance buffering and bounding boxes of buffered shapes

mod ops;
mod spatial;
mod types;

pub use types::{Attributes, Boundary, BoundingBox, Coord, Polygon, Region, Ring};

pub use spatial::{to_envelope, IndexEntry};

pub use ops::{
    bearing, bounding_box_of, buffer, destination, BufferedGeometry, Units, EARTH_RADIUS_M,
};
