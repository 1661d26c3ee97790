//! R-tree entry type for region bounding boxes
//!
//! Entries carry a region's identifier and a shared handle to its attributes.
//! They never own or point at the region geometry itself.

use super::types::{Attributes, BoundingBox};
use rstar::{RTreeObject, AABB};
use std::sync::Arc;

/// One region's bounding box in the spatial index
#[derive(Clone, Debug)]
pub struct IndexEntry {
    pub region_id: String,
    pub attributes: Arc<Attributes>,
    envelope: AABB<[f64; 2]>,
}

impl IndexEntry {
    pub fn new(region_id: impl Into<String>, bbox: BoundingBox, attributes: Attributes) -> Self {
        Self {
            region_id: region_id.into(),
            attributes: Arc::new(attributes),
            envelope: to_envelope(&bbox),
        }
    }
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Convert a bounding box into an rstar envelope
pub fn to_envelope(bbox: &BoundingBox) -> AABB<[f64; 2]> {
    AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y])
}
