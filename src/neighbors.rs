//! Neighbor discovery: regions whose bounding boxes meet a buffered region's box
//!
//! Box intersection over-approximates true distance adjacency. A region
//! inside the buffered box but beyond the buffer distance is still reported.
//! The queried region is reported too when the index contains it.

use crate::config::Settings;
use crate::geometry::{bounding_box_of, buffer, Attributes, Region, Units};
use crate::index::SpatialIndex;
use tracing::debug;

/// Default buffer distance around a selected region
pub const DEFAULT_NEIGHBOR_DISTANCE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborFinder {
    pub distance: f64,
    pub units: Units,
}

impl Default for NeighborFinder {
    fn default() -> Self {
        Self {
            distance: DEFAULT_NEIGHBOR_DISTANCE,
            units: Units::Miles,
        }
    }
}

impl NeighborFinder {
    pub fn new(distance: f64, units: Units) -> Self {
        Self { distance, units }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.neighbor_distance, settings.neighbor_distance_unit)
    }

    /// Attributes of every indexed region near `region`. Empty when the index
    /// is unavailable or the region has no boundary.
    pub fn find_neighbors(&self, region: &Region, index: &SpatialIndex) -> Vec<Attributes> {
        if !index.is_available() {
            return vec![];
        }

        let buffered = buffer(region, self.distance, self.units);
        let Some(bbox) = bounding_box_of(&buffered) else {
            return vec![];
        };

        let neighbors: Vec<Attributes> = index
            .query(&bbox)
            .into_iter()
            .map(|entry| (*entry.attributes).clone())
            .collect();

        debug!(region = region.id(), neighbors = neighbors.len(), "Found neighbors");
        neighbors
    }
}

/// Neighbors within the default two miles
pub fn find_neighbors(region: &Region, index: &SpatialIndex) -> Vec<Attributes> {
    NeighborFinder::default().find_neighbors(region, index)
}
