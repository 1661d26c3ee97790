//! Read-only spatial index over region bounding boxes
//!
//! Built once from a serialized snapshot and never mutated afterwards, so it
//! can be shared freely between readers. An index that failed to load stays
//! usable: every query on it returns nothing.

mod snapshot;

pub use snapshot::{IndexSnapshot, SnapshotChild, SnapshotItem, SnapshotNode};

use crate::error::IndexLoadError;
use crate::geometry::{to_envelope, BoundingBox, IndexEntry};
use rstar::RTree;
use tracing::{debug, warn};

/// Bounding-box index of every region
#[derive(Default)]
pub struct SpatialIndex {
    tree: Option<RTree<IndexEntry>>,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("available", &self.is_available())
            .field("entries", &self.len())
            .finish()
    }
}

impl SpatialIndex {
    /// Index that answers every query with an empty result
    pub fn unavailable() -> Self {
        Self { tree: None }
    }

    /// Validate a snapshot and bulk-load its entries
    pub fn build(snapshot: IndexSnapshot, id_property: &str) -> Result<Self, IndexLoadError> {
        let entries = snapshot.into_entries(id_property)?;
        debug!(entries = entries.len(), "Bulk loading spatial index");
        Ok(Self {
            tree: Some(RTree::bulk_load(entries)),
        })
    }

    pub fn from_json_str(json: &str, id_property: &str) -> Result<Self, IndexLoadError> {
        Self::build(IndexSnapshot::from_json_str(json)?, id_property)
    }

    pub fn from_msgpack(bytes: &[u8], id_property: &str) -> Result<Self, IndexLoadError> {
        Self::build(IndexSnapshot::from_msgpack(bytes)?, id_property)
    }

    /// Keep a loaded index, or log the failure and fall back to an unavailable one
    pub fn from_load_result(result: Result<Self, IndexLoadError>) -> Self {
        match result {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "Spatial index unavailable, neighbor discovery disabled");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.tree.is_some()
    }

    pub fn len(&self) -> usize {
        self.tree.as_ref().map_or(0, |t| t.size())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries whose box intersects `bbox`. The order is stable for a
    /// given index but otherwise unspecified.
    pub fn query(&self, bbox: &BoundingBox) -> Vec<&IndexEntry> {
        let Some(tree) = &self.tree else {
            return vec![];
        };
        tree.locate_in_envelope_intersecting(&to_envelope(bbox))
            .collect()
    }
}
