//! Host state: loaded regions, spatial index, settings and selection

use crate::config::Settings;
use crate::data::RegionCatalog;
use crate::geometry::Region;
use crate::index::SpatialIndex;
use crate::selection::SelectionController;

/// In-memory state behind the stdio host
#[derive(Debug, Default)]
pub struct HostState {
    pub regions: Option<RegionCatalog>,
    pub index: SpatialIndex,
    pub settings: Settings,
    pub controller: SelectionController,
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if region data is loaded
    pub fn is_loaded(&self) -> bool {
        self.regions.is_some()
    }

    pub fn region(&self, region_id: &str) -> Option<&Region> {
        self.regions.as_ref().and_then(|r| r.get(region_id))
    }

    /// Drop all loaded data and the current selection
    pub fn reset(&mut self) {
        self.regions = None;
        self.index = SpatialIndex::unavailable();
        self.settings = Settings::default();
        self.controller.clear();
    }
}
