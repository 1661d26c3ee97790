//! Toggle orchestration
//!
//! Each region is either selected (present in the store) or not. A toggle
//! flips that state, computes neighbors when enabled, updates the store and
//! returns a notification record. Neighbors are computed on deselection as
//! well so the record carries the same shape either way. Dispatching the
//! record is the host's job.

use super::{NotificationKind, NotificationRecord, SelectionDetail, SelectionStore};
use crate::config::Settings;
use crate::geometry::Region;
use crate::index::SpatialIndex;
use crate::neighbors::NeighborFinder;
use crate::style::{county_style, StyleSpec};
use indexmap::IndexMap;
use tracing::info;

/// Sole writer of the selection store
#[derive(Debug, Default)]
pub struct SelectionController {
    store: SelectionStore,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn is_selected(&self, region_id: &str) -> bool {
        self.store.contains(region_id)
    }

    /// Flip the selection of `region` and describe what happened
    pub fn toggle(
        &mut self,
        region: &Region,
        neighbors_enabled: bool,
        index: &SpatialIndex,
        settings: &Settings,
    ) -> NotificationRecord {
        let now_selected = !self.store.contains(region.id());

        let neighbors = neighbors_enabled
            .then(|| NeighborFinder::from_settings(settings).find_neighbors(region, index));

        let detail = SelectionDetail {
            region_id: region.id().to_string(),
            attributes: region.attributes().clone(),
            neighbors,
        };

        let kind = if now_selected {
            self.store.set(region.id(), detail.clone());
            NotificationKind::Selected
        } else {
            self.store.remove(region.id());
            NotificationKind::Deselected
        };

        info!(
            region = region.id(),
            event = kind.event_name(),
            neighbors = detail.neighbors.as_ref().map(Vec::len),
            selected = self.store.len(),
            "Toggled region"
        );

        NotificationRecord { kind, detail }
    }

    /// Snapshot of the current selection keyed by region id
    pub fn selected(&self) -> IndexMap<String, SelectionDetail> {
        self.store.snapshot()
    }

    /// County style with the selection flag taken from the store
    pub fn style_for(&self, region_id: &str, zoom: f64, settings: &Settings) -> StyleSpec {
        county_style(zoom, self.is_selected(region_id), settings)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}
