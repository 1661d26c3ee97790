//! Selection state and toggle orchestration
//!
//! # Submodules
//! - `store` - Authoritative region id to selection detail mapping
//! - `controller` - Toggle state machine producing notification records

mod controller;
mod store;

pub use controller::SelectionController;
pub use store::SelectionStore;

use crate::geometry::Attributes;
use serde::Serialize;

/// Event every toggle implies in addition to its selected/unselected event
pub const SELECTION_CHANGED_EVENT: &str = "selection-changed";

/// Record kept for each selected region
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDetail {
    pub region_id: String,
    pub attributes: Attributes,
    /// `None` when neighbor discovery is disabled
    pub neighbors: Option<Vec<Attributes>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Selected,
    Deselected,
}

impl NotificationKind {
    pub fn event_name(self) -> &'static str {
        match self {
            NotificationKind::Selected => "selected",
            NotificationKind::Deselected => "unselected",
        }
    }
}

/// Outcome of a toggle, handed back to the host for dispatch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationRecord {
    pub kind: NotificationKind,
    pub detail: SelectionDetail,
}

impl NotificationRecord {
    /// Names of the events the host should emit, in order
    pub fn event_names(&self) -> [&'static str; 2] {
        [self.kind.event_name(), SELECTION_CHANGED_EVENT]
    }
}
