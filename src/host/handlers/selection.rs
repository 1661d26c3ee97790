//! Selection handlers: Toggle, GetSelected, FindNeighbors

use crate::host::protocol::Response;
use crate::host::state::HostState;
use crate::host::util::{not_loaded, parse_params, unknown_region};
use crate::neighbors::NeighborFinder;
use serde::Deserialize;

#[derive(Deserialize)]
struct RegionParams {
    region_id: String,
}

/// Handle Toggle request - flips a region's selection and returns the events to emit
pub fn handle_toggle(
    state: &mut HostState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let p: RegionParams = match parse_params(id.clone(), params, "{region_id: string}") {
        Ok(p) => p,
        Err(e) => return e,
    };

    if !state.is_loaded() {
        return not_loaded(id);
    }

    let HostState { regions, index, settings, controller } = state;
    let Some(region) = regions.as_ref().and_then(|r| r.get(&p.region_id)) else {
        return unknown_region(id, &p.region_id);
    };

    let record = controller.toggle(region, settings.neighbors_enabled, index, settings);

    Response::success(id, serde_json::json!({
        "events": record.event_names(),
        "notification": record,
    }))
}

/// Handle GetSelected request - snapshot of the current selection
pub fn handle_get_selected(state: &HostState, id: Option<serde_json::Value>) -> Response {
    Response::from_result(id, &state.controller.selected())
}

/// Handle FindNeighbors request - neighbor attributes without touching the selection
pub fn handle_find_neighbors(
    state: &HostState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let p: RegionParams = match parse_params(id.clone(), params, "{region_id: string}") {
        Ok(p) => p,
        Err(e) => return e,
    };

    if !state.is_loaded() {
        return not_loaded(id);
    }

    let Some(region) = state.region(&p.region_id) else {
        return unknown_region(id, &p.region_id);
    };

    let finder = NeighborFinder::from_settings(&state.settings);
    let neighbors = finder.find_neighbors(region, &state.index);
    Response::from_result(id, &neighbors)
}
