//! Data operations: Load, Close

use crate::config::Settings;
use crate::data::{load_index, load_regions, RegionCatalog};
use crate::host::protocol::{error_codes, Response};
use crate::host::state::HostState;
use crate::host::util::parse_params;
use crate::index::SpatialIndex;
use anyhow::Context;
use serde::Deserialize;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Deserialize)]
struct LoadParams {
    regions_path: String,
    #[serde(default)]
    index_path: Option<String>,
    #[serde(default)]
    settings_path: Option<String>,
    #[serde(default)]
    settings: Option<serde_json::Value>,
}

fn resolve_settings(params: &LoadParams) -> anyhow::Result<Settings> {
    if let Some(inline) = &params.settings {
        return Settings::from_json_value(inline.clone()).context("Invalid inline settings");
    }
    match &params.settings_path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path)),
        None => Ok(Settings::default()),
    }
}

/// Handle Load request - loads settings, regions and the spatial index
pub fn handle_load(
    state: &mut HostState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let expected =
        "{regions_path: string, index_path?: string, settings_path?: string, settings?: object}";
    let params: LoadParams = match parse_params(id.clone(), params, expected) {
        Ok(p) => p,
        Err(e) => return e,
    };

    let start_total = Instant::now();

    let settings = match resolve_settings(&params) {
        Ok(s) => s,
        Err(e) => {
            return Response::error(id, error_codes::LOAD_FAILED, format!("{:#}", e));
        }
    };

    // Region data is required; failing here leaves the previous state untouched
    let regions = match load_regions(&params.regions_path, &settings.id_property) {
        Ok(r) => RegionCatalog::new(r),
        Err(e) => {
            return Response::error(
                id,
                error_codes::LOAD_FAILED,
                format!("Failed to load regions: {}", e),
            );
        }
    };

    let index = match (&params.index_path, settings.neighbors_enabled) {
        (Some(path), true) => {
            SpatialIndex::from_load_result(load_index(path, &settings.id_property))
        }
        (Some(_), false) => {
            info!("Neighbor discovery disabled, skipping spatial index");
            SpatialIndex::unavailable()
        }
        (None, true) => {
            warn!("No spatial index given, neighbor lists will be empty");
            SpatialIndex::unavailable()
        }
        (None, false) => SpatialIndex::unavailable(),
    };

    let region_count = regions.len();
    let index_entries = index.len();
    let index_available = index.is_available();

    state.regions = Some(regions);
    state.index = index;
    state.settings = settings;
    state.controller.clear();

    info!(
        regions = region_count,
        index_entries,
        elapsed = ?start_total.elapsed(),
        "Load complete"
    );

    Response::success(id, serde_json::json!({
        "status": "ok",
        "region_count": region_count,
        "index_available": index_available,
        "index_entries": index_entries
    }))
}

/// Handle Close request - clears all state
pub fn handle_close(state: &mut HostState, id: Option<serde_json::Value>) -> Response {
    let cleared = state.controller.store().len();
    state.reset();
    info!(cleared_selections = cleared, "Closed");
    Response::success(id, serde_json::json!({
        "status": "ok",
        "cleared_selections": cleared
    }))
}
