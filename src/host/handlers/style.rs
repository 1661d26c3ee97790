//! Style handlers: GetStyles, HoverStyle

use crate::host::protocol::Response;
use crate::host::state::HostState;
use crate::host::util::{not_loaded, parse_params, unknown_region};
use crate::style::{hover_style, state_style};
use indexmap::IndexMap;
use serde::Deserialize;

/// Handle GetStyles request - styles for a zoom change. Without `region_ids`
/// every loaded region is styled.
pub fn handle_get_styles(
    state: &HostState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct Params {
        zoom: f64,
        #[serde(default)]
        region_ids: Option<Vec<String>>,
    }

    let expected = "{zoom: number, region_ids?: string[]}";
    let p: Params = match parse_params(id.clone(), params, expected) {
        Ok(p) => p,
        Err(e) => return e,
    };

    let Some(catalog) = &state.regions else {
        return not_loaded(id);
    };

    let region_ids: Vec<String> = match p.region_ids {
        Some(ids) => ids,
        None => catalog.iter().map(|r| r.id().to_string()).collect(),
    };

    let counties: IndexMap<String, _> = region_ids
        .into_iter()
        .map(|region_id| {
            let style = state.controller.style_for(&region_id, p.zoom, &state.settings);
            (region_id, style)
        })
        .collect();

    Response::success(id, serde_json::json!({
        "state": state_style(p.zoom, &state.settings),
        "counties": counties,
    }))
}

/// Handle HoverStyle request - hover style and tooltip label for one region
pub fn handle_hover_style(
    state: &HostState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct Params {
        zoom: f64,
        region_id: String,
    }

    let p: Params = match parse_params(id.clone(), params, "{zoom: number, region_id: string}") {
        Ok(p) => p,
        Err(e) => return e,
    };

    if !state.is_loaded() {
        return not_loaded(id);
    }

    let Some(region) = state.region(&p.region_id) else {
        return unknown_region(id, &p.region_id);
    };

    Response::success(id, serde_json::json!({
        "style": hover_style(p.zoom, &state.settings),
        "label": region.label(),
    }))
}
