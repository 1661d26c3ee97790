//! Handler module declarations, re-exports and method dispatch

pub mod file;
pub mod selection;
pub mod style;

pub use file::*;
pub use selection::*;
pub use style::*;

use crate::host::protocol::{error_codes, Request, Response};
use crate::host::state::HostState;

/// Route one request to its handler
pub fn dispatch(state: &mut HostState, request: Request) -> Response {
    match request.method.as_str() {
        "Load" => handle_load(state, request.id, request.params),
        "Toggle" => handle_toggle(state, request.id, request.params),
        "GetSelected" => handle_get_selected(state, request.id),
        "FindNeighbors" => handle_find_neighbors(state, request.id, request.params),
        "GetStyles" => handle_get_styles(state, request.id, request.params),
        "HoverStyle" => handle_hover_style(state, request.id, request.params),
        "Close" => handle_close(state, request.id),
        _ => Response::error(
            request.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}
