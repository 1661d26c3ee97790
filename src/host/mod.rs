//! Stdio host for the selection engine
//!
//! Newline-delimited JSON-RPC: one request per stdin line, one response per
//! stdout line. The host is where notification records become named events.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `state` - Host state management
//! - `util` - Logging setup and parameter parsing
//! - `handlers` - Request handlers organized by functionality

pub mod handlers;
pub mod protocol;
pub mod state;
pub mod util;

pub use handlers::dispatch;
pub use protocol::{error_codes, ErrorResponse, Request, Response};
pub use state::HostState;
