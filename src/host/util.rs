//! Utility functions for the host: logging setup and parameter parsing

use crate::host::protocol::{error_codes, Response};
use serde::de::DeserializeOwned;
use std::io;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr because stdout carries
/// the response stream. Defaults to INFO unless RUST_LOG is set.
pub fn init_logging() -> Result<(), tracing_subscriber::util::TryInitError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
}

/// Deserialize request params, or build an INVALID_PARAMS response naming the expected shape
pub fn parse_params<T: DeserializeOwned>(
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
    expected: &str,
) -> Result<T, Response> {
    params
        .and_then(|p| serde_json::from_value(p).ok())
        .ok_or_else(|| {
            Response::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params: expected {}", expected),
            )
        })
}

/// NO_REGIONS_LOADED response for requests made before a successful Load
pub fn not_loaded(id: Option<serde_json::Value>) -> Response {
    Response::error(
        id,
        error_codes::NO_REGIONS_LOADED,
        "No regions loaded. Call Load first.".to_string(),
    )
}

pub fn unknown_region(id: Option<serde_json::Value>, region_id: &str) -> Response {
    Response::error(
        id,
        error_codes::REGION_NOT_FOUND,
        format!("Region not found: {}", region_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Params {
        region_id: String,
    }

    #[test]
    fn test_parse_params_ok() {
        let params = Some(serde_json::json!({"region_id": "G1"}));
        let p: Params = parse_params(None, params, "{region_id}").map_err(|_| ()).unwrap();
        assert_eq!(p.region_id, "G1");
    }

    #[test]
    fn test_parse_params_missing() {
        let err = parse_params::<Params>(Some(serde_json::json!(7)), None, "{region_id: string}")
            .err()
            .unwrap();
        let error = err.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert!(error.message.contains("region_id"));
        assert_eq!(err.id, Some(serde_json::json!(7)));
    }
}
