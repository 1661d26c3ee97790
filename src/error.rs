//! Error types for the selection engine
//!
//! Only `DataLoadError` is fatal to a host. `IndexLoadError` degrades neighbor
//! discovery, and `ConfigValueError` is reported while clamping settings.

use std::path::PathBuf;

/// Failure to build the spatial index from a serialized snapshot
#[derive(Debug, thiserror::Error)]
pub enum IndexLoadError {
    #[error("failed to read spatial index snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse spatial index JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode spatial index MessagePack: {0}")]
    MessagePack(#[from] rmp_serde::decode::Error),
    #[error("malformed spatial index snapshot: {reason}")]
    Malformed { reason: String },
}

impl IndexLoadError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        IndexLoadError::Malformed { reason: reason.into() }
    }
}

/// Failure to load the region collection
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read region data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse region GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("region data is not a FeatureCollection")]
    NotACollection,
    #[error("feature #{feature} has no '{property}' identifier")]
    MissingIdentifier { feature: usize, property: String },
    #[error("region '{id}' has unsupported geometry type {kind}")]
    UnsupportedGeometry { id: String, kind: String },
}

/// A numeric setting outside its valid range
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValueError {
    #[error("setting '{key}' = {value} is out of range, clamped to {clamped}")]
    OutOfRange {
        key: &'static str,
        value: f64,
        clamped: f64,
    },
    #[error("setting '{key}' is not a finite number, using default {fallback}")]
    NonFinite { key: &'static str, fallback: f64 },
}

/// Failure to read a settings document
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
