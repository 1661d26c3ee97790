//! Engine settings with documented defaults and range clamping
//!
//! Keys are camelCase; the kebab-case attribute names of the embedding map
//! element (`county-border-width`, `neighbors`, ...) are accepted as aliases.
//! Unknown keys are ignored. Out-of-range numbers are clamped, never rejected.
//! Numeric fields also accept strings; text that does not parse as a number
//! falls back to the field's default.

use crate::error::{ConfigError, ConfigValueError};
use crate::geometry::Units;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Identifier property of region attributes
pub const DEFAULT_ID_PROPERTY: &str = "GEO_ID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(alias = "county-border-color", deserialize_with = "lenient_string")]
    pub county_border_color: String,
    #[serde(alias = "county-border-opacity", deserialize_with = "lenient_f64")]
    pub county_border_opacity: f64,
    #[serde(alias = "county-border-width", deserialize_with = "lenient_f64")]
    pub county_border_width: f64,
    #[serde(alias = "county-fill-color", deserialize_with = "lenient_string")]
    pub county_fill_color: String,
    #[serde(alias = "county-fill-opacity", deserialize_with = "lenient_f64")]
    pub county_fill_opacity: f64,
    /// Used by the hover style only
    #[serde(alias = "county-hover-color", deserialize_with = "lenient_string")]
    pub county_hover_color: String,
    #[serde(alias = "county-selected-color", deserialize_with = "lenient_string")]
    pub county_selected_color: String,
    #[serde(alias = "state-border-color", deserialize_with = "lenient_string")]
    pub state_border_color: String,
    #[serde(alias = "state-border-width", deserialize_with = "lenient_f64")]
    pub state_border_width: f64,
    #[serde(alias = "initial-zoom", deserialize_with = "lenient_f64")]
    pub initial_zoom: f64,
    #[serde(alias = "min-zoom", deserialize_with = "lenient_f64")]
    pub min_zoom: f64,
    #[serde(alias = "max-zoom", deserialize_with = "lenient_f64")]
    pub max_zoom: f64,
    #[serde(alias = "neighbors", deserialize_with = "lenient_bool")]
    pub neighbors_enabled: bool,
    #[serde(alias = "neighbor-distance", deserialize_with = "lenient_f64")]
    pub neighbor_distance: f64,
    #[serde(alias = "neighbor-distance-unit")]
    pub neighbor_distance_unit: Units,
    #[serde(alias = "id-property", deserialize_with = "lenient_string")]
    pub id_property: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            county_border_color: "black".to_string(),
            county_border_opacity: 1.0,
            county_border_width: 1.0,
            county_fill_color: "transparent".to_string(),
            county_fill_opacity: 0.95,
            county_hover_color: "lime".to_string(),
            county_selected_color: "green".to_string(),
            state_border_color: "black".to_string(),
            state_border_width: 2.0,
            initial_zoom: 4.0,
            min_zoom: 3.0,
            max_zoom: 7.0,
            neighbors_enabled: true,
            neighbor_distance: 2.0,
            neighbor_distance_unit: Units::Miles,
            id_property: DEFAULT_ID_PROPERTY.to_string(),
        }
    }
}

fn clamp_value(
    key: &'static str,
    value: &mut f64,
    min: f64,
    max: f64,
    fallback: f64,
    issues: &mut Vec<ConfigValueError>,
) {
    if !value.is_finite() {
        issues.push(ConfigValueError::NonFinite { key, fallback });
        *value = fallback;
        return;
    }
    let clamped = value.clamp(min, max);
    if clamped != *value {
        issues.push(ConfigValueError::OutOfRange { key, value: *value, clamped });
        *value = clamped;
    }
}

impl Settings {
    /// Clamp every numeric field into its valid range, returning what changed
    pub fn clamp_values(&mut self) -> Vec<ConfigValueError> {
        let defaults = Settings::default();
        let mut issues = Vec::new();

        clamp_value(
            "countyBorderOpacity",
            &mut self.county_border_opacity,
            0.0,
            1.0,
            defaults.county_border_opacity,
            &mut issues,
        );
        clamp_value(
            "countyFillOpacity",
            &mut self.county_fill_opacity,
            0.0,
            1.0,
            defaults.county_fill_opacity,
            &mut issues,
        );
        clamp_value(
            "countyBorderWidth",
            &mut self.county_border_width,
            0.0,
            f64::MAX,
            defaults.county_border_width,
            &mut issues,
        );
        clamp_value(
            "stateBorderWidth",
            &mut self.state_border_width,
            0.0,
            f64::MAX,
            defaults.state_border_width,
            &mut issues,
        );
        clamp_value(
            "neighborDistance",
            &mut self.neighbor_distance,
            0.0,
            f64::MAX,
            defaults.neighbor_distance,
            &mut issues,
        );
        clamp_value(
            "minZoom",
            &mut self.min_zoom,
            f64::MIN,
            f64::MAX,
            defaults.min_zoom,
            &mut issues,
        );
        let min_zoom = self.min_zoom;
        clamp_value(
            "maxZoom",
            &mut self.max_zoom,
            min_zoom,
            f64::MAX,
            defaults.max_zoom.max(min_zoom),
            &mut issues,
        );
        let max_zoom = self.max_zoom;
        clamp_value(
            "initialZoom",
            &mut self.initial_zoom,
            min_zoom,
            max_zoom,
            defaults.initial_zoom.clamp(min_zoom, max_zoom),
            &mut issues,
        );

        issues
    }

    /// Consume and return the clamped settings, logging each adjustment
    pub fn clamped(mut self) -> Self {
        for issue in self.clamp_values() {
            warn!("{}", issue);
        }
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_value(value)?;
        Ok(settings.clamped())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build settings from element-style attribute pairs. Values are kept as
    /// strings and converted per field.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let object: serde_json::Map<String, Value> = attributes
            .into_iter()
            .map(|(name, raw)| (name.to_string(), Value::String(raw.to_string())))
            .collect();
        Self::from_json_value(Value::Object(object))
    }
}

/// Number or numeric string. Unparseable text becomes NaN so clamping
/// replaces it with the default.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("number {} is not representable", n))),
        Value::String(s) => Ok(s.trim().parse().unwrap_or(f64::NAN)),
        other => Err(D::Error::custom(format!("expected a number, found {}", other))),
    }
}

/// String, with numbers and booleans taken as their text
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected a string, found {}", other))),
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::custom(format!("expected true or false, found '{}'", other))),
        },
        other => Err(D::Error::custom(format!("expected a boolean, found {}", other))),
    }
}
