//! Presentation attributes as a pure function of zoom and selection state
//!
//! Nothing here is cached. Styles are cheap to recompute on every zoom change.

use crate::config::Settings;
use serde::Serialize;

/// Thinnest border ever produced
pub const MIN_STROKE_WIDTH: f64 = 0.5;

/// Width change per zoom level away from the initial zoom
const WIDTH_STEP_PER_ZOOM: f64 = 0.1;

/// Fill opacity while the pointer is over a region
pub const HOVER_FILL_OPACITY: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpec {
    pub stroke_width: f64,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    /// False for border-only layers
    pub fill: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    pub fill_opacity: f64,
}

/// Border width scaled linearly with zoom around `initial_zoom`, floored at 0.5
pub fn dynamic_width(base_width: f64, zoom: f64, initial_zoom: f64) -> f64 {
    let zoom_factor = 1.0 + (zoom - initial_zoom) * WIDTH_STEP_PER_ZOOM;
    (base_width * zoom_factor).max(MIN_STROKE_WIDTH)
}

/// Style of one county
pub fn county_style(zoom: f64, is_selected: bool, settings: &Settings) -> StyleSpec {
    let fill_color = if is_selected {
        &settings.county_selected_color
    } else {
        &settings.county_fill_color
    };

    // Borders fade at low zoom where many small counties crowd together
    let stroke_opacity = if zoom <= settings.initial_zoom {
        settings.county_border_opacity / 2.0
    } else {
        settings.county_border_opacity
    };

    StyleSpec {
        stroke_width: dynamic_width(settings.county_border_width, zoom, settings.initial_zoom),
        stroke_color: settings.county_border_color.clone(),
        stroke_opacity,
        fill: true,
        fill_color: Some(fill_color.clone()),
        fill_opacity: settings.county_fill_opacity,
    }
}

/// Style of the state boundary layer: borders only
pub fn state_style(zoom: f64, settings: &Settings) -> StyleSpec {
    StyleSpec {
        stroke_width: dynamic_width(settings.state_border_width, zoom, settings.initial_zoom),
        stroke_color: settings.state_border_color.clone(),
        stroke_opacity: 1.0,
        fill: false,
        fill_color: None,
        fill_opacity: 0.0,
    }
}

/// Style of a county under the pointer
pub fn hover_style(zoom: f64, settings: &Settings) -> StyleSpec {
    StyleSpec {
        fill_color: Some(settings.county_hover_color.clone()),
        fill_opacity: HOVER_FILL_OPACITY,
        ..county_style(zoom, false, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            initial_zoom: 4.0,
            county_border_width: 1.0,
            county_border_opacity: 1.0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_width_at_initial_zoom() {
        let style = county_style(4.0, false, &settings());
        assert!((style.stroke_width - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_width_grows_above_initial_zoom() {
        let style = county_style(7.0, false, &settings());
        assert!((style.stroke_width - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_width_is_floored() {
        for zoom in [-20.0, -5.0, 0.0, 1.0, 3.0] {
            assert!(county_style(zoom, false, &settings()).stroke_width >= MIN_STROKE_WIDTH);
        }
        let zero = Settings { county_border_width: 0.0, ..settings() };
        assert_eq!(county_style(10.0, true, &zero).stroke_width, MIN_STROKE_WIDTH);
    }

    #[test]
    fn test_opacity_fades_at_or_below_initial_zoom() {
        assert_eq!(county_style(3.0, false, &settings()).stroke_opacity, 0.5);
        assert_eq!(county_style(4.0, false, &settings()).stroke_opacity, 0.5);
        assert_eq!(county_style(5.0, false, &settings()).stroke_opacity, 1.0);
    }

    #[test]
    fn test_fill_color_follows_selection() {
        let s = settings();
        assert_eq!(county_style(4.0, true, &s).fill_color.as_deref(), Some("green"));
        assert_eq!(county_style(4.0, false, &s).fill_color.as_deref(), Some("transparent"));
        assert_eq!(county_style(4.0, true, &s).fill_opacity, 0.95);
    }

    #[test]
    fn test_same_inputs_same_style() {
        let s = settings();
        assert_eq!(county_style(5.5, true, &s), county_style(5.5, true, &s));
    }

    #[test]
    fn test_state_style_has_no_fill() {
        let style = state_style(6.0, &settings());
        assert!(!style.fill);
        assert!(style.fill_color.is_none());
        assert!((style.stroke_width - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_hover_style_uses_hover_color() {
        let style = hover_style(4.0, &settings());
        assert_eq!(style.fill_color.as_deref(), Some("lime"));
        assert_eq!(style.fill_opacity, HOVER_FILL_OPACITY);
        assert_eq!(style.stroke_width, county_style(4.0, false, &settings()).stroke_width);
    }
}
