use std::env;

use layers::labels::LabelConfig;
use layers::render_mode::RenderModeConfig;
use serde::{Deserialize, Serialize};

/// Tunables of a viewport session.
///
/// Layered lowest to highest: defaults, an optional JSON document, then
/// `GRID_*` environment variables.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub render: RenderModeConfig,
    pub labels: LabelConfig,
    /// Trailing-edge delay between the last viewport change and the recompute.
    pub debounce_ms: u64,
    /// How long a selected search result stays highlighted.
    pub highlight_ms: u64,
    pub search_limit: usize,
    /// Zoom the map jumps to when a search result is selected.
    pub search_result_zoom: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            render: RenderModeConfig::default(),
            labels: LabelConfig::default(),
            debounce_ms: 100,
            highlight_ms: 3_000,
            search_limit: 10,
            search_result_zoom: 10.0,
        }
    }
}

impl ExplorerConfig {
    /// Missing fields keep their defaults.
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_overrides(|key| env::var(key).ok())
    }

    /// Applies `GRID_*` overrides read through `lookup`. Values that do not
    /// parse leave the current setting in place.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let r = &mut self.render;
        r.min_zoom_for_grids = env_var_f64(&lookup, "GRID_MIN_ZOOM", r.min_zoom_for_grids);
        r.point_zoom_threshold = env_var_f64(&lookup, "GRID_POINT_ZOOM", r.point_zoom_threshold);
        r.label_zoom_threshold = env_var_f64(&lookup, "GRID_LABEL_ZOOM", r.label_zoom_threshold);
        r.max_points_to_render = env_var_usize(&lookup, "GRID_MAX_POINTS", r.max_points_to_render);
        r.max_grids_to_render = env_var_usize(&lookup, "GRID_MAX_GRIDS", r.max_grids_to_render);
        self.debounce_ms = env_var_u64(&lookup, "GRID_DEBOUNCE_MS", self.debounce_ms);
        self.highlight_ms = env_var_u64(&lookup, "GRID_HIGHLIGHT_MS", self.highlight_ms);
        self
    }
}

fn env_var_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_var_usize(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_var_f64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    lookup(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::ExplorerConfig;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_documented_values() {
        let c = ExplorerConfig::default();
        assert_eq!(c.render.min_zoom_for_grids, 4.0);
        assert_eq!(c.render.point_zoom_threshold, 7.0);
        assert_eq!(c.render.label_zoom_threshold, 8.0);
        assert_eq!(c.render.max_points_to_render, 5000);
        assert_eq!(c.render.max_grids_to_render, 1500);
        assert_eq!(c.labels.min_distance_px, 20.0);
        assert_eq!(c.debounce_ms, 100);
        assert_eq!(c.highlight_ms, 3000);
        assert_eq!(c.search_limit, 10);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = ExplorerConfig::from_json_str(
            r#"{"debounce_ms": 250, "render": {"max_grids_to_render": 10}}"#,
        )
        .expect("config");
        assert_eq!(c.debounce_ms, 250);
        assert_eq!(c.render.max_grids_to_render, 10);
        assert_eq!(c.render.max_points_to_render, 5000);
        assert_eq!(c.highlight_ms, 3000);

        assert!(ExplorerConfig::from_json_str("{").is_err());
    }

    #[test]
    fn env_overrides_apply_and_ignore_garbage() {
        let vars: HashMap<&str, &str> = [
            ("GRID_MIN_ZOOM", "3.5"),
            ("GRID_MAX_POINTS", " 42 "),
            ("GRID_DEBOUNCE_MS", "soon"),
            ("GRID_LABEL_ZOOM", "NaN"),
        ]
        .into_iter()
        .collect();
        let c = ExplorerConfig::default()
            .with_env_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(c.render.min_zoom_for_grids, 3.5);
        assert_eq!(c.render.max_points_to_render, 42);
        assert_eq!(c.debounce_ms, 100);
        assert_eq!(c.render.label_zoom_threshold, 8.0);
    }
}
