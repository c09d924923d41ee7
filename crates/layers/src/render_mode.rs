use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    /// Too far out; the host shows a "zoom in" hint instead.
    Hidden,
    Points,
    Polygons,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderModeConfig {
    pub min_zoom_for_grids: f64,
    pub point_zoom_threshold: f64,
    pub label_zoom_threshold: f64,
    pub max_points_to_render: usize,
    pub max_grids_to_render: usize,
}

impl Default for RenderModeConfig {
    fn default() -> Self {
        Self {
            min_zoom_for_grids: 4.0,
            point_zoom_threshold: 7.0,
            label_zoom_threshold: 8.0,
            max_points_to_render: 5_000,
            max_grids_to_render: 1_500,
        }
    }
}

/// What to draw at a zoom level and how many features at most.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub mode: RenderMode,
    pub cap: usize,
    pub labels: bool,
}

/// Reported when the visible set had to be truncated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityExceeded {
    pub mode: RenderMode,
    pub visible: usize,
    pub cap: usize,
}

pub fn select_render_mode(zoom: f64, config: &RenderModeConfig) -> RenderPlan {
    if zoom < config.min_zoom_for_grids {
        RenderPlan {
            mode: RenderMode::Hidden,
            cap: 0,
            labels: false,
        }
    } else if zoom < config.point_zoom_threshold {
        RenderPlan {
            mode: RenderMode::Points,
            cap: config.max_points_to_render,
            labels: false,
        }
    } else {
        RenderPlan {
            mode: RenderMode::Polygons,
            cap: config.max_grids_to_render,
            labels: zoom >= config.label_zoom_threshold,
        }
    }
}

impl RenderPlan {
    /// Keeps a stable prefix of `items` no longer than the cap.
    ///
    /// Hidden mode drops everything without reporting an overflow.
    pub fn apply_cap<T>(&self, mut items: Vec<T>) -> (Vec<T>, Option<CapacityExceeded>) {
        if self.mode == RenderMode::Hidden {
            items.clear();
            return (items, None);
        }
        if items.len() <= self.cap {
            return (items, None);
        }
        let exceeded = CapacityExceeded {
            mode: self.mode,
            visible: items.len(),
            cap: self.cap,
        };
        items.truncate(self.cap);
        (items, Some(exceeded))
    }
}

#[cfg(test)]
mod tests {
    use super::{CapacityExceeded, RenderMode, RenderModeConfig, select_render_mode};

    #[test]
    fn zoom_thresholds() {
        let cfg = RenderModeConfig::default();
        assert_eq!(select_render_mode(2.0, &cfg).mode, RenderMode::Hidden);
        assert_eq!(select_render_mode(4.0, &cfg).mode, RenderMode::Points);
        assert_eq!(select_render_mode(5.0, &cfg).cap, cfg.max_points_to_render);

        let at_seven = select_render_mode(7.0, &cfg);
        assert_eq!(at_seven.mode, RenderMode::Polygons);
        assert!(!at_seven.labels);

        let at_ten = select_render_mode(10.0, &cfg);
        assert_eq!(at_ten.cap, cfg.max_grids_to_render);
        assert!(at_ten.labels);
    }

    #[test]
    fn cap_truncates_stable_prefix_and_reports() {
        let cfg = RenderModeConfig {
            max_points_to_render: 3,
            ..Default::default()
        };
        let plan = select_render_mode(5.0, &cfg);
        let (kept, exceeded) = plan.apply_cap(vec![1, 2, 3, 4, 5]);
        assert_eq!(kept, vec![1, 2, 3]);
        assert_eq!(
            exceeded,
            Some(CapacityExceeded {
                mode: RenderMode::Points,
                visible: 5,
                cap: 3
            })
        );

        let (kept, exceeded) = plan.apply_cap(vec![1, 2]);
        assert_eq!(kept, vec![1, 2]);
        assert_eq!(exceeded, None);
    }

    #[test]
    fn hidden_mode_keeps_nothing() {
        let plan = select_render_mode(0.0, &RenderModeConfig::default());
        let (kept, exceeded) = plan.apply_cap(vec!["a", "b"]);
        assert!(kept.is_empty());
        assert_eq!(exceeded, None);
    }
}
