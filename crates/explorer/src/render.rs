use foundation::bounds::GeoBounds;
use layers::grid::{GridLayer, StyledPoint, StyledPolygon};
use layers::labels::{LabelLayout, LabelPlacer, ScreenProjector};
use layers::render_mode::{CapacityExceeded, RenderMode, RenderModeConfig, select_render_mode};
use scene::catalog::GridCatalog;
use scene::visibility::{replicate_bounds, visible_features};
use serde::Serialize;

/// Everything the host draws for one viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPass {
    pub generation: u64,
    pub zoom: f64,
    pub mode: RenderMode,
    /// Features overlapping the view before the cap was applied.
    pub visible_count: usize,
    pub polygons: Vec<StyledPolygon>,
    pub points: Vec<StyledPoint>,
    /// Empty unless the plan enables labels.
    pub labels: LabelLayout,
    pub capacity: Option<CapacityExceeded>,
}

impl RenderPass {
    pub fn rendered_count(&self) -> usize {
        self.polygons.len() + self.points.len()
    }
}

/// Runs one pass: replicate the view across world copies, filter the
/// catalog, pick a mode, cap the visible set, build primitives and place
/// labels. Label state is reset by the placer on every call.
pub fn compute_pass<P: ScreenProjector + ?Sized>(
    catalog: &GridCatalog,
    bounds: &GeoBounds,
    zoom: f64,
    projector: &P,
    render: &RenderModeConfig,
    placer: &mut LabelPlacer,
    generation: u64,
) -> RenderPass {
    let plan = select_render_mode(zoom, render);

    let visible = if plan.mode == RenderMode::Hidden || !bounds.is_finite() {
        Vec::new()
    } else {
        visible_features(catalog, &replicate_bounds(bounds))
    };
    let visible_count = visible.len();
    let (kept, capacity) = plan.apply_cap(visible);

    let snapshot = GridLayer::new().extract(&kept, plan.mode);
    let labels = if plan.labels {
        placer.layout(kept.iter().copied(), projector)
    } else {
        placer.reset();
        LabelLayout::default()
    };

    RenderPass {
        generation,
        zoom,
        mode: plan.mode,
        visible_count,
        polygons: snapshot.polygons,
        points: snapshot.points,
        labels,
        capacity,
    }
}
