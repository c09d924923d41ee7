use std::cell::RefCell;
use std::rc::{Rc, Weak};

use formats::coverage::CoverageOverlay;
use foundation::time::Millis;
use layers::coverage::{BaseLayer, CoverageLayer};
use layers::grid::highlight_polygon;
use layers::labels::LabelPlacer;
use runtime::event_bus::{EventBus, ListenerId};
use runtime::metrics::Metrics;
use runtime::scheduler::Debouncer;
use scene::catalog::{FeatureId, GridCatalog};
use scene::search::{SearchEntry, SearchIndex};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::host::{MapEvent, RenderSink, ViewportProvider, ViewportState};
use crate::render::{RenderPass, compute_pass};

pub const METRIC_RENDER_PASSES: &str = "render.passes";
pub const METRIC_CAPACITY_EXCEEDED: &str = "render.capacity_exceeded";
pub const METRIC_LABELS_PLACED: &str = "labels.placed";
pub const METRIC_LABELS_OMITTED: &str = "labels.omitted";
pub const METRIC_SEARCH_QUERIES: &str = "search.queries";
pub const METRIC_RENDER_VISIBLE: &str = "render.visible";

/// One row of the search results panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&SearchEntry> for SearchHit {
    fn from(entry: &SearchEntry) -> Self {
        Self {
            display_name: entry.display_name.clone(),
            lat: entry.centroid.lat,
            lng: entry.centroid.lng,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "hits", rename_all = "snake_case")]
pub enum SearchResults {
    /// Nothing typed yet, or the query was cleared.
    #[default]
    NoQuery,
    /// A query that matched nothing.
    Empty,
    Matches(Vec<SearchHit>),
}

/// Owns the render state of one explore session.
///
/// Viewport changes are debounced: only the last change in a burst is
/// recomputed, `debounce_ms` after it arrived. Time is driven by the host
/// through [`ViewportSession::poll`].
#[derive(Debug)]
pub struct ViewportSession {
    catalog: GridCatalog,
    index: SearchIndex,
    overlay: Option<CoverageOverlay>,
    config: ExplorerConfig,
    coverage: CoverageLayer,
    overlay_dirty: bool,
    placer: LabelPlacer,
    recompute: Debouncer<ViewportState>,
    highlight_clear: Debouncer<FeatureId>,
    highlighted: Option<FeatureId>,
    last_pass: Option<RenderPass>,
    results: SearchResults,
    listeners: Vec<ListenerId>,
    generation: u64,
    disposed: bool,
    metrics: Metrics,
}

impl ViewportSession {
    pub fn create(
        catalog: GridCatalog,
        overlay: Option<CoverageOverlay>,
        config: ExplorerConfig,
    ) -> Self {
        let index = SearchIndex::build(&catalog).with_limit(config.search_limit);
        info!(
            features = catalog.len(),
            indexed = index.len(),
            overlay = overlay.as_ref().map_or(0, |o| o.len()),
            "explore session created"
        );
        Self {
            overlay_dirty: overlay.is_some(),
            catalog,
            index,
            overlay,
            coverage: CoverageLayer::new(BaseLayer::default()),
            placer: LabelPlacer::new(config.labels),
            recompute: Debouncer::new(config.debounce_ms),
            highlight_clear: Debouncer::new(config.highlight_ms),
            config,
            highlighted: None,
            last_pass: None,
            results: SearchResults::NoQuery,
            listeners: Vec::new(),
            generation: 1,
            disposed: false,
            metrics: Metrics::new(),
        }
    }

    /// Subscribes the session to the host's map events.
    ///
    /// The listener holds a weak reference, so dropping the session ends
    /// delivery even without [`ViewportSession::dispose`].
    pub fn attach(
        session: &Rc<RefCell<Self>>,
        bus: &mut EventBus<MapEvent>,
    ) -> Result<ListenerId, ExplorerError> {
        if session.borrow().disposed {
            return Err(ExplorerError::Disposed);
        }
        let weak: Weak<RefCell<Self>> = Rc::downgrade(session);
        let id = bus.subscribe(move |event: &MapEvent| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            let Ok(mut session) = session.try_borrow_mut() else {
                warn!("map event delivered while the session was busy; dropped");
                return;
            };
            session.handle_event(event);
        });
        session.borrow_mut().listeners.push(id);
        Ok(id)
    }

    pub fn handle_event(&mut self, event: &MapEvent) {
        match event {
            MapEvent::ViewportChanged { at, viewport } => self.on_viewport_change(*at, *viewport),
            MapEvent::BaseLayerChanged { name } => self.on_base_layer_change(name),
        }
    }

    /// Arms the debounced recompute with the latest viewport.
    pub fn on_viewport_change(&mut self, at: Millis, viewport: ViewportState) {
        if self.disposed {
            return;
        }
        if self.recompute.schedule(at, self.generation, viewport) {
            debug!(zoom = viewport.zoom, "superseded pending recompute");
        }
    }

    /// Records the new base layer; the overlay is restyled on the next poll.
    pub fn on_base_layer_change(&mut self, name: &str) {
        if self.disposed {
            return;
        }
        if self.coverage.set_base_layer(BaseLayer::from_name(name)) {
            self.overlay_dirty = self.overlay.is_some();
        }
    }

    /// Runs whatever timers are due at `now`: the overlay restyle, the
    /// highlight clear and at most one recompute.
    ///
    /// Returns the pass drawn by this call, if any.
    pub fn poll<H>(&mut self, now: Millis, host: &mut H) -> Result<Option<&RenderPass>, ExplorerError>
    where
        H: ViewportProvider + RenderSink,
    {
        self.ensure_live()?;
        self.apply_overlay_style(host);

        if let Some(fired) = self.highlight_clear.poll(now)
            && fired.generation == self.generation
            && self.highlighted == Some(fired.payload)
        {
            host.clear_highlight();
            self.highlighted = None;
        }

        let Some(fired) = self.recompute.poll(now) else {
            return Ok(None);
        };
        if fired.generation != self.generation {
            debug!(
                scheduled = fired.generation,
                current = self.generation,
                "discarding stale recompute"
            );
            return Ok(None);
        }
        Ok(Some(self.run_pass(fired.payload, host)))
    }

    /// Renders the host's current viewport immediately, superseding any
    /// pending debounced recompute.
    pub fn render_now<H>(&mut self, host: &mut H) -> Result<&RenderPass, ExplorerError>
    where
        H: ViewportProvider + RenderSink,
    {
        self.ensure_live()?;
        self.recompute.cancel();
        self.apply_overlay_style(host);
        let viewport = host.state();
        Ok(self.run_pass(viewport, host))
    }

    fn run_pass<H>(&mut self, viewport: ViewportState, host: &mut H) -> &RenderPass
    where
        H: ViewportProvider + RenderSink,
    {
        let pass = compute_pass(
            &self.catalog,
            &viewport.bounds,
            viewport.zoom,
            &*host,
            &self.config.render,
            &mut self.placer,
            self.generation,
        );

        self.metrics.inc(METRIC_RENDER_PASSES, 1);
        self.metrics.inc(METRIC_LABELS_PLACED, pass.labels.placed.len() as u64);
        self.metrics.inc(METRIC_LABELS_OMITTED, pass.labels.omitted.len() as u64);
        self.metrics.set_gauge(METRIC_RENDER_VISIBLE, pass.visible_count as i64);
        if let Some(exceeded) = pass.capacity {
            self.metrics.inc(METRIC_CAPACITY_EXCEEDED, 1);
            warn!(
                mode = ?exceeded.mode,
                visible = exceeded.visible,
                cap = exceeded.cap,
                "too many grids in view; showing the first {}",
                exceeded.cap
            );
        }
        debug!(
            generation = pass.generation,
            zoom = pass.zoom,
            mode = ?pass.mode,
            visible = pass.visible_count,
            rendered = pass.rendered_count(),
            labels_placed = pass.labels.placed.len(),
            labels_omitted = pass.labels.omitted.len(),
            "render pass"
        );

        host.draw(&pass);
        if self.overlay.is_some() {
            host.raise_overlay();
        }
        self.last_pass.insert(pass)
    }

    fn apply_overlay_style<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.overlay_dirty {
            return;
        }
        self.overlay_dirty = false;
        sink.restyle_overlay(&self.coverage.style());
        sink.raise_overlay();
    }

    /// Runs a name query against the index and remembers the outcome.
    pub fn search(&mut self, query: &str) -> Result<&SearchResults, ExplorerError> {
        self.ensure_live()?;
        self.results = if query.trim().is_empty() {
            SearchResults::NoQuery
        } else {
            self.metrics.inc(METRIC_SEARCH_QUERIES, 1);
            let hits: Vec<SearchHit> = self.index.search(query).into_iter().map(SearchHit::from).collect();
            if hits.is_empty() {
                SearchResults::Empty
            } else {
                SearchResults::Matches(hits)
            }
        };
        Ok(&self.results)
    }

    /// Jumps to a search result and highlights its feature for
    /// `highlight_ms`. A newer selection replaces the pending clear.
    ///
    /// The new view is scheduled for recompute here: a host that reports the
    /// move through the bus would hit a busy session and be dropped.
    pub fn select_result<H>(
        &mut self,
        display_name: &str,
        now: Millis,
        host: &mut H,
    ) -> Result<SearchHit, ExplorerError>
    where
        H: ViewportProvider + RenderSink,
    {
        self.ensure_live()?;
        let entry = self
            .index
            .lookup_by_display_name(display_name)
            .ok_or_else(|| ExplorerError::UnknownResult(display_name.to_string()))?;
        let hit = SearchHit::from(entry);
        let feature_id = entry.feature;
        let centroid = entry.centroid;

        host.set_view(centroid, self.config.search_result_zoom);
        self.on_viewport_change(now, host.state());
        if let Some(feature) = self.catalog.get(feature_id) {
            host.highlight(&highlight_polygon(feature));
            self.highlighted = Some(feature_id);
            self.highlight_clear.schedule(now, self.generation, feature_id);
        }
        debug!(name = %hit.display_name, lat = centroid.lat, lng = centroid.lng, "selected search result");
        Ok(hit)
    }

    /// Swaps in a freshly loaded catalog. Pending recomputes belong to the
    /// old catalog and are discarded; a highlight still on screen is cleared.
    pub fn reload<S: RenderSink + ?Sized>(
        &mut self,
        catalog: GridCatalog,
        overlay: Option<CoverageOverlay>,
        sink: &mut S,
    ) -> Result<(), ExplorerError> {
        self.ensure_live()?;
        if self.highlighted.take().is_some() {
            sink.clear_highlight();
        }
        self.generation += 1;
        self.index = SearchIndex::build(&catalog).with_limit(self.config.search_limit);
        self.catalog = catalog;
        self.overlay_dirty = overlay.is_some();
        self.overlay = overlay;
        self.highlight_clear.cancel();
        self.last_pass = None;
        self.results = SearchResults::NoQuery;
        info!(
            generation = self.generation,
            features = self.catalog.len(),
            "explore session reloaded"
        );
        Ok(())
    }

    /// Unsubscribes from `bus`, drops every timer and render state. Later
    /// calls fail with [`ExplorerError::Disposed`]; events are ignored.
    pub fn dispose(&mut self, bus: &mut EventBus<MapEvent>) {
        if self.disposed {
            return;
        }
        for id in self.listeners.drain(..) {
            bus.unsubscribe(id);
        }
        self.recompute.cancel();
        self.highlight_clear.cancel();
        self.highlighted = None;
        self.last_pass = None;
        self.placer.reset();
        self.results = SearchResults::NoQuery;
        self.generation += 1;
        self.disposed = true;
        info!(generation = self.generation, "explore session disposed");
    }

    fn ensure_live(&self) -> Result<(), ExplorerError> {
        if self.disposed {
            Err(ExplorerError::Disposed)
        } else {
            Ok(())
        }
    }

    pub fn catalog(&self) -> &GridCatalog {
        &self.catalog
    }

    pub fn overlay(&self) -> Option<&CoverageOverlay> {
        self.overlay.as_ref()
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn base_layer(&self) -> &BaseLayer {
        self.coverage.base_layer()
    }

    pub fn last_pass(&self) -> Option<&RenderPass> {
        self.last_pass.as_ref()
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn highlighted(&self) -> Option<FeatureId> {
        self.highlighted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Earliest instant at which [`ViewportSession::poll`] has work to do.
    pub fn next_due(&self) -> Option<Millis> {
        match (self.recompute.due(), self.highlight_clear.due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
