mod map;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use explorer::{ExplorerConfig, ExplorerError, RenderPass, SearchResults, ViewportSession};
use formats::coverage::{CoverageOverlay, load_coverage_overlay};
use formats::geojson::LoadReport;
use formats::grid_catalog::load_grid_catalog;
use foundation::bounds::GeoBounds;
use layers::coverage::{BaseLayer, CoverageStyle};
use scene::catalog::GridCatalog;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::map::StaticMap;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid tile explorer: visibility, level of detail, labels and search")]
struct Args {
    /// JSON file with explorer settings; GRID_* env vars override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the draw instructions for one viewport
    Render {
        /// Grid catalog (GeoJSON FeatureCollection)
        #[arg(long)]
        catalog: PathBuf,

        /// Optional coverage overlay (GeoJSON FeatureCollection)
        #[arg(long)]
        coverage: Option<PathBuf>,

        /// Viewport: south,west,north,east (west > east spans the antimeridian)
        #[arg(long, allow_hyphen_values = true)]
        bounds: String,

        #[arg(long)]
        zoom: f64,

        #[arg(long, default_value_t = 1024.0)]
        width: f64,

        #[arg(long, default_value_t = 768.0)]
        height: f64,

        /// Active base layer name ("satellite" switches the overlay preset)
        #[arg(long)]
        base_layer: Option<String>,
    },

    /// Search grid names (case-insensitive substring)
    Search {
        #[arg(long)]
        catalog: PathBuf,

        query: String,
    },
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    pass: &'a RenderPass,
    base_layer: &'a BaseLayer,
    overlay: Option<OverlayOutput>,
    catalog: &'a LoadReport,
    metrics: Vec<(&'static str, i64)>,
}

#[derive(Serialize)]
struct OverlayOutput {
    features: usize,
    style: Option<CoverageStyle>,
    on_top: bool,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    results: &'a SearchResults,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Render {
            catalog,
            coverage,
            bounds,
            zoom,
            width,
            height,
            base_layer,
        } => {
            let bounds = parse_bounds(&bounds)?;
            if !(width > 0.0 && height > 0.0) {
                return Err("--width and --height must be positive".to_string());
            }
            cmd_render(
                config,
                &catalog,
                coverage.as_deref(),
                StaticMap::new(bounds, zoom, width, height),
                base_layer.as_deref(),
            )
        }
        Command::Search { catalog, query } => cmd_search(config, &catalog, &query),
    }
}

fn cmd_render(
    config: ExplorerConfig,
    catalog_path: &Path,
    coverage_path: Option<&Path>,
    mut map: StaticMap,
    base_layer: Option<&str>,
) -> Result<(), String> {
    let (catalog, report) = read_catalog(catalog_path)?;
    let overlay = coverage_path.and_then(read_overlay);

    let mut session = ViewportSession::create(catalog, overlay, config);
    if let Some(name) = base_layer {
        session.on_base_layer_change(name);
    }
    session.render_now(&mut map).map_err(|e| e.to_string())?;
    let pass = map.drawn.as_ref().ok_or("render produced no pass")?;

    let output = RenderOutput {
        pass,
        base_layer: session.base_layer(),
        overlay: session.overlay().map(|o| OverlayOutput {
            features: o.len(),
            style: map.overlay_style,
            on_top: map.overlay_on_top,
        }),
        catalog: &report,
        metrics: session.metrics().summary(),
    };
    write_json(&output)
}

fn cmd_search(config: ExplorerConfig, catalog_path: &Path, query: &str) -> Result<(), String> {
    let (catalog, _) = read_catalog(catalog_path)?;
    let mut session = ViewportSession::create(catalog, None, config);
    let results = session.search(query).map_err(|e| e.to_string())?;
    write_json(&SearchOutput { query, results })
}

fn load_config(path: Option<&Path>) -> Result<ExplorerConfig, String> {
    let base = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
            ExplorerConfig::from_json_str(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => ExplorerConfig::default(),
    };
    Ok(base.with_env())
}

fn read_catalog(path: &Path) -> Result<(GridCatalog, LoadReport), String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read catalog {}: {e}", path.display()))?;
    let (catalog, report) =
        load_grid_catalog(&text).map_err(|e| ExplorerError::from(e).to_string())?;
    for skipped in &report.skipped {
        warn!(index = skipped.index, reason = %skipped.reason, "skipped catalog feature");
    }
    info!(loaded = report.loaded, skipped = report.skipped.len(), "catalog loaded");
    Ok((catalog, report))
}

/// The overlay is optional: any failure is logged and the overlay left out.
fn read_overlay(path: &Path) -> Option<CoverageOverlay> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("coverage overlay unavailable: {}: {err}", path.display());
            return None;
        }
    };
    match load_coverage_overlay(&text) {
        Ok((overlay, report)) => {
            if !report.skipped.is_empty() {
                warn!(skipped = report.skipped.len(), "coverage features skipped");
            }
            Some(overlay)
        }
        Err(err) => {
            warn!("coverage overlay unavailable: {}: {err}", path.display());
            None
        }
    }
}

fn parse_bounds(s: &str) -> Result<GeoBounds, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid --bounds {s:?}: {e}"))?;
    let &[south, west, north, east] = parts.as_slice() else {
        return Err(format!("--bounds needs south,west,north,east; got {s:?}"));
    };
    let bounds = GeoBounds::new(south, west, north, east);
    if !bounds.is_finite() || south > north {
        return Err(format!("--bounds out of range: {s:?}"));
    }
    Ok(bounds)
}

fn write_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{json}").map_err(|e| e.to_string())
}
