//! voyage - plan a multi-stop journey and render it onto an in-memory map.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use voyage_core::{
    format_distance, format_duration, PropertyInfo, RouteSummary, TransportMode, Waypoint,
};
use voyage_planner::{Config, MemorySurface, RouteAggregator, RouteRenderer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transport mode: walking, car, truck, drone, ship or plane
    #[arg(long, default_value = "car")]
    mode: TransportMode,

    /// Waypoint as "lat,lon"; repeat in travel order
    #[arg(long = "waypoint", value_parser = parse_waypoint)]
    waypoints: Vec<Waypoint>,

    /// JSON file with parcel metadata for marker annotation
    #[arg(long)]
    properties: Option<PathBuf>,

    /// Write drawn artifacts as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Skip every external service
    #[arg(long)]
    offline: bool,

    /// JSON log output
    #[arg(long)]
    json: bool,
}

fn parse_waypoint(raw: &str) -> Result<Waypoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got {raw:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude in {raw:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("bad longitude in {raw:?}"))?;
    Waypoint::new(lat, lon).map_err(|err| err.to_string())
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("voyage_planner=info"))?;
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json)?;

    let properties: Vec<PropertyInfo> = match &args.properties {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Vec::new(),
    };

    let config = if args.offline {
        Config::offline()
    } else {
        Config::from_env()
    };
    let aggregator = Arc::new(RouteAggregator::from_config(&config)?);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut renderer = RouteRenderer::new(
        MemorySurface::new(),
        aggregator,
        Arc::new(move |summary: Option<RouteSummary>| {
            let _ = tx.send(summary);
        }),
    );

    renderer
        .update(args.waypoints.clone(), args.mode, properties)
        .finished()
        .await;

    let Ok(summary) = rx.try_recv() else {
        bail!("route cycle finished without a summary");
    };

    match &summary {
        Some(summary) => tracing::info!(
            "Route: {} in {} over {} segment(s){}",
            format_distance(summary.total_distance_m),
            format_duration(summary.total_time_s),
            summary.segments.len(),
            if summary.is_multi_modal { " (multi-modal)" } else { "" }
        ),
        None => tracing::info!("Fewer than two waypoints; nothing to plan"),
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = &args.geojson {
        let geojson = renderer.with_surface(MemorySurface::to_geojson);
        std::fs::write(path, serde_json::to_string_pretty(&geojson)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote artifacts to {}", path.display());
    }

    Ok(())
}
