//! Rendering lifecycle for route artifacts.
//!
//! The renderer is the only writer of route artifacts on its surface. Every
//! trigger tears the previous cycle down before anything new is computed,
//! and a cycle only draws if no newer trigger arrived while it was running.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::{AbortHandle, JoinHandle};
use voyage_core::{Bounds, PropertyInfo, RouteSummary, TransportMode, Waypoint};

use super::surface::MapSurface;
use super::{segment_artifact, waypoint_artifacts, ArtifactId, ROUTE_TAG};
use crate::aggregator::RouteAggregator;

/// Receives exactly one value per completed cycle.
///
/// Runs with the render state locked, so it must not call back into the
/// `RouteRenderer`; hand the summary off (a channel, a task) instead.
pub type SummaryCallback = Arc<dyn Fn(Option<RouteSummary>) + Send + Sync>;

struct RenderState<S> {
    surface: S,
    owned: Vec<ArtifactId>,
    generation: u64,
}

impl<S: MapSurface> RenderState<S> {
    fn clear(&mut self) {
        for id in std::mem::take(&mut self.owned) {
            self.surface.remove(id);
        }
        let orphans = self.surface.tagged(ROUTE_TAG);
        if !orphans.is_empty() {
            tracing::warn!("Sweeping {} orphaned route artifact(s)", orphans.len());
            for id in orphans {
                self.surface.remove(id);
            }
        }
    }

    fn draw(&mut self, summary: &RouteSummary, waypoints: &[Waypoint], properties: &[PropertyInfo]) {
        let artifacts = summary
            .segments
            .iter()
            .map(segment_artifact)
            .chain(waypoint_artifacts(waypoints, properties));

        let mut points = Vec::new();
        for artifact in artifacts {
            points.extend_from_slice(artifact.points());
            let id = self.surface.add(artifact);
            self.owned.push(id);
        }
        if let Some(bounds) = Bounds::from_points(points.iter()) {
            self.surface.fit_bounds(bounds);
        }
    }
}

/// A started cycle.
pub struct Cycle {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Cycle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait until the cycle has drawn, been dropped as stale, or been aborted.
    pub async fn finished(self) {
        if let Some(handle) = self.handle {
            let _ = handle.await;
        }
    }
}

pub struct RouteRenderer<S: MapSurface> {
    state: Arc<Mutex<RenderState<S>>>,
    aggregator: Arc<RouteAggregator>,
    on_summary: SummaryCallback,
    in_flight: Option<AbortHandle>,
}

impl<S: MapSurface> RouteRenderer<S> {
    pub fn new(surface: S, aggregator: Arc<RouteAggregator>, on_summary: SummaryCallback) -> Self {
        Self {
            state: Arc::new(Mutex::new(RenderState {
                surface,
                owned: Vec::new(),
                generation: 0,
            })),
            aggregator,
            on_summary,
            in_flight: None,
        }
    }

    /// Start a new cycle for `waypoints` travelled by `mode`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn update(
        &mut self,
        waypoints: Vec<Waypoint>,
        mode: TransportMode,
        properties: Vec<PropertyInfo>,
    ) -> Cycle {
        let generation = self.invalidate();

        if waypoints.len() < 2 {
            (self.on_summary)(None);
            return Cycle {
                generation,
                handle: None,
            };
        }

        tracing::info!(
            "Route cycle {} started: {} waypoint(s) by {}",
            generation,
            waypoints.len(),
            mode
        );
        let state = Arc::clone(&self.state);
        let aggregator = Arc::clone(&self.aggregator);
        let on_summary = Arc::clone(&self.on_summary);
        let handle = tokio::spawn(async move {
            let summary = aggregator.plan(&waypoints, mode).await;

            let mut state = lock(&state);
            if state.generation != generation {
                tracing::debug!("Route cycle {} superseded; result dropped", generation);
                return;
            }
            if let Some(summary) = &summary {
                state.draw(summary, &waypoints, &properties);
            }
            // Still locked: no newer cycle can clear between draw and report.
            on_summary(summary);
        });
        self.in_flight = Some(handle.abort_handle());

        Cycle {
            generation,
            handle: Some(handle),
        }
    }

    /// Remove everything this renderer drew and cancel any running cycle.
    pub fn teardown(&mut self) {
        self.invalidate();
    }

    pub fn owned_count(&self) -> usize {
        lock(&self.state).owned.len()
    }

    pub fn generation(&self) -> u64 {
        lock(&self.state).generation
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.state).surface)
    }

    /// Mutable access for host-side changes outside the route layer.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut lock(&self.state).surface)
    }

    fn invalidate(&mut self) -> u64 {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        let mut state = lock(&self.state);
        state.generation += 1;
        state.clear();
        state.generation
    }
}

impl<S: MapSurface> Drop for RouteRenderer<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn lock<S>(state: &Mutex<RenderState<S>>) -> MutexGuard<'_, RenderState<S>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
