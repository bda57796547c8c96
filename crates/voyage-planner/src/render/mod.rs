//! Map artifacts and the surface they are drawn on.

pub mod lifecycle;
pub mod surface;

use serde::Serialize;
use voyage_core::{
    format_distance, format_duration, PropertyInfo, RouteSegment, TransportMode, Waypoint,
};

pub use lifecycle::{Cycle, RouteRenderer, SummaryCallback};
pub use surface::{MapSurface, MemorySurface};

/// Tag carried by every artifact this crate draws.
pub const ROUTE_TAG: &str = "voyage-route";

/// Coordinate match tolerance between waypoints and property metadata.
const PROPERTY_MATCH_EPSILON_DEG: f64 = 1e-6;

pub type ArtifactId = u64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    /// `None` for artifacts owned by someone else (base layers, user pins).
    pub tag: Option<String>,
    pub kind: ArtifactKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArtifactKind {
    RouteLine(RouteLine),
    Marker(WaypointMarker),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLine {
    pub mode: TransportMode,
    pub polyline: Vec<Waypoint>,
    pub color: &'static str,
    /// Degraded straight-line segments are drawn dashed.
    pub dashed: bool,
    pub tooltip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerRole {
    Start,
    Intermediate,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointMarker {
    pub position: Waypoint,
    pub label: String,
    pub role: MarkerRole,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyInfo>,
}

impl Artifact {
    pub fn points(&self) -> &[Waypoint] {
        match &self.kind {
            ArtifactKind::RouteLine(line) => &line.polyline,
            ArtifactKind::Marker(marker) => std::slice::from_ref(&marker.position),
        }
    }
}

fn mode_color(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Walking => "#16a34a",
        TransportMode::Car => "#2563eb",
        TransportMode::Truck => "#ea580c",
        TransportMode::Drone => "#db2777",
        TransportMode::Ship => "#0891b2",
        TransportMode::Plane => "#7c3aed",
    }
}

fn marker_color(role: MarkerRole) -> &'static str {
    match role {
        MarkerRole::Start => "#22c55e",
        MarkerRole::End => "#ef4444",
        MarkerRole::Intermediate => "#3b82f6",
    }
}

pub fn segment_artifact(segment: &RouteSegment) -> Artifact {
    let mut tooltip = format!(
        "{}: {} · {}",
        segment.mode.label(),
        format_distance(segment.distance_m),
        format_duration(segment.time_s)
    );
    if let Some(reason) = &segment.reason {
        tooltip.push_str(&format!(" ({reason})"));
    }
    Artifact {
        tag: Some(ROUTE_TAG.to_string()),
        kind: ArtifactKind::RouteLine(RouteLine {
            mode: segment.mode,
            polyline: segment.polyline.clone(),
            color: mode_color(segment.mode),
            dashed: segment.is_fallback(),
            tooltip,
        }),
    }
}

/// Markers labelled "A", "1", "2", ..., "B".
pub fn waypoint_artifacts(waypoints: &[Waypoint], properties: &[PropertyInfo]) -> Vec<Artifact> {
    let last = waypoints.len().saturating_sub(1);
    waypoints
        .iter()
        .enumerate()
        .map(|(index, position)| {
            let (role, label) = match index {
                0 => (MarkerRole::Start, "A".to_string()),
                i if i == last => (MarkerRole::End, "B".to_string()),
                i => (MarkerRole::Intermediate, i.to_string()),
            };
            let property = properties
                .iter()
                .find(|property| property.position().approx_eq(position, PROPERTY_MATCH_EPSILON_DEG))
                .cloned();
            Artifact {
                tag: Some(ROUTE_TAG.to_string()),
                kind: ArtifactKind::Marker(WaypointMarker {
                    position: *position,
                    label,
                    role,
                    color: marker_color(role),
                    property,
                }),
            }
        })
        .collect()
}
