//! Host map surface abstraction.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use voyage_core::Bounds;

use super::{Artifact, ArtifactId, ArtifactKind};

/// What the lifecycle manager needs from the host map.
pub trait MapSurface: Send + 'static {
    fn add(&mut self, artifact: Artifact) -> ArtifactId;
    /// Returns false when `id` was not on the surface.
    fn remove(&mut self, id: ArtifactId) -> bool;
    /// Ids of every artifact currently carrying `tag`.
    fn tagged(&self, tag: &str) -> Vec<ArtifactId>;
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// In-process surface used by the CLI and tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: ArtifactId,
    artifacts: BTreeMap<ArtifactId, Artifact>,
    view: Option<Bounds>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn view(&self) -> Option<Bounds> {
        self.view
    }

    /// Drawn artifacts as a GeoJSON FeatureCollection.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .artifacts
            .iter()
            .map(|(id, artifact)| match &artifact.kind {
                ArtifactKind::RouteLine(line) => json!({
                    "type": "Feature",
                    "id": id,
                    "geometry": {
                        "type": "LineString",
                        "coordinates": line
                            .polyline
                            .iter()
                            .map(|p| [p.lon, p.lat])
                            .collect::<Vec<_>>(),
                    },
                    "properties": {
                        "mode": line.mode,
                        "color": line.color,
                        "dashed": line.dashed,
                        "tooltip": line.tooltip,
                    },
                }),
                ArtifactKind::Marker(marker) => json!({
                    "type": "Feature",
                    "id": id,
                    "geometry": {
                        "type": "Point",
                        "coordinates": [marker.position.lon, marker.position.lat],
                    },
                    "properties": {
                        "label": marker.label,
                        "role": marker.role,
                        "color": marker.color,
                        "property": marker.property,
                    },
                }),
            })
            .collect();
        json!({ "type": "FeatureCollection", "features": features })
    }
}

impl MapSurface for MemorySurface {
    fn add(&mut self, artifact: Artifact) -> ArtifactId {
        self.next_id += 1;
        self.artifacts.insert(self.next_id, artifact);
        self.next_id
    }

    fn remove(&mut self, id: ArtifactId) -> bool {
        self.artifacts.remove(&id).is_some()
    }

    fn tagged(&self, tag: &str) -> Vec<ArtifactId> {
        self.artifacts
            .iter()
            .filter(|(_, artifact)| artifact.tag.as_deref() == Some(tag))
            .map(|(id, _)| *id)
            .collect()
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.view = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{waypoint_artifacts, ROUTE_TAG};
    use voyage_core::Waypoint;

    #[test]
    fn add_remove_and_tag_lookup() {
        let mut surface = MemorySurface::new();
        let markers = waypoint_artifacts(
            &[Waypoint { lat: 0.0, lon: 0.0 }, Waypoint { lat: 1.0, lon: 1.0 }],
            &[],
        );
        let ids: Vec<ArtifactId> = markers.into_iter().map(|m| surface.add(m)).collect();
        let mut foreign = surface
            .artifacts()
            .next()
            .cloned()
            .expect("artifact");
        foreign.tag = None;
        surface.add(foreign);

        assert_eq!(surface.len(), 3);
        assert_eq!(surface.tagged(ROUTE_TAG), ids);
        assert!(surface.remove(ids[0]));
        assert!(!surface.remove(ids[0]));
        assert_eq!(surface.len(), 2);
    }

    #[test]
    fn geojson_uses_lon_lat_order() {
        let mut surface = MemorySurface::new();
        for marker in waypoint_artifacts(
            &[Waypoint { lat: 10.0, lon: 20.0 }, Waypoint { lat: 11.0, lon: 21.0 }],
            &[],
        ) {
            surface.add(marker);
        }
        let geojson = surface.to_geojson();
        assert_eq!(geojson["type"], "FeatureCollection");
        assert_eq!(geojson["features"][0]["geometry"]["coordinates"], json!([20.0, 10.0]));
        assert_eq!(geojson["features"][1]["properties"]["label"], "B");
    }
}
