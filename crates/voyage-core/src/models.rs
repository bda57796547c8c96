//! Core data models for journey planning.

use crate::error::CoreError;
use crate::hubs::HubType;
use crate::mode::TransportMode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A geographic point. Used both for user waypoints and polyline vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
}

impl Waypoint {
    /// Build a validated waypoint.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if !valid {
            return Err(CoreError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Same point within `epsilon_deg` on both axes.
    pub fn approx_eq(&self, other: &Waypoint, epsilon_deg: f64) -> bool {
        (self.lat - other.lat).abs() <= epsilon_deg && (self.lon - other.lon).abs() <= epsilon_deg
    }
}

/// A named transport facility returned by the hub search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportHub {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub hub_type: HubType,
    /// Ranking score (tag bonuses plus distance decay).
    pub importance: f64,
}

impl TransportHub {
    pub fn position(&self) -> Waypoint {
        Waypoint {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// One mode-homogeneous piece of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub mode: TransportMode,
    pub distance_m: f64,
    pub time_s: f64,
    pub description: String,
    pub polyline: Vec<Waypoint>,
    /// Set when the segment is a degraded straight line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RouteSegment {
    /// Straight-line segment timed with the mode's speed.
    pub fn direct(
        mode: TransportMode,
        from: Waypoint,
        to: Waypoint,
        description: impl Into<String>,
        reason: Option<&str>,
    ) -> Self {
        let distance_m = crate::spatial::haversine_distance(from.lat, from.lon, to.lat, to.lon);
        Self {
            mode,
            distance_m,
            time_s: mode.travel_time_s(distance_m),
            description: description.into(),
            polyline: vec![from, to],
            reason: reason.map(str::to_string),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.reason.is_some()
    }

    pub fn start(&self) -> Option<Waypoint> {
        self.polyline.first().copied()
    }

    pub fn end(&self) -> Option<Waypoint> {
        self.polyline.last().copied()
    }
}

/// Result of one planning cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_distance_m: f64,
    pub total_time_s: f64,
    pub segments: Vec<RouteSegment>,
    pub is_multi_modal: bool,
}

impl RouteSummary {
    /// Sum the segments and derive the multi-modal flag.
    pub fn from_segments(segments: Vec<RouteSegment>) -> Self {
        let total_distance_m = segments.iter().map(|s| s.distance_m).sum();
        let total_time_s = segments.iter().map(|s| s.time_s).sum();
        let distinct_modes: HashSet<TransportMode> = segments.iter().map(|s| s.mode).collect();
        let is_multi_modal = segments.len() > 1 && distinct_modes.len() > 1;
        Self {
            total_distance_m,
            total_time_s,
            segments,
            is_multi_modal,
        }
    }
}

/// Optional parcel metadata shown on waypoint markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub tile_count: Option<u32>,
    #[serde(default)]
    pub landfield_tier: Option<u8>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl PropertyInfo {
    pub fn position(&self) -> Waypoint {
        Waypoint {
            lat: self.lat,
            lon: self.lon,
        }
    }
}
