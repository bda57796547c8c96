//! Spherical geometry helpers.

use crate::models::Waypoint;
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters (Haversine formula).
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// `count` points evenly spaced on the straight lat/lon line between
/// `from` and `to`, endpoints excluded.
pub fn interior_samples(from: Waypoint, to: Waypoint, count: usize) -> Vec<Waypoint> {
    let steps = (count + 1) as f64;
    (1..=count)
        .map(|i| {
            let t = i as f64 / steps;
            Waypoint {
                lat: from.lat + (to.lat - from.lat) * t,
                lon: from.lon + (to.lon - from.lon) * t,
            }
        })
        .collect()
}

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Smallest box holding every finite point; `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Waypoint>) -> Option<Self> {
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        for point in points {
            if !point.lat.is_finite() || !point.lon.is_finite() {
                continue;
            }
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
            min_lon = min_lon.min(point.lon);
            max_lon = max_lon.max(point.lon);
        }
        if !min_lat.is_finite() || !min_lon.is_finite() {
            return None;
        }
        Some(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    pub fn contains(&self, point: &Waypoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }
}
