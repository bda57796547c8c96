//! Transport modes and the speed model.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 20 knots.
const SHIP_SPEED_MPS: f64 = 10.3;
const PLANE_SPEED_MPS: f64 = 250.0;
const DRONE_SPEED_MPS: f64 = 25.0;
/// 60 km/h.
const CAR_SPEED_MPS: f64 = 60.0 / 3.6;
/// 50 km/h.
const TRUCK_SPEED_MPS: f64 = 50.0 / 3.6;
const WALKING_SPEED_MPS: f64 = 1.5;

/// How a journey leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walking,
    Car,
    Truck,
    Drone,
    Ship,
    Plane,
}

/// Profile understood by the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadProfile {
    Driving,
    Walking,
}

impl RoadProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
        }
    }
}

impl TransportMode {
    pub const ALL: [TransportMode; 6] = [
        Self::Walking,
        Self::Car,
        Self::Truck,
        Self::Drone,
        Self::Ship,
        Self::Plane,
    ];

    /// Average cruise speed in meters per second.
    pub fn speed_mps(self) -> f64 {
        match self {
            Self::Ship => SHIP_SPEED_MPS,
            Self::Plane => PLANE_SPEED_MPS,
            Self::Drone => DRONE_SPEED_MPS,
            Self::Car => CAR_SPEED_MPS,
            Self::Truck => TRUCK_SPEED_MPS,
            Self::Walking => WALKING_SPEED_MPS,
        }
    }

    /// Modes that have to follow the road network.
    pub fn is_ground_bound(self) -> bool {
        matches!(self, Self::Walking | Self::Car | Self::Truck)
    }

    /// Directions profile for ground-bound modes, `None` for the rest.
    pub fn road_profile(self) -> Option<RoadProfile> {
        match self {
            Self::Walking => Some(RoadProfile::Walking),
            Self::Car | Self::Truck => Some(RoadProfile::Driving),
            Self::Drone | Self::Ship | Self::Plane => None,
        }
    }

    /// Seconds needed to cover `distance_m` at this mode's speed.
    pub fn travel_time_s(self, distance_m: f64) -> f64 {
        distance_m / self.speed_mps()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Car => "car",
            Self::Truck => "truck",
            Self::Drone => "drone",
            Self::Ship => "ship",
            Self::Plane => "plane",
        }
    }

    /// Capitalised label used in segment descriptions.
    pub fn label(self) -> &'static str {
        match self {
            Self::Walking => "Walking",
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Drone => "Drone",
            Self::Ship => "Ship",
            Self::Plane => "Plane",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == needle)
            .ok_or_else(|| CoreError::UnknownMode(s.to_string()))
    }
}

/// Speed lookup by mode name. Unknown names travel at walking speed.
pub fn speed_for_name(name: &str) -> f64 {
    name.parse::<TransportMode>()
        .map(TransportMode::speed_mps)
        .unwrap_or(WALKING_SPEED_MPS)
}
