//! Ports to external services and their live HTTP adapters.
//!
//! Everything above this module talks to the outside world through the
//! traits defined here, so tests can swap in deterministic doubles.

pub mod directions;
pub mod overpass;
pub mod water;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use voyage_core::{HubType, RoadProfile, Waypoint};

pub use directions::DirectionsClient;
pub use overpass::OverpassClient;
pub use water::{IsItWaterProbe, OnWaterProbe};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider HTTP {0}")]
    Status(u16),
    #[error("malformed provider response: {0}")]
    Decode(String),
    #[error("{0} credentials missing")]
    MissingCredentials(&'static str),
    #[error("{0} endpoint not configured")]
    NotConfigured(&'static str),
    #[error("provider timed out")]
    Timeout,
    #[error("no route found")]
    NoRoute,
}

/// Road route for one ground leg.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadRoute {
    pub polyline: Vec<Waypoint>,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// Raw hub element before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct HubCandidate {
    pub lat: f64,
    pub lon: f64,
    pub tags: HashMap<String, String>,
}

/// Directions service. One attempt per call; retry policy belongs to the caller.
#[async_trait]
pub trait RoadRouter: Send + Sync {
    async fn route(
        &self,
        profile: RoadProfile,
        from: Waypoint,
        to: Waypoint,
        alternatives: bool,
    ) -> Result<RoadRoute, ProviderError>;
}

/// Geodata tag-query service.
#[async_trait]
pub trait HubSource: Send + Sync {
    async fn query_hubs(
        &self,
        hub_type: HubType,
        center: Waypoint,
        radius_m: f64,
    ) -> Result<Vec<HubCandidate>, ProviderError>;
}
