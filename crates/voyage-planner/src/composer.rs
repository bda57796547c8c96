//! Per-leg route composition.
//!
//! Decides whether a leg can be travelled directly or has to be split into
//! ground -> sea -> ground around a pair of ports.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use voyage_core::{
    format_distance, haversine_distance, HubType, RoadProfile, RouteSegment, TransportHub,
    TransportMode, Waypoint,
};

use crate::hubs::HubLocator;
use crate::providers::{ProviderError, RoadRoute, RoadRouter};
use crate::water::CrossingDetector;

/// Water-crossing legs shorter than this are not worth a port detour.
pub const COMPOSITE_MIN_LEG_M: f64 = 50_000.0;
pub const PORT_SEARCH_RADIUS_M: f64 = 200_000.0;
/// Access legs to or from a port shorter than this are skipped.
pub const PORT_ACCESS_MIN_M: f64 = 1_000.0;

pub const REASON_ROUTING_UNAVAILABLE: &str = "routing unavailable";
pub const REASON_NO_PORTS: &str = "no suitable ports found";

#[derive(Debug, Clone, Copy)]
pub struct ComposerOptions {
    /// Upper bound on a single directions call.
    pub request_timeout: Duration,
    pub allow_alternatives: bool,
}

pub struct RouteComposer {
    roads: Arc<dyn RoadRouter>,
    hubs: Arc<HubLocator>,
    water: Arc<dyn CrossingDetector>,
    options: ComposerOptions,
}

impl RouteComposer {
    pub fn new(
        roads: Arc<dyn RoadRouter>,
        hubs: Arc<HubLocator>,
        water: Arc<dyn CrossingDetector>,
        options: ComposerOptions,
    ) -> Self {
        Self {
            roads,
            hubs,
            water,
            options,
        }
    }

    /// Segments for one leg, in travel order.
    pub async fn compose_leg(
        &self,
        origin: Waypoint,
        destination: Waypoint,
        mode: TransportMode,
    ) -> Vec<RouteSegment> {
        let Some(profile) = mode.road_profile() else {
            return vec![RouteSegment::direct(
                mode,
                origin,
                destination,
                format!("Direct {mode} line"),
                None,
            )];
        };

        if !self.water.crosses_water(origin, destination).await {
            let description = format!("{} route", mode.label());
            return vec![self.ground_segment(mode, profile, origin, destination, description).await];
        }

        let leg_distance_m = haversine_distance(origin.lat, origin.lon, destination.lat, destination.lon);
        if leg_distance_m <= COMPOSITE_MIN_LEG_M {
            tracing::debug!(
                "Water crossing over {} too short for a port detour",
                format_distance(leg_distance_m)
            );
            let description = format!("{} route", mode.label());
            return vec![self.ground_segment(mode, profile, origin, destination, description).await];
        }

        self.compose_via_ports(origin, destination, mode, profile).await
    }

    async fn compose_via_ports(
        &self,
        origin: Waypoint,
        destination: Waypoint,
        mode: TransportMode,
        profile: RoadProfile,
    ) -> Vec<RouteSegment> {
        let (origin_port, destination_port) = tokio::join!(
            self.hubs.best_hub(origin, PORT_SEARCH_RADIUS_M, HubType::Port),
            self.hubs.best_hub(destination, PORT_SEARCH_RADIUS_M, HubType::Port),
        );
        let (Some(origin_port), Some(destination_port)) = (origin_port, destination_port) else {
            tracing::info!("No ports around leg {:?} -> {:?}; using a direct line", origin, destination);
            return vec![RouteSegment::direct(
                mode,
                origin,
                destination,
                format!("Direct {mode} line"),
                Some(REASON_NO_PORTS),
            )];
        };
        tracing::debug!(
            "Sea leg via {} -> {}",
            origin_port.name,
            destination_port.name
        );

        let origin_port_at = origin_port.position();
        let destination_port_at = destination_port.position();

        let (first_mile, last_mile) = tokio::join!(
            self.access_segment(mode, profile, origin, &origin_port, AccessDirection::ToPort),
            self.access_segment(mode, profile, destination, &destination_port, AccessDirection::FromPort),
        );

        let mut segments = Vec::with_capacity(3);
        segments.extend(first_mile);
        if !origin_port_at.approx_eq(&destination_port_at, 1e-9) {
            segments.push(RouteSegment::direct(
                TransportMode::Ship,
                origin_port_at,
                destination_port_at,
                format!("Ship from {} to {}", origin_port.name, destination_port.name),
                None,
            ));
        }
        segments.extend(last_mile);

        if segments.is_empty() {
            segments.push(RouteSegment::direct(
                mode,
                origin,
                destination,
                format!("Direct {mode} line"),
                None,
            ));
        }
        segments
    }

    async fn access_segment(
        &self,
        mode: TransportMode,
        profile: RoadProfile,
        endpoint: Waypoint,
        port: &TransportHub,
        direction: AccessDirection,
    ) -> Option<RouteSegment> {
        let port_at = port.position();
        let gap_m = haversine_distance(endpoint.lat, endpoint.lon, port_at.lat, port_at.lon);
        if gap_m <= PORT_ACCESS_MIN_M {
            return None;
        }
        let segment = match direction {
            AccessDirection::ToPort => {
                let description = format!("{} to {}", mode.label(), port.name);
                self.ground_segment(mode, profile, endpoint, port_at, description).await
            }
            AccessDirection::FromPort => {
                let description = format!("{} from {}", mode.label(), port.name);
                self.ground_segment(mode, profile, port_at, endpoint, description).await
            }
        };
        Some(segment)
    }

    /// Road route, or a straight line tagged with the fallback reason.
    async fn ground_segment(
        &self,
        mode: TransportMode,
        profile: RoadProfile,
        from: Waypoint,
        to: Waypoint,
        description: String,
    ) -> RouteSegment {
        match self.road_route(profile, from, to).await {
            Ok(route) => RouteSegment {
                mode,
                distance_m: route.distance_m,
                time_s: route.duration_s,
                description,
                polyline: route.polyline,
                reason: None,
            },
            Err(err) => {
                match &err {
                    ProviderError::MissingCredentials(_) | ProviderError::NotConfigured(_) => {
                        tracing::debug!("Road routing skipped: {}", err)
                    }
                    _ => tracing::warn!("Road routing failed, using direct line: {}", err),
                }
                RouteSegment::direct(
                    mode,
                    from,
                    to,
                    format!("Direct {mode} line"),
                    Some(REASON_ROUTING_UNAVAILABLE),
                )
            }
        }
    }

    async fn road_route(
        &self,
        profile: RoadProfile,
        from: Waypoint,
        to: Waypoint,
    ) -> Result<RoadRoute, ProviderError> {
        let route = timeout(
            self.options.request_timeout,
            self.roads
                .route(profile, from, to, self.options.allow_alternatives),
        )
        .await
        .unwrap_or(Err(ProviderError::Timeout))?;

        if route.polyline.len() <= 2 {
            return Err(ProviderError::NoRoute);
        }
        Ok(route)
    }
}

#[derive(Debug, Clone, Copy)]
enum AccessDirection {
    ToPort,
    FromPort,
}
