//! Drives the composer over every leg and merges the result.

use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use voyage_core::{RouteSummary, TransportMode, Waypoint};

use crate::composer::{ComposerOptions, RouteComposer};
use crate::config::Config;
use crate::hubs::HubLocator;
use crate::providers::{DirectionsClient, OverpassClient, ProviderError};
use crate::water::WaterDetector;

pub struct RouteAggregator {
    composer: RouteComposer,
}

impl RouteAggregator {
    pub fn new(composer: RouteComposer) -> Self {
        Self { composer }
    }

    /// Wire the live HTTP adapters from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        let roads = Arc::new(DirectionsClient::new(client.clone(), config));
        let hubs = Arc::new(HubLocator::new(
            Arc::new(OverpassClient::new(client.clone(), config)),
            config,
        ));
        let water = Arc::new(WaterDetector::from_config(client, config));
        let composer = RouteComposer::new(
            roads,
            hubs,
            water,
            ComposerOptions {
                request_timeout: config.request_timeout(),
                allow_alternatives: config.directions_alternatives,
            },
        );
        Ok(Self::new(composer))
    }

    /// Plan the whole journey. `None` for fewer than two waypoints.
    ///
    /// Legs are composed concurrently; segments are concatenated in leg
    /// order regardless of which leg finished first.
    pub async fn plan(&self, waypoints: &[Waypoint], mode: TransportMode) -> Option<RouteSummary> {
        if waypoints.len() < 2 {
            return None;
        }

        let legs = waypoints
            .windows(2)
            .map(|pair| self.composer.compose_leg(pair[0], pair[1], mode));
        let segments: Vec<_> = join_all(legs).await.into_iter().flatten().collect();

        let summary = RouteSummary::from_segments(segments);
        tracing::info!(
            "Planned {} leg(s) by {}: {} segment(s), {:.0} m, {:.0} s",
            waypoints.len() - 1,
            mode,
            summary.segments.len(),
            summary.total_distance_m,
            summary.total_time_s
        );
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_plan_is_complete_and_degraded() {
        let aggregator = RouteAggregator::from_config(&Config::offline()).unwrap();
        let waypoints = [
            Waypoint { lat: 48.8566, lon: 2.3522 },
            Waypoint { lat: 50.8503, lon: 4.3517 },
            Waypoint { lat: 52.3676, lon: 4.9041 },
        ];
        let summary = aggregator.plan(&waypoints, TransportMode::Car).await.unwrap();
        assert_eq!(summary.segments.len(), 2);
        assert!(summary.segments.iter().all(|s| s.reason.is_some()));
        assert!(!summary.is_multi_modal);
    }

    #[tokio::test]
    async fn single_waypoint_is_none() {
        let aggregator = RouteAggregator::from_config(&Config::offline()).unwrap();
        let waypoints = [Waypoint { lat: 34.0, lon: -118.0 }];
        assert!(aggregator.plan(&waypoints, TransportMode::Car).await.is_none());
        assert!(aggregator.plan(&[], TransportMode::Plane).await.is_none());
    }
}
