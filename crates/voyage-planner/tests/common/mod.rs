//! Deterministic stand-ins for the external services.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use voyage_core::{haversine_distance, HubType, RoadProfile, RouteSummary, Waypoint};
use voyage_planner::providers::{HubCandidate, HubSource, ProviderError, RoadRoute, RoadRouter};
use voyage_planner::{
    ComposerOptions, Config, CrossingDetector, HubLocator, RouteAggregator, RouteComposer,
};

pub fn wp(lat: f64, lon: f64) -> Waypoint {
    Waypoint { lat, lon }
}

pub fn straight_line_m(a: Waypoint, b: Waypoint) -> f64 {
    haversine_distance(a.lat, a.lon, b.lat, b.lon)
}

/// Directions double: a three-point route 20% longer than the straight line.
pub struct MockRoads {
    calls: AtomicUsize,
    fail: bool,
    delays: Vec<(Waypoint, Duration)>,
}

impl MockRoads {
    pub fn working() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
            delays: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::working()
        }
    }

    /// Delay every call whose origin is `origin`.
    pub fn delay_from(mut self, origin: Waypoint, delay: Duration) -> Self {
        self.delays.push((origin, delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoadRouter for MockRoads {
    async fn route(
        &self,
        profile: RoadProfile,
        from: Waypoint,
        to: Waypoint,
        _alternatives: bool,
    ) -> Result<RoadRoute, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((_, delay)) = self.delays.iter().find(|(origin, _)| origin.approx_eq(&from, 1e-9)) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            return Err(ProviderError::Status(503));
        }
        let distance_m = straight_line_m(from, to) * 1.2;
        let speed = match profile {
            RoadProfile::Driving => 15.0,
            RoadProfile::Walking => 1.4,
        };
        let middle = wp((from.lat + to.lat) / 2.0, (from.lon + to.lon) / 2.0);
        Ok(RoadRoute {
            polyline: vec![from, middle, to],
            distance_m,
            duration_s: distance_m / speed,
        })
    }
}

/// Port double: every registered port within the search radius is returned.
pub struct MockHubs {
    calls: AtomicUsize,
    ports: Vec<(String, Waypoint)>,
    hang: bool,
}

impl MockHubs {
    pub fn new(ports: &[(&str, Waypoint)]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            ports: ports
                .iter()
                .map(|(name, at)| (name.to_string(), *at))
                .collect(),
            hang: false,
        }
    }

    /// Never answers within any sane timeout.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new(&[])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HubSource for MockHubs {
    async fn query_hubs(
        &self,
        _hub_type: HubType,
        center: Waypoint,
        radius_m: f64,
    ) -> Result<Vec<HubCandidate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Ok(self
            .ports
            .iter()
            .filter(|(_, at)| straight_line_m(center, *at) <= radius_m)
            .map(|(name, at)| HubCandidate {
                lat: at.lat,
                lon: at.lon,
                tags: HashMap::from([
                    ("name".to_string(), name.clone()),
                    ("harbour".to_string(), "yes".to_string()),
                ]),
            })
            .collect())
    }
}

/// Water double: listed legs cross water, or every leg when `everywhere`.
pub struct MockWater {
    calls: AtomicUsize,
    everywhere: bool,
    crossings: Vec<(Waypoint, Waypoint)>,
}

impl MockWater {
    pub fn dry() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            everywhere: false,
            crossings: Vec::new(),
        }
    }

    pub fn everywhere() -> Self {
        Self {
            everywhere: true,
            ..Self::dry()
        }
    }

    pub fn crossing(legs: &[(Waypoint, Waypoint)]) -> Self {
        Self {
            crossings: legs.to_vec(),
            ..Self::dry()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CrossingDetector for MockWater {
    async fn crosses_water(&self, from: Waypoint, to: Waypoint) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.everywhere
            || self
                .crossings
                .iter()
                .any(|(a, b)| a.approx_eq(&from, 1e-9) && b.approx_eq(&to, 1e-9))
    }
}

pub struct Harness {
    pub roads: Arc<MockRoads>,
    pub hubs: Arc<MockHubs>,
    pub water: Arc<MockWater>,
    pub aggregator: Arc<RouteAggregator>,
}

impl Harness {
    pub fn new(roads: MockRoads, hubs: MockHubs, water: MockWater) -> Self {
        Self::with_timeout(roads, hubs, water, Duration::from_secs(10))
    }

    pub fn with_timeout(
        roads: MockRoads,
        hubs: MockHubs,
        water: MockWater,
        request_timeout: Duration,
    ) -> Self {
        let roads = Arc::new(roads);
        let hubs = Arc::new(hubs);
        let water = Arc::new(water);
        let config = Config::offline();
        let composer = RouteComposer::new(
            roads.clone(),
            Arc::new(HubLocator::new(hubs.clone(), &config)),
            water.clone(),
            ComposerOptions {
                request_timeout,
                allow_alternatives: false,
            },
        );
        Self {
            roads,
            hubs,
            water,
            aggregator: Arc::new(RouteAggregator::new(composer)),
        }
    }

    pub fn external_calls(&self) -> usize {
        self.roads.calls() + self.hubs.calls() + self.water.calls()
    }
}

pub fn assert_totals(summary: &RouteSummary) {
    let distance: f64 = summary.segments.iter().map(|s| s.distance_m).sum();
    let time: f64 = summary.segments.iter().map(|s| s.time_s).sum();
    assert!((summary.total_distance_m - distance).abs() < 1e-6);
    assert!((summary.total_time_s - time).abs() < 1e-6);
}
