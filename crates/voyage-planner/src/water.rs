//! Water crossing detection.
//!
//! Each interior sample of a leg runs through an ordered strategy chain;
//! the first strategy with an opinion wins, and the landmass boxes give the
//! final answer when none has one.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use voyage_core::{in_landmass_region, in_ocean_region, interior_samples, Waypoint};

use crate::config::Config;
use crate::providers::{IsItWaterProbe, OnWaterProbe};

/// Interior points tested per leg.
pub const WATER_SAMPLE_COUNT: usize = 10;

/// One link of the classification chain. `None` means "no opinion".
#[async_trait]
pub trait WaterStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn classify(&self, point: Waypoint) -> Option<bool>;
}

/// Whether the straight line between two points crosses significant water.
#[async_trait]
pub trait CrossingDetector: Send + Sync {
    async fn crosses_water(&self, from: Waypoint, to: Waypoint) -> bool;
}

/// Open-ocean rectangles. Only ever says "water".
pub struct OceanBoxes;

#[async_trait]
impl WaterStrategy for OceanBoxes {
    fn name(&self) -> &'static str {
        "ocean-boxes"
    }

    async fn classify(&self, point: Waypoint) -> Option<bool> {
        in_ocean_region(&point).map(|region| {
            tracing::trace!("Sample {:?} inside {}", point, region);
            true
        })
    }
}

pub struct WaterDetector {
    strategies: Vec<Arc<dyn WaterStrategy>>,
    strategy_timeout: Duration,
}

impl WaterDetector {
    pub fn new(strategies: Vec<Arc<dyn WaterStrategy>>, strategy_timeout: Duration) -> Self {
        Self {
            strategies,
            strategy_timeout,
        }
    }

    /// Ocean boxes, then both remote probes.
    pub fn from_config(client: Client, config: &Config) -> Self {
        let strategies: Vec<Arc<dyn WaterStrategy>> = vec![
            Arc::new(OceanBoxes),
            Arc::new(OnWaterProbe::new(client.clone(), config)),
            Arc::new(IsItWaterProbe::new(client, config)),
        ];
        Self::new(strategies, config.request_timeout())
    }

    pub async fn is_water(&self, point: Waypoint) -> bool {
        for strategy in &self.strategies {
            match timeout(self.strategy_timeout, strategy.classify(point)).await {
                Ok(Some(water)) => return water,
                Ok(None) => {}
                Err(_) => {
                    tracing::warn!("Water strategy {} timed out", strategy.name());
                }
            }
        }
        !in_landmass_region(&point)
    }
}

#[async_trait]
impl CrossingDetector for WaterDetector {
    async fn crosses_water(&self, from: Waypoint, to: Waypoint) -> bool {
        for sample in interior_samples(from, to, WATER_SAMPLE_COUNT) {
            if self.is_water(sample).await {
                tracing::debug!("Leg {:?} -> {:?} crosses water near {:?}", from, to, sample);
                return true;
            }
        }
        false
    }
}
