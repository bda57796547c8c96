//! Transport hub lookup with ranking and a short-lived cache.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use voyage_core::{haversine_distance, hub_display_name, rank_hubs, score_hub, HubType, TransportHub, Waypoint};

use crate::cache::{self, CacheEntry};
use crate::config::Config;
use crate::providers::{HubSource, ProviderError};

#[derive(Debug, Clone)]
struct HubCacheEntry {
    fetched_at: Instant,
    hubs: Vec<TransportHub>,
}

impl CacheEntry for HubCacheEntry {
    fn fetched_at(&self) -> Instant {
        self.fetched_at
    }
}

pub struct HubLocator {
    source: Arc<dyn HubSource>,
    cache: DashMap<String, HubCacheEntry>,
    cache_ttl: Duration,
    cache_max_entries: usize,
    request_timeout: Duration,
}

impl HubLocator {
    pub fn new(source: Arc<dyn HubSource>, config: &Config) -> Self {
        Self {
            source,
            cache: DashMap::new(),
            cache_ttl: config.hub_cache_ttl(),
            cache_max_entries: config.hub_cache_max_entries.max(1),
            request_timeout: config.request_timeout(),
        }
    }

    /// Up to ten hubs of `hub_type` around `center`, best first.
    ///
    /// Provider failures yield an empty list and are not cached.
    pub async fn find_hubs(
        &self,
        center: Waypoint,
        radius_m: f64,
        hub_type: HubType,
    ) -> Vec<TransportHub> {
        let cache_key = hub_cache_key(hub_type, center, radius_m);
        if let Some(entry) = self.cache.get(&cache_key) {
            if entry.fetched_at.elapsed() <= self.cache_ttl {
                return entry.hubs.clone();
            }
        }

        let candidates = match timeout(
            self.request_timeout,
            self.source.query_hubs(hub_type, center, radius_m),
        )
        .await
        .unwrap_or(Err(ProviderError::Timeout))
        {
            Ok(candidates) => candidates,
            Err(err) => {
                match &err {
                    ProviderError::MissingCredentials(_) | ProviderError::NotConfigured(_) => {
                        tracing::debug!("{} lookup skipped: {}", hub_type, err)
                    }
                    _ => tracing::warn!("{} lookup near {:?} failed: {}", hub_type, center, err),
                }
                return Vec::new();
            }
        };

        let hubs = rank_hubs(
            candidates
                .into_iter()
                .map(|candidate| {
                    let distance_m =
                        haversine_distance(center.lat, center.lon, candidate.lat, candidate.lon);
                    TransportHub {
                        name: hub_display_name(&candidate.tags, hub_type),
                        lat: candidate.lat,
                        lon: candidate.lon,
                        hub_type,
                        importance: score_hub(hub_type, &candidate.tags, distance_m, radius_m),
                    }
                })
                .collect(),
        );
        tracing::debug!("Found {} {} hub(s) near {:?}", hubs.len(), hub_type, center);

        self.cache.insert(
            cache_key,
            HubCacheEntry {
                fetched_at: Instant::now(),
                hubs: hubs.clone(),
            },
        );
        let evicted = cache::prune_cache(&self.cache, self.cache_max_entries, self.cache_ttl);
        if evicted > 0 {
            tracing::debug!("Evicted {} stale hub lookup(s)", evicted);
        }
        hubs
    }

    /// Best-ranked hub, if any.
    pub async fn best_hub(
        &self,
        center: Waypoint,
        radius_m: f64,
        hub_type: HubType,
    ) -> Option<TransportHub> {
        self.find_hubs(center, radius_m, hub_type)
            .await
            .into_iter()
            .next()
    }
}

fn hub_cache_key(hub_type: HubType, center: Waypoint, radius_m: f64) -> String {
    format!(
        "hubs:{}:{:.4}:{:.4}:{:.0}",
        hub_type, center.lat, center.lon, radius_m
    )
}
