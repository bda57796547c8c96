//! Expiry and size bound for the hub lookup cache.
//!
//! Each `HubLocator` owns its map and prunes it after every insert, so the
//! cache never grows past its cap between lookups.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub trait CacheEntry {
    fn fetched_at(&self) -> Instant;
}

/// Drop entries older than `max_age`, then the oldest ones until at most
/// `max_entries` remain. Returns how many entries were removed.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize, max_age: Duration) -> usize
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    let now = Instant::now();
    let (expired, mut live): (Vec<_>, Vec<_>) = cache
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().fetched_at()))
        .partition(|(_, fetched_at)| now.duration_since(*fetched_at) > max_age);

    let mut removed = expired
        .iter()
        .filter(|(key, _)| cache.remove(key).is_some())
        .count();

    let overflow = live.len().saturating_sub(max_entries);
    if overflow > 0 {
        live.sort_by_key(|(_, fetched_at)| *fetched_at);
        removed += live
            .iter()
            .take(overflow)
            .filter(|(key, _)| cache.remove(key).is_some())
            .count();
    }
    removed
}
