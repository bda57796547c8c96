//! Overpass API client for transport hub lookups.

use super::{HubCandidate, HubSource, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use voyage_core::{build_hub_query, HubType, Waypoint};

use crate::config::Config;

pub struct OverpassClient {
    client: Client,
    url: String,
    query_timeout_s: u64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    tags: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            url: config.overpass_url.trim().to_string(),
            query_timeout_s: config.request_timeout_s.max(5),
        }
    }
}

#[async_trait]
impl HubSource for OverpassClient {
    async fn query_hubs(
        &self,
        hub_type: HubType,
        center: Waypoint,
        radius_m: f64,
    ) -> Result<Vec<HubCandidate>, ProviderError> {
        if self.url.is_empty() {
            return Err(ProviderError::NotConfigured("overpass"));
        }
        let query = build_hub_query(hub_type, center, radius_m, self.query_timeout_s);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "text/plain")
            .body(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let payload: OverpassResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))?;
        Ok(into_candidates(payload))
    }
}

fn into_candidates(payload: OverpassResponse) -> Vec<HubCandidate> {
    payload
        .elements
        .into_iter()
        .filter_map(|element| {
            let (lat, lon) = element_center(&element)?;
            Some(HubCandidate {
                lat,
                lon,
                tags: element.tags.unwrap_or_default(),
            })
        })
        .collect()
}

/// Node coordinate, or the computed center of a way/relation.
fn element_center(element: &OverpassElement) -> Option<(f64, f64)> {
    if let (Some(lat), Some(lon)) = (element.lat, element.lon) {
        return Some((lat, lon));
    }
    element.center.as_ref().map(|center| (center.lat, center.lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nodes_and_ways_resolve_to_points() {
        let payload: OverpassResponse = serde_json::from_value(json!({
            "elements": [
                {"type": "node", "id": 1, "lat": 50.9, "lon": 1.3, "tags": {"name": "Calais Ferry", "amenity": "ferry_terminal"}},
                {"type": "way", "id": 2, "center": {"lat": 51.1, "lon": 1.33}, "tags": {"name": "Port of Dover", "industrial": "port"}},
                {"type": "relation", "id": 3, "tags": {"name": "No geometry"}}
            ]
        }))
        .unwrap();
        let candidates = into_candidates(payload);
        assert_eq!(candidates.len(), 2);
        assert_eq!((candidates[0].lat, candidates[0].lon), (50.9, 1.3));
        assert_eq!((candidates[1].lat, candidates[1].lon), (51.1, 1.33));
        assert_eq!(candidates[1].tags.get("industrial").map(String::as_str), Some("port"));
    }

    #[test]
    fn untagged_elements_get_empty_tags() {
        let payload: OverpassResponse =
            serde_json::from_value(json!({"elements": [{"lat": 1.0, "lon": 2.0}]})).unwrap();
        let candidates = into_candidates(payload);
        assert!(candidates[0].tags.is_empty());
    }

    #[tokio::test]
    async fn empty_url_is_not_configured() {
        let client = OverpassClient::new(Client::new(), &Config::offline());
        let result = client
            .query_hubs(HubType::Port, Waypoint { lat: 0.0, lon: 0.0 }, 1000.0)
            .await;
        assert!(matches!(result, Err(ProviderError::NotConfigured("overpass"))));
    }
}
