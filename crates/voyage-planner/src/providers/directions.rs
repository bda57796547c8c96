//! Directions API client (Mapbox / OSRM compatible).

use super::{ProviderError, RoadRoute, RoadRouter};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use voyage_core::{RoadProfile, Waypoint};

use crate::config::Config;

pub struct DirectionsClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    token_required: bool,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    distance: f64,
    duration: f64,
    geometry: DirectionsGeometry,
}

#[derive(Debug, Deserialize)]
struct DirectionsGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl DirectionsClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.directions_url.trim_end_matches('/').to_string(),
            access_token: config.directions_token.clone(),
            token_required: config.directions_token_required,
        }
    }

    fn route_url(&self, profile: RoadProfile, from: Waypoint, to: Waypoint) -> String {
        format!(
            "{}/{}/{:.6},{:.6};{:.6},{:.6}",
            self.base_url,
            profile.as_str(),
            from.lon,
            from.lat,
            to.lon,
            to.lat
        )
    }
}

#[async_trait]
impl RoadRouter for DirectionsClient {
    async fn route(
        &self,
        profile: RoadProfile,
        from: Waypoint,
        to: Waypoint,
        alternatives: bool,
    ) -> Result<RoadRoute, ProviderError> {
        if self.base_url.is_empty() {
            return Err(ProviderError::NotConfigured("directions"));
        }
        if self.token_required && self.access_token.is_none() {
            return Err(ProviderError::MissingCredentials("directions"));
        }

        let mut query = vec![
            ("geometries", "geojson".to_string()),
            ("overview", "full".to_string()),
            ("alternatives", alternatives.to_string()),
        ];
        if let Some(token) = &self.access_token {
            query.push(("access_token", token.clone()));
        }

        let response = self
            .client
            .get(self.route_url(profile, from, to))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let payload: DirectionsResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))?;
        first_route(payload)
    }
}

fn first_route(payload: DirectionsResponse) -> Result<RoadRoute, ProviderError> {
    if let Some(code) = payload.code.as_deref() {
        if !code.eq_ignore_ascii_case("ok") {
            tracing::debug!("Directions service answered code {}", code);
            return Err(ProviderError::NoRoute);
        }
    }
    let route = payload
        .routes
        .into_iter()
        .next()
        .ok_or(ProviderError::NoRoute)?;
    let polyline = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Waypoint { lat, lon })
        .collect();
    Ok(RoadRoute {
        polyline,
        distance_m: route.distance,
        duration_s: route.duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<RoadRoute, ProviderError> {
        first_route(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn parses_first_route_as_lat_lon() {
        let route = parse(json!({
            "code": "Ok",
            "routes": [
                {
                    "distance": 2500.5,
                    "duration": 310.0,
                    "geometry": {"coordinates": [[-74.006, 40.7128], [-74.003, 40.72], [-74.0, 40.73]]}
                },
                {
                    "distance": 9999.0,
                    "duration": 999.0,
                    "geometry": {"coordinates": []}
                }
            ]
        }))
        .unwrap();
        assert_eq!(route.distance_m, 2500.5);
        assert_eq!(route.duration_s, 310.0);
        assert_eq!(route.polyline.len(), 3);
        assert_eq!(route.polyline[0], Waypoint { lat: 40.7128, lon: -74.006 });
    }

    #[test]
    fn no_route_code_is_an_error() {
        let result = parse(json!({"code": "NoRoute", "routes": []}));
        assert!(matches!(result, Err(ProviderError::NoRoute)));
        let empty = parse(json!({"routes": []}));
        assert!(matches!(empty, Err(ProviderError::NoRoute)));
    }

    #[tokio::test]
    async fn missing_token_fails_without_request() {
        let mut config = Config::offline();
        config.directions_url = "http://127.0.0.1:9".to_string();
        let client = DirectionsClient::new(Client::new(), &config);
        let from = Waypoint { lat: 0.0, lon: 0.0 };
        let result = client.route(RoadProfile::Driving, from, from, false).await;
        assert!(matches!(result, Err(ProviderError::MissingCredentials("directions"))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let mut config = Config::offline();
        config.directions_url = "http://127.0.0.1:9/directions".to_string();
        config.directions_token_required = false;
        let client = DirectionsClient::new(Client::new(), &config);
        let from = Waypoint { lat: 0.0, lon: 0.0 };
        let to = Waypoint { lat: 0.1, lon: 0.1 };
        let result = client.route(RoadProfile::Walking, from, to, false).await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }

    #[test]
    fn url_puts_longitude_first() {
        let mut config = Config::offline();
        config.directions_url = "https://example.test/directions/".to_string();
        let client = DirectionsClient::new(Client::new(), &config);
        let url = client.route_url(
            RoadProfile::Driving,
            Waypoint { lat: 1.0, lon: 2.0 },
            Waypoint { lat: 3.0, lon: 4.0 },
        );
        assert_eq!(
            url,
            "https://example.test/directions/driving/2.000000,1.000000;4.000000,3.000000"
        );
    }
}
