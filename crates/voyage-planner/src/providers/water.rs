//! Remote "is this point water" probes.
//!
//! Both services are optional. A probe without credentials, or one that
//! fails, answers "unknown" and the detector moves on to the next strategy.

use super::ProviderError;
use crate::config::Config;
use crate::water::WaterStrategy;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use voyage_core::Waypoint;

const ISITWATER_HOST: &str = "isitwater-com.p.rapidapi.com";

#[derive(Debug, Deserialize)]
struct WaterResponse {
    water: bool,
}

async fn read_water_flag(response: reqwest::Response) -> Result<bool, ProviderError> {
    if !response.status().is_success() {
        return Err(ProviderError::Status(response.status().as_u16()));
    }
    let payload: WaterResponse = response
        .json()
        .await
        .map_err(|err| ProviderError::Decode(err.to_string()))?;
    Ok(payload.water)
}

fn unknown_on_error(probe: &'static str, result: Result<bool, ProviderError>) -> Option<bool> {
    match result {
        Ok(water) => Some(water),
        Err(ProviderError::MissingCredentials(_)) | Err(ProviderError::NotConfigured(_)) => None,
        Err(err) => {
            tracing::warn!("Water probe {} unavailable: {}", probe, err);
            None
        }
    }
}

/// onwater.io style endpoint: `GET {base}/{lat},{lon}?access_token=...`.
pub struct OnWaterProbe {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl OnWaterProbe {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.onwater_url.trim_end_matches('/').to_string(),
            token: config.onwater_token.clone(),
        }
    }

    async fn fetch(&self, point: Waypoint) -> Result<bool, ProviderError> {
        if self.base_url.is_empty() {
            return Err(ProviderError::NotConfigured("onwater"));
        }
        let token = self
            .token
            .as_deref()
            .ok_or(ProviderError::MissingCredentials("onwater"))?;
        let url = format!("{}/{:.6},{:.6}", self.base_url, point.lat, point.lon);
        let response = self
            .client
            .get(url)
            .query(&[("access_token", token)])
            .send()
            .await?;
        read_water_flag(response).await
    }
}

#[async_trait]
impl WaterStrategy for OnWaterProbe {
    fn name(&self) -> &'static str {
        "onwater"
    }

    async fn classify(&self, point: Waypoint) -> Option<bool> {
        unknown_on_error(self.name(), self.fetch(point).await)
    }
}

/// RapidAPI "isitwater" endpoint keyed by `X-RapidAPI-Key`.
pub struct IsItWaterProbe {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl IsItWaterProbe {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            url: config.isitwater_url.trim().to_string(),
            api_key: config.isitwater_key.clone(),
        }
    }

    async fn fetch(&self, point: Waypoint) -> Result<bool, ProviderError> {
        if self.url.is_empty() {
            return Err(ProviderError::NotConfigured("isitwater"));
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials("isitwater"))?;
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", point.lat.to_string()),
                ("longitude", point.lon.to_string()),
            ])
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", ISITWATER_HOST)
            .send()
            .await?;
        read_water_flag(response).await
    }
}

#[async_trait]
impl WaterStrategy for IsItWaterProbe {
    fn name(&self) -> &'static str {
        "isitwater"
    }

    async fn classify(&self, point: Waypoint) -> Option<bool> {
        unknown_on_error(self.name(), self.fetch(point).await)
    }
}
