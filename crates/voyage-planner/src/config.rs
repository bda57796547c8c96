//! Planner configuration from environment.

use std::env;
use std::time::Duration;

const DEFAULT_DIRECTIONS_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";
const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_ONWATER_URL: &str = "https://api.onwater.io/api/v1/results";
const DEFAULT_ISITWATER_URL: &str = "https://isitwater-com.p.rapidapi.com/";

#[derive(Debug, Clone)]
pub struct Config {
    pub directions_url: String,
    pub directions_token: Option<String>,
    /// Without a token every directions call fails immediately.
    pub directions_token_required: bool,
    pub directions_alternatives: bool,
    pub overpass_url: String,
    pub onwater_url: String,
    pub onwater_token: Option<String>,
    pub isitwater_url: String,
    pub isitwater_key: Option<String>,
    pub request_timeout_s: u64,
    pub hub_cache_ttl_s: u64,
    pub hub_cache_max_entries: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            directions_url: env::var("VOYAGE_DIRECTIONS_URL")
                .unwrap_or_else(|_| DEFAULT_DIRECTIONS_URL.to_string()),
            directions_token: non_empty_var("VOYAGE_DIRECTIONS_TOKEN"),
            directions_token_required: parse_bool_var("VOYAGE_DIRECTIONS_TOKEN_REQUIRED", true),
            directions_alternatives: parse_bool_var("VOYAGE_DIRECTIONS_ALTERNATIVES", false),
            overpass_url: env::var("VOYAGE_OVERPASS_URL")
                .unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string()),
            onwater_url: env::var("VOYAGE_ONWATER_URL")
                .unwrap_or_else(|_| DEFAULT_ONWATER_URL.to_string()),
            onwater_token: non_empty_var("VOYAGE_ONWATER_TOKEN"),
            isitwater_url: env::var("VOYAGE_ISITWATER_URL")
                .unwrap_or_else(|_| DEFAULT_ISITWATER_URL.to_string()),
            isitwater_key: non_empty_var("VOYAGE_ISITWATER_KEY"),
            request_timeout_s: env::var("VOYAGE_REQUEST_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            hub_cache_ttl_s: env::var("VOYAGE_HUB_CACHE_TTL_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            hub_cache_max_entries: env::var("VOYAGE_HUB_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(256),
        }
    }

    /// No endpoints and no credentials: every provider degrades at once.
    pub fn offline() -> Self {
        Self {
            directions_url: String::new(),
            directions_token: None,
            directions_token_required: true,
            directions_alternatives: false,
            overpass_url: String::new(),
            onwater_url: String::new(),
            onwater_token: None,
            isitwater_url: String::new(),
            isitwater_key: None,
            request_timeout_s: 10,
            hub_cache_ttl_s: 600,
            hub_cache_max_entries: 256,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_s.max(1))
    }

    pub fn hub_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.hub_cache_ttl_s.max(30))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool_var(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}
