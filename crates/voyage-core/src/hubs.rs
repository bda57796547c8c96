//! Transport hub query construction and ranking.

use crate::error::CoreError;
use crate::models::{TransportHub, Waypoint};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Hubs kept after ranking.
pub const MAX_RANKED_HUBS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HubType {
    Airport,
    Port,
    City,
    Station,
}

impl HubType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Airport => "airport",
            Self::Port => "port",
            Self::City => "city",
            Self::Station => "station",
        }
    }

    /// Overpass tag filters selecting this kind of hub.
    fn tag_filters(self) -> &'static [&'static str] {
        match self {
            Self::Airport => &[
                r#"nwr["aeroway"="aerodrome"]["iata"]"#,
                r#"nwr["aeroway"="aerodrome"]["icao"]"#,
            ],
            Self::Port => &[
                r#"nwr["harbour"="yes"]"#,
                r#"nwr["industrial"="port"]"#,
                r#"nwr["landuse"="port"]"#,
                r#"nwr["amenity"="ferry_terminal"]"#,
                r#"nwr["seamark:type"="harbour"]"#,
            ],
            Self::City => &[
                r#"node["place"~"^(city|town)$"]"#,
                r#"relation["boundary"="administrative"]["admin_level"="8"]["population"]"#,
            ],
            Self::Station => &[r#"nwr["railway"="station"]"#],
        }
    }
}

impl fmt::Display for HubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HubType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "airport" => Ok(Self::Airport),
            "port" => Ok(Self::Port),
            "city" => Ok(Self::City),
            "station" => Ok(Self::Station),
            _ => Err(CoreError::UnknownHubType(s.to_string())),
        }
    }
}

/// Build the Overpass QL query for hubs of `hub_type` within `radius_m` of `center`.
pub fn build_hub_query(hub_type: HubType, center: Waypoint, radius_m: f64, timeout_s: u64) -> String {
    let around = format!("around:{:.0},{:.6},{:.6}", radius_m.max(0.0), center.lat, center.lon);
    let mut query = format!("[out:json][timeout:{timeout_s}];\n(\n");
    for filter in hub_type.tag_filters() {
        query.push_str(&format!("  {filter}({around});\n"));
    }
    query.push_str(");\nout center tags;");
    query
}

/// Importance score: base 1, type-specific tag bonuses, and a distance decay
/// worth up to 10 points that reaches zero at the search radius.
pub fn score_hub(
    hub_type: HubType,
    tags: &HashMap<String, String>,
    distance_m: f64,
    radius_m: f64,
) -> f64 {
    let tag = |key: &str| tags.get(key).map(String::as_str);
    let mut score = 1.0;

    match hub_type {
        HubType::Airport => {
            if tag("iata").is_some() {
                score += 5.0;
            }
            if tag("icao").is_some() {
                score += 3.0;
            }
            if tag("aerodrome") == Some("international")
                || tag("aerodrome:type") == Some("international")
            {
                score += 7.0;
            }
            if tag("name").is_some_and(|name| name.to_lowercase().contains("international")) {
                score += 5.0;
            }
        }
        HubType::Port => {
            if tag("industrial") == Some("port") {
                score += 6.0;
            }
            if tag("harbour") == Some("yes") {
                score += 5.0;
            }
            if tag("landuse") == Some("port") {
                score += 4.0;
            }
            if tag("amenity") == Some("ferry_terminal") {
                score += 3.0;
            }
            if tag("seamark:type") == Some("harbour") {
                score += 2.0;
            }
        }
        HubType::City => {
            let population = tag("population").and_then(parse_population).unwrap_or(0);
            score += match population {
                p if p >= 1_000_000 => 10.0,
                p if p >= 500_000 => 7.0,
                p if p >= 100_000 => 5.0,
                p if p >= 10_000 => 2.0,
                _ => 0.0,
            };
        }
        HubType::Station => {}
    }

    if radius_m > 0.0 && distance_m.is_finite() {
        score += (10.0 - distance_m / (radius_m / 10.0)).max(0.0);
    }
    score
}

fn parse_population(raw: &str) -> Option<u64> {
    let digits: String = raw
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, ',' | ' ' | '.' | '_'))
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Human-readable hub name from OSM tags.
pub fn hub_display_name(tags: &HashMap<String, String>, hub_type: HubType) -> String {
    tags.get("name")
        .or_else(|| tags.get("name:en"))
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Unnamed {hub_type}"))
}

/// Sort by importance, highest first, and keep the best [`MAX_RANKED_HUBS`].
pub fn rank_hubs(mut hubs: Vec<TransportHub>) -> Vec<TransportHub> {
    hubs.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(Ordering::Equal)
    });
    hubs.truncate(MAX_RANKED_HUBS);
    hubs
}
