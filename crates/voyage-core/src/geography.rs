//! Coarse ocean and landmass rectangles used by the water-crossing heuristic.
//!
//! These boxes are deliberately rough. Coastal points and inland seas are
//! misclassified now and then; the result only steers the routing strategy.

use crate::models::Waypoint;

/// A named lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRegion {
    pub name: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoRegion {
    const fn new(name: &'static str, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            name,
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn contains(&self, point: &Waypoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon
    }
}

/// Open-ocean boxes; a hit is conclusive.
pub const OCEAN_REGIONS: [GeoRegion; 7] = [
    GeoRegion::new("North Atlantic", 20.0, 60.0, -60.0, -15.0),
    GeoRegion::new("South Atlantic", -55.0, 0.0, -30.0, 5.0),
    GeoRegion::new("North Pacific (east)", 0.0, 55.0, -180.0, -130.0),
    GeoRegion::new("North Pacific (west)", 10.0, 50.0, 150.0, 180.0),
    GeoRegion::new("South Pacific", -60.0, 0.0, -180.0, -85.0),
    GeoRegion::new("Indian Ocean", -45.0, 5.0, 55.0, 95.0),
    GeoRegion::new("Southern Ocean", -90.0, -60.0, -180.0, 180.0),
];

/// Continental boxes; a point outside all of them is treated as water.
pub const LANDMASS_REGIONS: [GeoRegion; 6] = [
    GeoRegion::new("North America", 7.0, 72.0, -168.0, -52.0),
    GeoRegion::new("South America", -56.0, 13.0, -82.0, -34.0),
    GeoRegion::new("Europe", 35.0, 71.0, -25.0, 45.0),
    GeoRegion::new("Africa", -35.0, 37.0, -18.0, 52.0),
    GeoRegion::new("Asia", -11.0, 77.0, 25.0, 180.0),
    GeoRegion::new("Australia", -44.0, -10.0, 112.0, 154.0),
];

/// Name of the ocean box containing `point`, if any.
pub fn in_ocean_region(point: &Waypoint) -> Option<&'static str> {
    OCEAN_REGIONS
        .iter()
        .find(|region| region.contains(point))
        .map(|region| region.name)
}

pub fn in_landmass_region(point: &Waypoint) -> bool {
    LANDMASS_REGIONS.iter().any(|region| region.contains(point))
}
