pub mod error;
pub mod format;
pub mod geography;
pub mod hubs;
pub mod mode;
pub mod models;
pub mod spatial;

pub use error::CoreError;
pub use format::{format_distance, format_duration};
pub use geography::{in_landmass_region, in_ocean_region, GeoRegion, LANDMASS_REGIONS, OCEAN_REGIONS};
pub use hubs::{build_hub_query, hub_display_name, rank_hubs, score_hub, HubType, MAX_RANKED_HUBS};
pub use mode::{speed_for_name, RoadProfile, TransportMode};
pub use models::{PropertyInfo, RouteSegment, RouteSummary, TransportHub, Waypoint};
pub use spatial::{haversine_distance, interior_samples, Bounds};
