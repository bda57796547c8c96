//! Multi-stop journey planning: leg composition, external providers and the
//! render lifecycle that keeps the map in step with the latest plan.

pub mod aggregator;
pub mod cache;
pub mod composer;
pub mod config;
pub mod hubs;
pub mod providers;
pub mod render;
pub mod water;

pub use aggregator::RouteAggregator;
pub use composer::{ComposerOptions, RouteComposer};
pub use config::Config;
pub use hubs::HubLocator;
pub use render::{MapSurface, MemorySurface, RouteRenderer};
pub use water::{CrossingDetector, WaterDetector, WaterStrategy};
