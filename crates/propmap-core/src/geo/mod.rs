//! Geo search and map clustering.
//!
//! Everything here is a pure computation over a candidate snapshot handed in
//! by a [`crate::store::ListingStore`]; [`MapSearchService`] wires the two
//! together.

mod cluster;
mod config;
mod distance;
mod point;
mod search;
mod service;
mod zoom;

pub use cluster::{cluster_listings, grid_clusters, ClusterQuery, GridCluster, MapMarker, MapView};
pub use config::{ClusterConfig, GeoConfig};
pub use distance::{distance_km, EARTH_RADIUS_KM, MAX_DISTANCE_KM};
pub use point::{BoundingBox, GeoPoint};
pub use search::{search_by_radius, DistanceAnnotatedListing, Page, RadiusQuery, SortKey};
pub use service::MapSearchService;
pub use zoom::{select_display_mode, DisplayMode};
