pub mod app_config;
pub mod config;
pub mod geo;
pub mod listings;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{
    cluster_listings, distance_km, grid_clusters, search_by_radius, select_display_mode,
    BoundingBox, ClusterConfig, ClusterQuery, DisplayMode, DistanceAnnotatedListing, GeoConfig,
    GeoPoint, GridCluster, MapMarker, MapSearchService, MapView, Page, RadiusQuery, SortKey,
};
pub use listings::{
    load_listings, ListingFilters, ListingRecord, ListingSeed, ListingStatus, ListingType,
    ListingsFile, PropertyType,
};
pub use store::{CandidateFilter, InMemoryListingStore, ListingStore, StoreError};
pub use validation::{parse_cluster_query, parse_radius_query, FieldErrors, ValidationError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read listings file {path}: {source}")]
    ListingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse listings file: {0}")]
    ListingsFileParse(#[from] serde_yaml::Error),

    #[error("listings file validation failed: {0}")]
    Validation(String),
}
