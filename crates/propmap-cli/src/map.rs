//! Offline map queries against the configured database.
//!
//! Both commands go through the same `MapSearchService` the HTTP server uses,
//! so the JSON printed here matches what the API would return for the same
//! parameters (minus the response envelope).

use std::sync::Arc;

use clap::Args;
use propmap_core::{
    AppConfig, BoundingBox, ClusterConfig, ClusterQuery, GeoConfig, GeoPoint, ListingFilters,
    MapSearchService, PropertyType, RadiusQuery, SortKey, ValidationError,
};
use propmap_db::PgListingStore;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Center latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,
    /// Center longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,
    /// Search radius in kilometres
    #[arg(long)]
    pub radius: f64,
    #[arg(long)]
    pub property_type: Option<PropertyType>,
    #[arg(long)]
    pub min_price: Option<Decimal>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
    #[arg(long)]
    pub min_area: Option<f64>,
    #[arg(long)]
    pub max_area: Option<f64>,
    /// Minimum number of bedrooms
    #[arg(long)]
    pub bedrooms: Option<i32>,
    /// Minimum number of bathrooms
    #[arg(long)]
    pub bathrooms: Option<i32>,
    /// Sort order (distance, `price_asc`, `price_desc`, `date_asc`, ...)
    #[arg(long, default_value = "distance")]
    pub sort: SortKey,
    #[arg(long, default_value = "1")]
    pub page: u32,
    /// Page size (defaults to `PROPMAP_DEFAULT_PER_PAGE`)
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl SearchArgs {
    /// Build and validate the radius query these arguments describe.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every out-of-range argument.
    pub fn to_query(&self, config: &GeoConfig) -> Result<RadiusQuery, ValidationError> {
        let mut query = RadiusQuery::new(
            GeoPoint::new(self.latitude, self.longitude),
            self.radius,
            config,
        );
        query.filters = ListingFilters {
            property_type: self.property_type,
            min_price: self.min_price,
            max_price: self.max_price,
            min_area: self.min_area,
            max_area: self.max_area,
            min_bedrooms: self.bedrooms,
            min_bathrooms: self.bathrooms,
        };
        query.sort = self.sort;
        query.page = self.page;
        if let Some(per_page) = self.per_page {
            query.per_page = per_page;
        }
        query.validate(config)?;
        Ok(query)
    }
}

#[derive(Debug, Args)]
pub struct ClusterArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub north: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub south: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub east: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub west: f64,
    /// Map zoom level
    #[arg(long)]
    pub zoom: u8,
    #[arg(long)]
    pub property_type: Option<PropertyType>,
    #[arg(long)]
    pub min_price: Option<Decimal>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
}

impl ClusterArgs {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every out-of-range argument.
    pub fn to_query(&self, config: &ClusterConfig) -> Result<ClusterQuery, ValidationError> {
        let bounds = BoundingBox {
            north: self.north,
            south: self.south,
            east: self.east,
            west: self.west,
        };
        let mut query = ClusterQuery::new(bounds, self.zoom);
        query.property_type = self.property_type;
        query.min_price = self.min_price;
        query.max_price = self.max_price;
        query.validate(config)?;
        Ok(query)
    }
}

fn map_service(pool: sqlx::PgPool, config: &AppConfig) -> MapSearchService {
    MapSearchService::new(Arc::new(PgListingStore::new(pool)), config.geo.clone())
}

/// Run a radius search and print the resulting page.
///
/// # Errors
///
/// Returns an error if the arguments fail validation or the query fails.
pub(crate) async fn run_search(
    pool: sqlx::PgPool,
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<()> {
    let query = args.to_query(&config.geo)?;
    let page = map_service(pool, config).search(&query).await?;

    if page.total == 0 {
        eprintln!(
            "no active listings within {} km of ({}, {})",
            query.radius_km, query.center.latitude, query.center.longitude
        );
    }
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

/// Build the map view for a viewport and print it.
///
/// # Errors
///
/// Returns an error if the arguments fail validation or the query fails.
pub(crate) async fn run_clusters(
    pool: sqlx::PgPool,
    config: &AppConfig,
    args: &ClusterArgs,
) -> anyhow::Result<()> {
    let query = args.to_query(&config.geo.cluster)?;
    let view = map_service(pool, config).clusters(&query).await?;

    tracing::info!(kind = view.kind(), count = view.len(), "map view built");
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
