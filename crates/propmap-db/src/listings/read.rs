//! Read operations for the `listings` table.

use propmap_core::{CandidateFilter, PropertyType};
use sqlx::PgPool;

use super::types::ListingRow;

const LISTING_COLUMNS: &str = "id, listing_key, title, price, property_type, listing_type, \
     area, bedrooms, bathrooms, status, \
     latitude::float8 AS latitude, longitude::float8 AS longitude, \
     city, address, thumbnail_url, created_at";

/// Active listings with coordinates, narrowed by the candidate filter.
///
/// Bounds are inclusive on every edge. Results are ordered by `id ASC` and
/// truncated to `filter.limit` when set.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_active_geo_listings(
    pool: &PgPool,
    filter: &CandidateFilter,
) -> Result<Vec<ListingRow>, sqlx::Error> {
    let bounds = filter.bounds;
    let limit = filter.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

    sqlx::query_as::<_, ListingRow>(&format!(
        "SELECT {LISTING_COLUMNS} \
         FROM listings \
         WHERE status = 'active' \
           AND latitude IS NOT NULL \
           AND longitude IS NOT NULL \
           AND ($1::FLOAT8 IS NULL OR latitude::float8 <= $1) \
           AND ($2::FLOAT8 IS NULL OR latitude::float8 >= $2) \
           AND ($3::FLOAT8 IS NULL OR longitude::float8 <= $3) \
           AND ($4::FLOAT8 IS NULL OR longitude::float8 >= $4) \
           AND ($5::TEXT IS NULL OR property_type = $5) \
           AND ($6::NUMERIC IS NULL OR price >= $6) \
           AND ($7::NUMERIC IS NULL OR price <= $7) \
         ORDER BY id ASC \
         LIMIT $8"
    ))
    .bind(bounds.map(|b| b.north))
    .bind(bounds.map(|b| b.south))
    .bind(bounds.map(|b| b.east))
    .bind(bounds.map(|b| b.west))
    .bind(filter.property_type.map(PropertyType::as_str))
    .bind(filter.min_price)
    .bind(filter.max_price)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Number of listings that geo queries can return.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_active_geo_listings(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM listings \
         WHERE status = 'active' AND latitude IS NOT NULL AND longitude IS NOT NULL",
    )
    .fetch_one(pool)
    .await
}
