use propmap_core::ListingSeed;
use sqlx::PgPool;

use crate::DbError;

/// Upsert listings from the seed file, keyed by `listing_key`.
///
/// Returns the number of listings processed (inserted or updated).
/// All upserts run inside a single transaction; if any operation fails
/// the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_listings(pool: &PgPool, listings: &[ListingSeed]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;

    for listing in listings {
        sqlx::query(
            "INSERT INTO listings (listing_key, title, price, property_type, listing_type, area, \
                                   bedrooms, bathrooms, status, latitude, longitude, city, \
                                   address, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10::float8, $11::float8, $12, $13, $14) \
             ON CONFLICT (listing_key) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 price = EXCLUDED.price, \
                 property_type = EXCLUDED.property_type, \
                 listing_type = EXCLUDED.listing_type, \
                 area = EXCLUDED.area, \
                 bedrooms = EXCLUDED.bedrooms, \
                 bathrooms = EXCLUDED.bathrooms, \
                 status = EXCLUDED.status, \
                 latitude = EXCLUDED.latitude, \
                 longitude = EXCLUDED.longitude, \
                 city = EXCLUDED.city, \
                 address = EXCLUDED.address, \
                 thumbnail_url = EXCLUDED.thumbnail_url, \
                 updated_at = NOW()",
        )
        .bind(&listing.key)
        .bind(&listing.title)
        .bind(listing.price)
        .bind(listing.property_type.as_str())
        .bind(listing.listing_type.as_str())
        .bind(listing.area)
        .bind(listing.bedrooms)
        .bind(listing.bathrooms)
        .bind(listing.status.as_str())
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(&listing.city)
        .bind(&listing.address)
        .bind(&listing.thumbnail_url)
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}
