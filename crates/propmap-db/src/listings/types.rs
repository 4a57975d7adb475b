//! Row types for the `listings` table.

use chrono::{DateTime, Utc};
use propmap_core::{
    GeoPoint, ListingRecord, ListingStatus, ListingType, PropertyType, StoreError,
};
use rust_decimal::Decimal;

/// A row from the `listings` table.
///
/// Coordinates are stored as `NUMERIC` and read back as `float8`; enum-like
/// columns are plain `TEXT` guarded by `CHECK` constraints.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRow {
    pub id: i64,
    pub listing_key: String,
    pub title: String,
    pub price: Decimal,
    pub property_type: String,
    pub listing_type: String,
    pub area: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for ListingRecord {
    type Error = StoreError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let malformed = |reason: String| StoreError::MalformedRow {
            id: row.id,
            reason,
        };

        let property_type = row
            .property_type
            .parse::<PropertyType>()
            .map_err(|e| malformed(format!("property_type: {e}")))?;
        let listing_type = row
            .listing_type
            .parse::<ListingType>()
            .map_err(|e| malformed(format!("listing_type: {e}")))?;
        let status = row
            .status
            .parse::<ListingStatus>()
            .map_err(|e| malformed(format!("status: {e}")))?;
        let location = match (row.latitude, row.longitude) {
            (Some(lat), Some(lng)) => {
                let point = GeoPoint::new(lat, lng);
                if !point.is_valid() {
                    return Err(malformed(format!("coordinates out of range ({lat}, {lng})")));
                }
                Some(point)
            }
            (None, None) => None,
            _ => return Err(malformed("only one coordinate set".to_string())),
        };

        Ok(ListingRecord {
            id: row.id,
            title: row.title,
            price: row.price,
            property_type,
            listing_type,
            area: row.area,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            status,
            location,
            city: row.city,
            address: row.address,
            thumbnail_url: row.thumbnail_url,
            created_at: row.created_at,
        })
    }
}
