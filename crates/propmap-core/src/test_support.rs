use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::geo::GeoPoint;
use crate::listings::{ListingRecord, ListingStatus, ListingType, PropertyType};

pub(crate) const CAIRO: GeoPoint = GeoPoint::new(30.0444, 31.2357);

/// Active apartment at `(lat, lng)`; price and creation date grow with `id`.
pub(crate) fn listing(id: i64, lat: f64, lng: f64) -> ListingRecord {
    ListingRecord {
        id,
        title: format!("Listing {id}"),
        price: Decimal::from(1_000 * id),
        property_type: PropertyType::Apartment,
        listing_type: ListingType::Rent,
        area: 100.0,
        bedrooms: 2,
        bathrooms: 1,
        status: ListingStatus::Active,
        location: Some(GeoPoint::new(lat, lng)),
        city: Some("Cairo".to_string()),
        address: None,
        thumbnail_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(id),
    }
}

/// A 50 x 50 lattice around Cairo at 0.01 degree spacing.
pub(crate) fn cairo_lattice() -> Vec<ListingRecord> {
    let mut out = Vec::with_capacity(2_500);
    let mut id = 1;
    for i in 0..50 {
        for j in 0..50 {
            let lat = 29.8 + f64::from(i) * 0.01;
            let lng = 31.0 + f64::from(j) * 0.01;
            out.push(listing(id, lat, lng));
            id += 1;
        }
    }
    out
}
