use std::io::Write as _;

use chrono::TimeZone;
use rust_decimal::Decimal;

use super::*;

fn sample_listing() -> ListingRecord {
    ListingRecord {
        id: 1,
        title: "Nile view flat".to_string(),
        price: Decimal::new(250_000, 2),
        property_type: PropertyType::Apartment,
        listing_type: ListingType::Rent,
        area: 120.0,
        bedrooms: 3,
        bathrooms: 2,
        status: ListingStatus::Active,
        location: Some(GeoPoint::new(30.05, 31.24)),
        city: Some("Cairo".to_string()),
        address: None,
        thumbnail_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn write_temp_yaml(name: &str, body: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("propmap-{name}-{}.yaml", std::process::id()));
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(body.as_bytes()).expect("write temp file");
    path
}

#[test]
fn property_type_parses_every_wire_value() {
    for t in PropertyType::ALL {
        assert_eq!(t.as_str().parse::<PropertyType>(), Ok(t));
    }
    assert!("castle".parse::<PropertyType>().is_err());
}

#[test]
fn property_type_serializes_lowercase() {
    let json = serde_json::to_string(&PropertyType::Commercial).expect("serialize");
    assert_eq!(json, "\"commercial\"");
}

#[test]
fn empty_filters_match_everything() {
    assert!(ListingFilters::default().matches(&sample_listing()));
}

#[test]
fn filter_bounds_are_inclusive() {
    let listing = sample_listing();
    let filters = ListingFilters {
        min_price: Some(Decimal::new(250_000, 2)),
        max_price: Some(Decimal::new(250_000, 2)),
        min_area: Some(120.0),
        max_area: Some(120.0),
        min_bedrooms: Some(3),
        min_bathrooms: Some(2),
        property_type: Some(PropertyType::Apartment),
    };
    assert!(filters.matches(&listing));
}

#[test]
fn each_filter_rejects_independently() {
    let listing = sample_listing();
    let cases = [
        ListingFilters {
            property_type: Some(PropertyType::Villa),
            ..Default::default()
        },
        ListingFilters {
            min_price: Some(Decimal::new(300_000, 2)),
            ..Default::default()
        },
        ListingFilters {
            max_price: Some(Decimal::new(100, 0)),
            ..Default::default()
        },
        ListingFilters {
            min_area: Some(150.0),
            ..Default::default()
        },
        ListingFilters {
            max_area: Some(80.0),
            ..Default::default()
        },
        ListingFilters {
            min_bedrooms: Some(4),
            ..Default::default()
        },
        ListingFilters {
            min_bathrooms: Some(3),
            ..Default::default()
        },
    ];
    for filters in cases {
        assert!(!filters.matches(&listing), "expected rejection by {filters:?}");
    }
}

#[test]
fn inactive_listing_has_no_geo_location() {
    let mut listing = sample_listing();
    assert!(listing.geo_location().is_some());
    listing.status = ListingStatus::Pending;
    assert!(listing.geo_location().is_none());
}

#[test]
fn load_listings_reads_valid_file() {
    let path = write_temp_yaml(
        "valid",
        r#"
listings:
  - key: zamalek-1
    title: Zamalek apartment
    price: "1500.00"
    property_type: apartment
    listing_type: rent
    area: 95
    bedrooms: 2
    bathrooms: 1
    latitude: 30.0626
    longitude: 31.2197
  - key: desert-plot
    title: Plot without coordinates
    price: "90000"
    property_type: land
    listing_type: sale
    area: 1000
"#,
    );
    let file = load_listings(&path).expect("listings load");
    std::fs::remove_file(&path).ok();

    assert_eq!(file.listings.len(), 2);
    assert_eq!(file.listings[0].status, ListingStatus::Active);
    assert_eq!(file.listings[1].latitude, None);
    assert_eq!(file.listings[1].bedrooms, 0);
}

#[test]
fn load_listings_rejects_duplicate_keys() {
    let path = write_temp_yaml(
        "dup",
        r#"
listings:
  - { key: a, title: One, price: "1", property_type: house, listing_type: sale, area: 1 }
  - { key: a, title: Two, price: "2", property_type: house, listing_type: sale, area: 1 }
"#,
    );
    let result = load_listings(&path);
    std::fs::remove_file(&path).ok();
    assert!(
        matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
        "got: {result:?}"
    );
}

#[test]
fn load_listings_rejects_half_coordinates() {
    let path = write_temp_yaml(
        "half",
        r#"
listings:
  - { key: a, title: One, price: "1", property_type: house, listing_type: sale, area: 1, latitude: 10.0 }
"#,
    );
    let result = load_listings(&path);
    std::fs::remove_file(&path).ok();
    assert!(matches!(result, Err(ConfigError::Validation(_))), "got: {result:?}");
}

#[test]
fn load_listings_reports_missing_file() {
    let result = load_listings(std::path::Path::new("/definitely/not/here.yaml"));
    assert!(matches!(result, Err(ConfigError::ListingsFileIo { .. })));
}
