//! Live integration tests for propmap-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/propmap-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.
//!
//! Ignored by default; run with `DATABASE_URL` set and `--ignored`.

use propmap_core::{
    BoundingBox, CandidateFilter, ListingSeed, ListingStatus, ListingStore, ListingType,
    PropertyType,
};
use propmap_db::{
    count_active_geo_listings, health_check, list_active_geo_listings,
    seed_listings, PgListingStore,
};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seed(key: &str, lat: Option<f64>, lng: Option<f64>, price: i64) -> ListingSeed {
    ListingSeed {
        key: key.to_string(),
        title: format!("Listing {key}"),
        price: Decimal::from(price),
        property_type: PropertyType::Apartment,
        listing_type: ListingType::Rent,
        area: 100.0,
        bedrooms: 2,
        bathrooms: 1,
        status: ListingStatus::Active,
        latitude: lat,
        longitude: lng,
        city: Some("Cairo".to_string()),
        address: None,
        thumbnail_url: None,
    }
}

fn cairo_seeds() -> Vec<ListingSeed> {
    let mut villa = seed("villa", Some(30.10), Some(31.30), 9_000);
    villa.property_type = PropertyType::Villa;
    let mut pending = seed("pending", Some(30.05), Some(31.25), 1_500);
    pending.status = ListingStatus::Pending;

    vec![
        seed("a", Some(30.05), Some(31.24), 1_000),
        seed("b", Some(30.06), Some(31.22), 2_000),
        villa,
        pending,
        seed("unlocated", None, None, 500),
        seed("far", Some(45.0), Some(10.0), 3_000),
    ]
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn seed_is_idempotent_and_updates_in_place(pool: sqlx::PgPool) {
    let seeds = cairo_seeds();
    assert_eq!(seed_listings(&pool, &seeds).await.expect("seed"), 6);

    let mut updated = seeds.clone();
    updated[0].price = Decimal::from(1_234);
    assert_eq!(seed_listings(&pool, &updated).await.expect("reseed"), 6);

    let (price, latitude): (Decimal, Option<f64>) = sqlx::query_as(
        "SELECT price, latitude::float8 FROM listings WHERE listing_key = $1",
    )
    .bind("a")
    .fetch_one(&pool)
    .await
    .expect("row exists");
    assert_eq!(price, Decimal::from(1_234));
    assert_eq!(latitude, Some(30.05));

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listings")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(total, 6);
}

// ---------------------------------------------------------------------------
// Candidate queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn candidates_exclude_inactive_and_unlocated(pool: sqlx::PgPool) {
    seed_listings(&pool, &cairo_seeds()).await.expect("seed");

    let rows = list_active_geo_listings(&pool, &CandidateFilter::default())
        .await
        .expect("query");
    let keys: Vec<&str> = rows.iter().map(|r| r.listing_key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "villa", "far"]);

    assert_eq!(count_active_geo_listings(&pool).await.expect("count"), 4);
    assert_eq!(health_check(&pool).await.expect("health"), 4);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn candidates_respect_bounds_filters_and_limit(pool: sqlx::PgPool) {
    seed_listings(&pool, &cairo_seeds()).await.expect("seed");

    let bounds = BoundingBox {
        north: 30.2,
        south: 30.0,
        east: 31.4,
        west: 31.2,
    };
    let filter = CandidateFilter {
        bounds: Some(bounds),
        ..CandidateFilter::default()
    };
    let rows = list_active_geo_listings(&pool, &filter).await.expect("query");
    assert_eq!(rows.len(), 3);

    let typed = CandidateFilter {
        property_type: Some(PropertyType::Villa),
        ..filter.clone()
    };
    let rows = list_active_geo_listings(&pool, &typed).await.expect("query");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].listing_key, "villa");

    let priced = CandidateFilter {
        min_price: Some(Decimal::from(2_000)),
        max_price: Some(Decimal::from(9_000)),
        ..filter.clone()
    };
    let rows = list_active_geo_listings(&pool, &priced).await.expect("query");
    assert_eq!(rows.len(), 2);

    let limited = CandidateFilter {
        limit: Some(2),
        ..filter
    };
    let rows = list_active_geo_listings(&pool, &limited).await.expect("query");
    let keys: Vec<&str> = rows.iter().map(|r| r.listing_key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn pg_store_returns_domain_records(pool: sqlx::PgPool) {
    seed_listings(&pool, &cairo_seeds()).await.expect("seed");
    let store = PgListingStore::new(pool);

    store.ping().await.expect("ping");
    let records = store
        .active_listings(&CandidateFilter::default())
        .await
        .expect("records");
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.geo_location().is_some()));
    assert!(records.windows(2).all(|w| w[0].id < w[1].id));
}
