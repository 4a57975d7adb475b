use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use super::config::GeoConfig;
use super::distance::distance_km;
use super::point::GeoPoint;
use crate::listings::{ListingFilters, ListingRecord, UnknownVariant};
use crate::validation::{
    check_filters, check_latitude, check_longitude, check_page, check_per_page, check_radius,
    FieldErrors, ValidationError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Distance,
    PriceAsc,
    PriceDesc,
    DateAsc,
    DateDesc,
    AreaAsc,
    AreaDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Distance,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::AreaAsc,
        SortKey::AreaDesc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Distance => "distance",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::DateDesc => "date_desc",
            SortKey::AreaAsc => "area_asc",
            SortKey::AreaDesc => "area_desc",
        }
    }

    fn primary(self, a: &ListingRecord, b: &ListingRecord) -> Ordering {
        match self {
            SortKey::Distance => Ordering::Equal,
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::DateAsc => a.created_at.cmp(&b.created_at),
            SortKey::DateDesc => b.created_at.cmp(&a.created_at),
            SortKey::AreaAsc => a.area.total_cmp(&b.area),
            SortKey::AreaDesc => b.area.total_cmp(&a.area),
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// A validated radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub filters: ListingFilters,
    pub sort: SortKey,
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
}

impl RadiusQuery {
    /// First page, default sort, no filters.
    #[must_use]
    pub fn new(center: GeoPoint, radius_km: f64, config: &GeoConfig) -> Self {
        Self {
            center,
            radius_km,
            filters: ListingFilters::default(),
            sort: SortKey::Distance,
            page: 1,
            per_page: config.default_per_page,
        }
    }

    /// Apply the same range rules as the HTTP parameter parser.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every out-of-range field.
    pub fn validate(&self, config: &GeoConfig) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        if !self.radius_km.is_finite() {
            errors.add("radius", "The radius field must be a number.");
        } else {
            check_radius(&mut errors, self.radius_km, config);
        }
        check_latitude(&mut errors, "latitude", self.center.latitude);
        check_longitude(&mut errors, "longitude", self.center.longitude);
        check_filters(&mut errors, &self.filters);
        check_page(&mut errors, i64::from(self.page));
        check_per_page(&mut errors, i64::from(self.per_page), config);
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceAnnotatedListing {
    #[serde(flatten)]
    pub listing: ListingRecord,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: usize,
}

impl<T> Page<T> {
    /// Slice page `page` (1-based) out of the fully sorted result.
    fn slice(all: Vec<T>, page: u32, per_page: u32) -> Self {
        let total = all.len();
        let size = per_page.max(1) as usize;
        let offset = (page.max(1) as usize - 1).saturating_mul(size);
        let items = all.into_iter().skip(offset).take(size).collect();
        Self {
            items,
            total,
            per_page,
            current_page: page,
            last_page: total.div_ceil(size),
        }
    }
}

/// Exact radius search over a candidate snapshot.
///
/// Candidates may be a superset of the answer (e.g. a bounding-box
/// prefilter); inactive or unlocated listings are dropped here.
#[must_use]
pub fn search_by_radius(
    candidates: &[ListingRecord],
    query: &RadiusQuery,
) -> Page<DistanceAnnotatedListing> {
    let mut hits: Vec<DistanceAnnotatedListing> = candidates
        .iter()
        .filter_map(|listing| {
            let location = listing.geo_location()?;
            let distance = distance_km(query.center, location);
            (distance <= query.radius_km && query.filters.matches(listing)).then(|| {
                DistanceAnnotatedListing {
                    listing: listing.clone(),
                    distance_km: distance,
                }
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        query
            .sort
            .primary(&a.listing, &b.listing)
            .then_with(|| a.distance_km.total_cmp(&b.distance_km))
            .then_with(|| a.listing.id.cmp(&b.listing.id))
    });

    Page::slice(hits, query.page, query.per_page)
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
