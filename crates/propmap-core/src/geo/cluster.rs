use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use super::config::ClusterConfig;
use super::point::{BoundingBox, GeoPoint};
use super::zoom::{select_display_mode, DisplayMode};
use crate::listings::{ListingFilters, ListingRecord, PropertyType};
use crate::validation::{check_bounds, check_price_range, check_zoom, FieldErrors, ValidationError};

/// A validated viewport request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterQuery {
    pub bounds: BoundingBox,
    pub zoom_level: u8,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ClusterQuery {
    #[must_use]
    pub fn new(bounds: BoundingBox, zoom_level: u8) -> Self {
        Self {
            bounds,
            zoom_level,
            property_type: None,
            min_price: None,
            max_price: None,
        }
    }

    #[must_use]
    pub fn filters(&self) -> ListingFilters {
        ListingFilters {
            property_type: self.property_type,
            min_price: self.min_price,
            max_price: self.max_price,
            ..ListingFilters::default()
        }
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every out-of-range field.
    pub fn validate(&self, config: &ClusterConfig) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        let b = self.bounds;
        check_bounds(
            &mut errors,
            Some(b.north),
            Some(b.south),
            Some(b.east),
            Some(b.west),
        );
        check_zoom(&mut errors, i64::from(self.zoom_level), config);
        check_price_range(&mut errors, self.min_price, self.max_price);
        errors.into_result()
    }
}

/// One listing as a map pin, used at high zoom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub latitude: f64,
    pub longitude: f64,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCluster {
    #[serde(flatten)]
    pub cell_center: GeoPoint,
    pub count: usize,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub property_types: BTreeSet<PropertyType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum MapView {
    Individual(Vec<MapMarker>),
    Cluster(Vec<GridCluster>),
}

impl MapView {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MapView::Individual(_) => "individual",
            MapView::Cluster(_) => "cluster",
        }
    }

    /// Number of markers or clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            MapView::Individual(markers) => markers.len(),
            MapView::Cluster(clusters) => clusters.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Markers or grid clusters for the listings visible in a viewport.
///
/// Candidates outside the bounds, inactive, unlocated or rejected by the
/// query filters are dropped; the rest are taken in id order up to
/// `candidate_cap`.
#[must_use]
pub fn cluster_listings(
    candidates: &[ListingRecord],
    query: &ClusterQuery,
    config: &ClusterConfig,
) -> MapView {
    let filters = query.filters();
    let mut visible: Vec<(&ListingRecord, GeoPoint)> = candidates
        .iter()
        .filter_map(|listing| {
            let location = listing.geo_location()?;
            (query.bounds.contains(location) && filters.matches(listing))
                .then_some((listing, location))
        })
        .collect();
    visible.sort_by_key(|(listing, _)| listing.id);
    visible.truncate(config.candidate_cap);

    match select_display_mode(query.zoom_level, config) {
        DisplayMode::Individual => MapView::Individual(
            visible
                .into_iter()
                .map(|(listing, location)| MapMarker {
                    id: listing.id,
                    title: listing.title.clone(),
                    price: listing.price,
                    property_type: listing.property_type,
                    latitude: location.latitude,
                    longitude: location.longitude,
                    thumbnail_url: listing.thumbnail_url.clone(),
                })
                .collect(),
        ),
        DisplayMode::Cluster { grid_size } => MapView::Cluster(grid_clusters(
            visible
                .into_iter()
                .map(|(listing, location)| (location, listing)),
            grid_size,
        )),
    }
}

struct CellAccumulator {
    count: usize,
    min_price: Decimal,
    max_price: Decimal,
    property_types: BTreeSet<PropertyType>,
}

/// Bucket located listings into `grid_size`-degree cells.
///
/// Cells are keyed by `(floor(lat / g), floor(lng / g))` and returned in key
/// order, south-west first. The division is plain `f64`, so a coordinate
/// sitting exactly on a cell edge can land in the cell below it
/// (`0.3 / 0.1` is `2.9999999999999996`, putting latitude 0.3 in the cell
/// centred on 0.25).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn grid_clusters<'a>(
    points: impl IntoIterator<Item = (GeoPoint, &'a ListingRecord)>,
    grid_size: f64,
) -> Vec<GridCluster> {
    let mut cells: BTreeMap<(i64, i64), CellAccumulator> = BTreeMap::new();

    for (location, listing) in points {
        let key = (
            (location.latitude / grid_size).floor() as i64,
            (location.longitude / grid_size).floor() as i64,
        );
        cells
            .entry(key)
            .and_modify(|cell| {
                cell.count += 1;
                cell.min_price = cell.min_price.min(listing.price);
                cell.max_price = cell.max_price.max(listing.price);
                cell.property_types.insert(listing.property_type);
            })
            .or_insert_with(|| CellAccumulator {
                count: 1,
                min_price: listing.price,
                max_price: listing.price,
                property_types: BTreeSet::from([listing.property_type]),
            });
    }

    let half = grid_size / 2.0;
    cells
        .into_iter()
        .map(|((lat_key, lng_key), cell)| GridCluster {
            cell_center: GeoPoint::new(
                lat_key as f64 * grid_size + half,
                lng_key as f64 * grid_size + half,
            ),
            count: cell.count,
            min_price: cell.min_price,
            max_price: cell.max_price,
            property_types: cell.property_types,
        })
        .collect()
}
