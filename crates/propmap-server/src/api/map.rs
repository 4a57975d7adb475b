use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use propmap_core::{
    parse_cluster_query, parse_radius_query, DistanceAnnotatedListing, ListingStatus,
    ListingType, MapView, PropertyType,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ListingItem {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub area: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub status: ListingStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub distance_km: f64,
}

impl From<DistanceAnnotatedListing> for ListingItem {
    fn from(hit: DistanceAnnotatedListing) -> Self {
        let listing = hit.listing;
        Self {
            id: listing.id,
            title: listing.title,
            price: listing.price,
            property_type: listing.property_type,
            listing_type: listing.listing_type,
            area: listing.area,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            status: listing.status,
            latitude: listing.location.map(|p| p.latitude),
            longitude: listing.location.map(|p| p.longitude),
            city: listing.city,
            address: listing.address,
            thumbnail_url: listing.thumbnail_url,
            created_at: listing.created_at,
            distance_km: round_km(hit.distance_km),
        }
    }
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
pub(super) struct SearchMeta {
    pub total: usize,
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: usize,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub data: Vec<ListingItem>,
    pub meta: SearchMeta,
}

/// `{type, data, count, meta}`; `type` and `data` come from [`MapView`].
#[derive(Debug, Serialize)]
pub(super) struct ClusterResponse {
    #[serde(flatten)]
    pub view: MapView,
    pub count: usize,
    pub meta: ResponseMeta,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = parse_radius_query(&params, state.map.config())
        .map_err(|e| ApiError::validation(req_id.0.clone(), e))?;

    let page = state
        .map
        .search(&query)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(SearchResponse {
        meta: SearchMeta {
            total: page.total,
            per_page: page.per_page,
            current_page: page.current_page,
            last_page: page.last_page,
            request_id: req_id.0,
            timestamp: Utc::now(),
        },
        data: page.items.into_iter().map(ListingItem::from).collect(),
    }))
}

pub(super) async fn clusters(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ClusterResponse>, ApiError> {
    let query = parse_cluster_query(&params, state.map.config())
        .map_err(|e| ApiError::validation(req_id.0.clone(), e))?;

    let view = state
        .map
        .clusters(&query)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ClusterResponse {
        count: view.len(),
        view,
        meta: ResponseMeta::new(req_id.0),
    }))
}
