use std::sync::Arc;

use super::cluster::{cluster_listings, ClusterQuery, MapView};
use super::config::GeoConfig;
use super::point::BoundingBox;
use super::search::{search_by_radius, DistanceAnnotatedListing, Page, RadiusQuery};
use crate::store::{CandidateFilter, ListingStore, StoreError};

/// Runs validated map queries against a [`ListingStore`].
#[derive(Clone)]
pub struct MapSearchService {
    store: Arc<dyn ListingStore>,
    config: GeoConfig,
}

impl MapSearchService {
    #[must_use]
    pub fn new(store: Arc<dyn ListingStore>, config: GeoConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn config(&self) -> &GeoConfig {
        &self.config
    }

    /// Radius search. The store is asked only for listings inside a box that
    /// encloses the search circle; exact distance filtering happens here.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if candidates cannot be loaded.
    pub async fn search(
        &self,
        query: &RadiusQuery,
    ) -> Result<Page<DistanceAnnotatedListing>, StoreError> {
        let filter = CandidateFilter {
            bounds: Some(BoundingBox::around(query.center, query.radius_km)),
            property_type: query.filters.property_type,
            min_price: query.filters.min_price,
            max_price: query.filters.max_price,
            limit: None,
        };
        let candidates = self.store.active_listings(&filter).await?;
        let page = search_by_radius(&candidates, query);
        tracing::debug!(
            candidates = candidates.len(),
            total = page.total,
            radius_km = query.radius_km,
            "radius search"
        );
        Ok(page)
    }

    /// Viewport clusters or markers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if candidates cannot be loaded.
    pub async fn clusters(&self, query: &ClusterQuery) -> Result<MapView, StoreError> {
        let filter = CandidateFilter {
            bounds: Some(query.bounds),
            property_type: query.property_type,
            min_price: query.min_price,
            max_price: query.max_price,
            limit: Some(self.config.cluster.candidate_cap),
        };
        let candidates = self.store.active_listings(&filter).await?;
        let view = cluster_listings(&candidates, query, &self.config.cluster);
        tracing::debug!(
            candidates = candidates.len(),
            zoom = query.zoom_level,
            mode = view.kind(),
            items = view.len(),
            "map clusters"
        );
        Ok(view)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store does not answer.
    pub async fn health(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

impl std::fmt::Debug for MapSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSearchService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::store::InMemoryListingStore;
    use crate::test_support::{cairo_lattice, CAIRO};

    fn service() -> MapSearchService {
        MapSearchService::new(
            Arc::new(InMemoryListingStore::new(cairo_lattice())),
            GeoConfig::default(),
        )
    }

    #[tokio::test]
    async fn prefiltered_search_matches_unfiltered_planner() {
        let service = service();
        let candidates = cairo_lattice();
        let mut query = RadiusQuery::new(CAIRO, 7.5, service.config());
        query.per_page = 50;

        let via_service = service.search(&query).await.expect("search");
        let direct = search_by_radius(&candidates, &query);
        assert_eq!(via_service, direct);
        assert!(via_service.total > 0);
    }

    #[tokio::test]
    async fn clusters_respect_the_cap() {
        let service = service();
        let bounds = BoundingBox {
            north: 30.3,
            south: 29.8,
            east: 31.5,
            west: 31.0,
        };
        let view = service
            .clusters(&ClusterQuery::new(bounds, 16))
            .await
            .expect("clusters");
        assert_eq!(view.len(), 500);
    }

    #[tokio::test]
    async fn search_far_from_any_listing_is_empty() {
        let service = service();
        let query = RadiusQuery::new(GeoPoint::new(-33.86, 151.2), 50.0, service.config());
        let page = service.search(&query).await.expect("search");
        assert_eq!(page.total, 0);
        assert_eq!(page.last_page, 0);
        assert!(service.health().await.is_ok());
    }
}
