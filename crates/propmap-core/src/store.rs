//! Read-only access to listings for the geo queries.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::geo::BoundingBox;
use crate::listings::{ListingRecord, PropertyType};

/// Coarse predicate pushed down to a store.
///
/// Stores return only active, located listings matching every set field,
/// ordered by id ascending and truncated to `limit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
    pub bounds: Option<BoundingBox>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub limit: Option<usize>,
}

impl CandidateFilter {
    #[must_use]
    pub fn matches(&self, listing: &ListingRecord) -> bool {
        let Some(location) = listing.geo_location() else {
            return false;
        };
        self.bounds.is_none_or(|b| b.contains(location))
            && self.property_type.is_none_or(|t| listing.property_type == t)
            && self.min_price.is_none_or(|min| listing.price >= min)
            && self.max_price.is_none_or(|max| listing.price <= max)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("listing store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed listing row {id}: {reason}")]
    MalformedRow { id: i64, reason: String },
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Candidate listings for a geo query.
    async fn active_listings(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<ListingRecord>, StoreError>;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Store over a fixed in-process snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingStore {
    listings: Vec<ListingRecord>,
}

impl InMemoryListingStore {
    #[must_use]
    pub fn new(mut listings: Vec<ListingRecord>) -> Self {
        listings.sort_by_key(|l| l.id);
        Self { listings }
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn active_listings(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<ListingRecord>, StoreError> {
        Ok(self
            .listings
            .iter()
            .filter(|l| filter.matches(l))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ListingStatus;
    use crate::test_support::listing;

    #[tokio::test]
    async fn in_memory_store_filters_and_limits_in_id_order() {
        let mut pending = listing(2, 30.1, 31.3);
        pending.status = ListingStatus::Pending;
        let mut unlocated = listing(4, 0.0, 0.0);
        unlocated.location = None;
        let store = InMemoryListingStore::new(vec![
            listing(5, 30.1, 31.3),
            pending,
            listing(1, 30.1, 31.3),
            unlocated,
            listing(3, 45.0, 10.0),
        ]);

        let filter = CandidateFilter {
            bounds: Some(BoundingBox {
                north: 31.0,
                south: 30.0,
                east: 32.0,
                west: 31.0,
            }),
            ..CandidateFilter::default()
        };
        let ids: Vec<i64> = store
            .active_listings(&filter)
            .await
            .expect("in-memory query")
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![1, 5]);

        let limited = CandidateFilter {
            limit: Some(1),
            ..filter
        };
        let rows = store.active_listings(&limited).await.expect("in-memory query");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
    }

    #[tokio::test]
    async fn price_bounds_are_inclusive() {
        let store = InMemoryListingStore::new(vec![
            listing(1, 30.1, 31.3),
            listing(2, 30.1, 31.3),
            listing(3, 30.1, 31.3),
        ]);
        let filter = CandidateFilter {
            min_price: Some(Decimal::from(2_000)),
            max_price: Some(Decimal::from(3_000)),
            ..CandidateFilter::default()
        };
        let rows = store.active_listings(&filter).await.expect("in-memory query");
        assert_eq!(rows.len(), 2);
        assert!(store.ping().await.is_ok());
    }
}
