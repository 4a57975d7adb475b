//! [`ListingStore`] backed by the Postgres `listings` table.

use async_trait::async_trait;
use propmap_core::{CandidateFilter, ListingRecord, ListingStore, StoreError};
use sqlx::PgPool;

use crate::listings::list_active_geo_listings;

#[derive(Debug, Clone)]
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: &sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn active_listings(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<ListingRecord>, StoreError> {
        let rows = list_active_geo_listings(&self.pool, filter)
            .await
            .map_err(|e| unavailable(&e))?;
        rows.into_iter().map(ListingRecord::try_from).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::ping(&self.pool).await.map_err(|e| unavailable(&e))
    }
}
