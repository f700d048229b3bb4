//! [`LeadStore`] backed by PostgreSQL.

use async_trait::async_trait;
use leadbook_core::history::{HistoryEntry, NewHistoryEntry};
use leadbook_core::identity::Identity;
use leadbook_core::lead::{Lead, LeadFields};
use leadbook_core::listing::{LeadPage, LeadQuery};
use leadbook_core::store::{LeadStore, StoreError};
use leadbook_core::types::DbId;

use crate::repositories::{LeadHistoryRepo, LeadRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct PgLeadStore {
    pool: DbPool,
}

impl PgLeadStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn get(&self, id: DbId) -> Result<Option<Lead>, StoreError> {
        LeadRepo::find_by_id(&self.pool, id)
            .await
            .map_err(StoreError::backend)?
            .map(Lead::try_from)
            .transpose()
    }

    async fn create(&self, fields: &LeadFields, owner: &Identity) -> Result<Lead, StoreError> {
        let row = LeadRepo::create(&self.pool, fields, owner.as_str())
            .await
            .map_err(StoreError::backend)?;
        Lead::try_from(row)
    }

    async fn update(&self, id: DbId, fields: &LeadFields) -> Result<Option<Lead>, StoreError> {
        LeadRepo::update(&self.pool, id, fields)
            .await
            .map_err(StoreError::backend)?
            .map(Lead::try_from)
            .transpose()
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        LeadRepo::delete(&self.pool, id)
            .await
            .map_err(StoreError::backend)
    }

    async fn list(&self, query: &LeadQuery) -> Result<LeadPage, StoreError> {
        let rows = LeadRepo::list(&self.pool, query)
            .await
            .map_err(StoreError::backend)?;
        let total = LeadRepo::count(&self.pool, query)
            .await
            .map_err(StoreError::backend)?;
        let items = rows
            .into_iter()
            .map(Lead::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(total, returned = items.len(), "Listed leads");
        Ok(LeadPage { items, total })
    }

    async fn append_history(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, StoreError> {
        let row = LeadHistoryRepo::append(&self.pool, entry)
            .await
            .map_err(StoreError::backend)?;
        HistoryEntry::try_from(row)
    }

    async fn list_history(
        &self,
        lead_id: DbId,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        LeadHistoryRepo::list_for_lead(&self.pool, lead_id, limit)
            .await
            .map_err(StoreError::backend)?
            .into_iter()
            .map(HistoryEntry::try_from)
            .collect()
    }
}
