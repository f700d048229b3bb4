//! Record store abstraction for leads and their history.
//!
//! The import pipeline and the lead service only ever talk to
//! [`LeadStore`]. `leadbook-db` provides the PostgreSQL implementation;
//! [`MemoryLeadStore`] backs tests and database-less deployments.

mod memory;

pub use memory::MemoryLeadStore;

use async_trait::async_trait;

use crate::history::{HistoryEntry, NewHistoryEntry};
use crate::identity::Identity;
use crate::lead::{Lead, LeadFields};
use crate::listing::{LeadPage, LeadQuery};
use crate::types::DbId;

/// Boxed backend error, as surfaced by sqlx or any other driver.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A stored row could not be mapped back into a lead or history entry.
    #[error("Stored {entity} {id} is unreadable: {reason}")]
    Corrupt {
        entity: &'static str,
        id: DbId,
        reason: String,
    },

    #[error(transparent)]
    Backend(#[from] BoxError),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Persistence for lead records and their append-only history.
///
/// Implementations assign ids and timestamps. `update` replaces every
/// writable field and bumps `updated_at`; `delete` leaves history alone.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn get(&self, id: DbId) -> Result<Option<Lead>, StoreError>;

    async fn create(&self, fields: &LeadFields, owner: &Identity) -> Result<Lead, StoreError>;

    /// Returns `None` when no lead has `id`.
    async fn update(&self, id: DbId, fields: &LeadFields) -> Result<Option<Lead>, StoreError>;

    /// Returns `true` if a lead was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    async fn list(&self, query: &LeadQuery) -> Result<LeadPage, StoreError>;

    async fn append_history(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, StoreError>;

    /// Newest first, at most `limit` entries.
    async fn list_history(&self, lead_id: DbId, limit: i64)
        -> Result<Vec<HistoryEntry>, StoreError>;
}
