use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{LeadStore, StoreError};
use crate::history::{HistoryEntry, NewHistoryEntry};
use crate::identity::Identity;
use crate::lead::{Lead, LeadFields};
use crate::listing::{LeadPage, LeadQuery};
use crate::types::DbId;

#[derive(Default)]
struct Inner {
    leads: BTreeMap<DbId, Lead>,
    history: Vec<HistoryEntry>,
    last_lead_id: DbId,
    last_history_id: DbId,
}

/// Process-local store. Contents are lost on restart.
///
/// Thread-safe via interior `RwLock`; wrap in `Arc` to share.
#[derive(Default)]
pub struct MemoryLeadStore {
    inner: RwLock<Inner>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn get(&self, id: DbId) -> Result<Option<Lead>, StoreError> {
        Ok(self.inner.read().await.leads.get(&id).cloned())
    }

    async fn create(&self, fields: &LeadFields, owner: &Identity) -> Result<Lead, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_lead_id += 1;
        let now = chrono::Utc::now();
        let lead = Lead {
            id: inner.last_lead_id,
            fields: fields.clone(),
            owner_id: owner.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.leads.insert(lead.id, lead.clone());
        Ok(lead)
    }

    async fn update(&self, id: DbId, fields: &LeadFields) -> Result<Option<Lead>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.leads.get_mut(&id).map(|lead| {
            lead.fields = fields.clone();
            lead.updated_at = chrono::Utc::now();
            lead.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.leads.remove(&id).is_some())
    }

    async fn list(&self, query: &LeadQuery) -> Result<LeadPage, StoreError> {
        let inner = self.inner.read().await;
        let mut matched: Vec<&Lead> = inner.leads.values().filter(|l| query.matches(l)).collect();
        matched.sort_by(|a, b| query.ordering.compare(a, b));

        let total = matched.len() as i64;
        let skip = usize::try_from(query.offset).unwrap_or(0);
        let take = query
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);
        let items = matched.into_iter().skip(skip).take(take).cloned().collect();

        Ok(LeadPage { items, total })
    }

    async fn append_history(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_history_id += 1;
        let stored = HistoryEntry {
            id: inner.last_history_id,
            lead_id: entry.lead_id,
            changed_by: entry.changed_by.clone(),
            changed_at: chrono::Utc::now(),
            diff: entry.diff.clone(),
        };
        inner.history.push(stored.clone());
        Ok(stored)
    }

    async fn list_history(
        &self,
        lead_id: DbId,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        let take = usize::try_from(limit).unwrap_or(0);
        // Entries are appended in id order, so reverse iteration is newest first.
        Ok(self
            .inner
            .read()
            .await
            .history
            .iter()
            .rev()
            .filter(|h| h.lead_id == lead_id)
            .take(take)
            .cloned()
            .collect())
    }
}
