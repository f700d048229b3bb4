//! Lead operations shared by every entry point.
//!
//! Each mutation validates, persists through the [`LeadStore`] and appends
//! the matching history entry. The actor is always passed in explicitly.

use crate::csv_codec;
use crate::diff::{apply_patch, diff_lead};
use crate::error::CoreError;
use crate::fields;
use crate::history::{
    HistoryEntry, NewHistoryEntry, ACTION_CREATED, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
use crate::identity::Identity;
use crate::lead::{overlay, Lead, LeadPatch, RawFields, UpdateMode};
use crate::listing::{clamp_limit, LeadPage, LeadQuery};
use crate::store::LeadStore;
use crate::types::DbId;
use crate::validation::validate_lead;

const ENTITY: &str = "buyer";

/// Validate and save a new lead, recording a `created` history entry.
pub async fn create_lead(
    store: &dyn LeadStore,
    raw: &RawFields,
    actor: &Identity,
) -> Result<Lead, CoreError> {
    let valid = validate_lead(raw).map_err(CoreError::InvalidLead)?;
    let lead = store.create(&valid.fields, actor).await?;
    store
        .append_history(&NewHistoryEntry::action(lead.id, actor, ACTION_CREATED))
        .await?;

    tracing::info!(lead_id = lead.id, actor = %actor, "Lead created");
    Ok(lead)
}

/// Apply incoming changes to an existing lead.
///
/// A full update validates `incoming` on its own and replaces every field.
/// A partial update validates the stored record overlaid with `incoming` and
/// only touches the supplied fields. A history entry is written only when
/// at least one supplied field actually changed.
pub async fn update_lead(
    store: &dyn LeadStore,
    id: DbId,
    incoming: &RawFields,
    mode: UpdateMode,
    actor: &Identity,
) -> Result<Lead, CoreError> {
    let existing = get_lead(store, id).await?;

    let patch = match mode {
        UpdateMode::Full => {
            let valid = validate_lead(incoming).map_err(CoreError::InvalidLead)?;
            LeadPatch::full(&valid.fields)
        }
        UpdateMode::Partial => {
            let merged = overlay(existing.fields.to_raw_fields(), incoming);
            let valid = validate_lead(&merged).map_err(CoreError::InvalidLead)?;
            let supplied = incoming
                .keys()
                .map(String::as_str)
                .filter(|name| fields::is_writable(name));
            LeadPatch::select(&valid.fields, supplied)
        }
    };

    let changes = diff_lead(&existing.fields, &patch);
    let next = apply_patch(&existing.fields, &patch);
    let lead = store
        .update(id, &next)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    if !changes.is_empty() {
        store
            .append_history(&NewHistoryEntry::changes(id, actor, changes))
            .await?;
    }

    tracing::info!(lead_id = id, actor = %actor, ?mode, "Lead updated");
    Ok(lead)
}

pub async fn get_lead(store: &dyn LeadStore, id: DbId) -> Result<Lead, CoreError> {
    store
        .get(id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })
}

/// Remove a lead. Its history stays.
pub async fn delete_lead(
    store: &dyn LeadStore,
    id: DbId,
    actor: &Identity,
) -> Result<(), CoreError> {
    if !store.delete(id).await? {
        return Err(CoreError::NotFound { entity: ENTITY, id });
    }
    tracing::info!(lead_id = id, actor = %actor, "Lead deleted");
    Ok(())
}

pub async fn list_leads(store: &dyn LeadStore, query: &LeadQuery) -> Result<LeadPage, CoreError> {
    Ok(store.list(query).await?)
}

/// Most recent history entries for a lead, newest first.
///
/// Works for deleted leads too; an unknown id yields an empty list.
pub async fn lead_history(
    store: &dyn LeadStore,
    id: DbId,
    limit: Option<i64>,
) -> Result<Vec<HistoryEntry>, CoreError> {
    let limit = clamp_limit(limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
    Ok(store.list_history(id, limit).await?)
}

/// Every lead matching `query`'s search and filters as an export CSV.
/// Pagination on `query` is ignored.
pub async fn export_leads(store: &dyn LeadStore, query: &LeadQuery) -> Result<String, CoreError> {
    let query = LeadQuery {
        limit: None,
        offset: 0,
        ..query.clone()
    };
    let page = store.list(&query).await?;
    tracing::debug!(count = page.items.len(), "Exporting leads");
    csv_codec::export_leads(&page.items).map_err(|e| CoreError::Internal(e.to_string()))
}
