//! `buyer_lead_history` row model. Rows are immutable (no `updated_at`).

use leadbook_core::diff::FieldDiff;
use leadbook_core::history::HistoryEntry;
use leadbook_core::store::StoreError;
use leadbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub id: DbId,
    pub lead_id: DbId,
    pub changed_by: String,
    pub changed_at: Timestamp,
    pub diff: serde_json::Value,
}

impl TryFrom<HistoryRow> for HistoryEntry {
    type Error = StoreError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        let diff: FieldDiff =
            serde_json::from_value(row.diff).map_err(|e| StoreError::Corrupt {
                entity: "history entry",
                id: row.id,
                reason: e.to_string(),
            })?;

        Ok(HistoryEntry {
            id: row.id,
            lead_id: row.lead_id,
            changed_by: row.changed_by,
            changed_at: row.changed_at,
            diff,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(diff: serde_json::Value) -> HistoryRow {
        HistoryRow {
            id: 1,
            lead_id: 2,
            changed_by: "anonymous".into(),
            changed_at: chrono::Utc::now(),
            diff,
        }
    }

    #[test]
    fn string_map_diff_converts() {
        let entry = HistoryEntry::try_from(row(json!({"status": "new → lost"}))).unwrap();
        assert_eq!(entry.diff["status"], "new → lost");
    }

    #[test]
    fn non_string_values_are_corrupt() {
        let err = HistoryEntry::try_from(row(json!({"status": 3}))).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { id: 1, .. }));
    }
}
