//! Append-only audit trail for lead mutations.

use serde::{Deserialize, Serialize};

use crate::diff::FieldDiff;
use crate::identity::Identity;
use crate::types::{DbId, Timestamp};

/// Key used for the single-entry diffs of non-update mutations.
pub const ACTION_KEY: &str = "action";
pub const ACTION_CREATED: &str = "created";
pub const ACTION_IMPORTED: &str = "imported_from_csv";

/// Entries returned when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: i64 = 5;
pub const MAX_HISTORY_LIMIT: i64 = 50;

/// A stored history entry. Never modified after it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub lead_id: DbId,
    pub changed_by: String,
    pub changed_at: Timestamp,
    pub diff: FieldDiff,
}

/// An entry about to be appended. The store assigns `id` and `changed_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub lead_id: DbId,
    pub changed_by: String,
    pub diff: FieldDiff,
}

impl NewHistoryEntry {
    pub fn changes(lead_id: DbId, actor: &Identity, diff: FieldDiff) -> Self {
        Self {
            lead_id,
            changed_by: actor.as_str().to_string(),
            diff,
        }
    }

    /// `{"action": <action>}` entry.
    pub fn action(lead_id: DbId, actor: &Identity, action: &str) -> Self {
        let diff = FieldDiff::from([(ACTION_KEY.to_string(), action.to_string())]);
        Self::changes(lead_id, actor, diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_entry_shape() {
        let entry = NewHistoryEntry::action(3, &Identity::anonymous(), ACTION_IMPORTED);
        assert_eq!(entry.changed_by, "anonymous");
        assert_eq!(entry.diff.len(), 1);
        assert_eq!(entry.diff["action"], "imported_from_csv");
    }

    #[test]
    fn diff_serializes_as_plain_object() {
        let entry = HistoryEntry {
            id: 1,
            lead_id: 2,
            changed_by: "u1".into(),
            changed_at: chrono::Utc::now(),
            diff: FieldDiff::from([("status".to_string(), "new → lost".to_string())]),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["diff"]["status"], "new → lost");
    }
}
