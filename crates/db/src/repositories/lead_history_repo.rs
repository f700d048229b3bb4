//! Repository for the append-only `buyer_lead_history` table.

use leadbook_core::history::NewHistoryEntry;
use leadbook_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::history::HistoryRow;

const COLUMNS: &str = "id, lead_id, changed_by, changed_at, diff";

/// Insert and read history entries. There is no update or delete.
pub struct LeadHistoryRepo;

impl LeadHistoryRepo {
    pub async fn append(pool: &PgPool, entry: &NewHistoryEntry) -> Result<HistoryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO buyer_lead_history (lead_id, changed_by, diff) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryRow>(&query)
            .bind(entry.lead_id)
            .bind(&entry.changed_by)
            .bind(Json(&entry.diff))
            .fetch_one(pool)
            .await
    }

    /// Newest first, at most `limit` rows.
    pub async fn list_for_lead(
        pool: &PgPool,
        lead_id: DbId,
        limit: i64,
    ) -> Result<Vec<HistoryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM buyer_lead_history \
             WHERE lead_id = $1 \
             ORDER BY changed_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, HistoryRow>(&query)
            .bind(lead_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
