//! Bulk CSV import.
//!
//! Rows are validated independently; bad rows are reported back with their
//! original data while good rows are saved in file order, each followed by
//! an `imported_from_csv` history entry. Writes are not transactional: a
//! store failure part-way leaves the rows saved so far in place.

use serde::Serialize;

use crate::csv_codec::{self, CsvError};
use crate::history::{NewHistoryEntry, ACTION_IMPORTED};
use crate::identity::Identity;
use crate::lead::{LeadFields, RawFields};
use crate::store::{LeadStore, StoreError};
use crate::types::DbId;
use crate::validation::validate_lead;

/// Largest batch accepted in one import.
pub const MAX_IMPORT_ROWS: usize = 200;

/// Data rows are numbered as in a spreadsheet: the header is row 1.
pub const FIRST_DATA_ROW: usize = 2;

/// Failures that abort the whole batch.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV file contains more than {limit} rows. Please split into smaller files.")]
    TooManyRows { count: usize, limit: usize },

    #[error("Failed to process CSV file: {0}")]
    Unreadable(#[from] CsvError),

    #[error("Failed to process CSV file: {0}")]
    Store(#[from] StoreError),
}

/// A row that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: usize,
    /// Every validation message for the row, joined with `"; "`.
    pub error: String,
    /// The row exactly as read.
    pub data: RawFields,
}

/// A non-blocking notice about an accepted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowWarning {
    pub row: usize,
    pub warning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub errors: Vec<RowError>,
    pub warnings: Vec<RowWarning>,
    /// Ids of the saved leads, in row order.
    pub created_buyers: Vec<DbId>,
}

/// Decode and parse an uploaded CSV body, then import its rows.
pub async fn import_csv(
    bytes: &[u8],
    actor: &Identity,
    store: &dyn LeadStore,
) -> Result<ImportSummary, ImportError> {
    let rows = csv_codec::parse_rows(bytes)?;
    import_batch(rows, actor, store).await
}

/// Validate every row, then save the valid ones in order.
pub async fn import_batch(
    rows: Vec<RawFields>,
    actor: &Identity,
    store: &dyn LeadStore,
) -> Result<ImportSummary, ImportError> {
    if rows.len() > MAX_IMPORT_ROWS {
        return Err(ImportError::TooManyRows {
            count: rows.len(),
            limit: MAX_IMPORT_ROWS,
        });
    }

    let mut summary = ImportSummary {
        total_rows: rows.len(),
        ..Default::default()
    };
    let mut accepted: Vec<LeadFields> = Vec::new();

    for (row, data) in (FIRST_DATA_ROW..).zip(rows) {
        match validate_lead(&data) {
            Ok(valid) => {
                summary.valid_rows += 1;
                summary.warnings.extend(
                    valid
                        .advisories
                        .into_iter()
                        .map(|warning| RowWarning { row, warning }),
                );
                accepted.push(valid.fields);
            }
            Err(messages) => {
                summary.invalid_rows += 1;
                summary.errors.push(RowError {
                    row,
                    error: messages.join("; "),
                    data,
                });
            }
        }
    }

    for fields in &accepted {
        let lead = store.create(fields, actor).await?;
        store
            .append_history(&NewHistoryEntry::action(lead.id, actor, ACTION_IMPORTED))
            .await?;
        summary.created_buyers.push(lead.id);
    }

    tracing::info!(
        total = summary.total_rows,
        valid = summary.valid_rows,
        invalid = summary.invalid_rows,
        actor = %actor,
        "CSV import finished",
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::history::HistoryEntry;
    use crate::lead::test_support::raw_apartment;
    use crate::lead::Lead;
    use crate::listing::{LeadPage, LeadQuery};
    use crate::store::MemoryLeadStore;

    fn row_with(key: &str, value: &str) -> RawFields {
        let mut raw = raw_apartment();
        raw.insert(key.to_string(), value.to_string());
        raw
    }

    #[tokio::test]
    async fn rejects_oversized_batches_before_saving() {
        let store = MemoryLeadStore::new();
        let rows = vec![raw_apartment(); MAX_IMPORT_ROWS + 1];

        let err = import_batch(rows, &Identity::anonymous(), &store).await.unwrap_err();
        assert_matches!(err, ImportError::TooManyRows { count: 201, limit: 200 });
        assert_eq!(
            err.to_string(),
            "CSV file contains more than 200 rows. Please split into smaller files."
        );
        let page = store.list(&LeadQuery::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn exactly_the_limit_is_accepted() {
        let store = MemoryLeadStore::new();
        let rows = vec![raw_apartment(); MAX_IMPORT_ROWS];
        let summary = import_batch(rows, &Identity::anonymous(), &store).await.unwrap();
        assert_eq!(summary.created_buyers.len(), MAX_IMPORT_ROWS);
    }

    #[tokio::test]
    async fn partitions_valid_and_invalid_rows() {
        let store = MemoryLeadStore::new();
        let bad = row_with("email", "not-an-email");
        let rows = vec![raw_apartment(), bad.clone(), raw_apartment()];

        let summary = import_batch(rows, &Identity::new("agent-7"), &store).await.unwrap();
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.valid_rows, 2);
        assert_eq!(summary.invalid_rows, 1);
        assert_eq!(summary.created_buyers.len(), 2);

        let error = &summary.errors[0];
        assert_eq!(error.row, 3);
        assert!(error.error.contains("Invalid email format"));
        assert_eq!(error.data, bad);

        for id in &summary.created_buyers {
            let lead = store.get(*id).await.unwrap().unwrap();
            assert_eq!(lead.owner_id, "agent-7");
            let history = store.list_history(*id, 5).await.unwrap();
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].diff["action"], "imported_from_csv");
            assert_eq!(history[0].changed_by, "agent-7");
        }
    }

    #[tokio::test]
    async fn row_errors_are_joined() {
        let store = MemoryLeadStore::new();
        let mut bad = row_with("email", "x");
        bad.insert("phone".into(), "123".into());

        let summary = import_batch(vec![bad], &Identity::anonymous(), &store).await.unwrap();
        assert_eq!(
            summary.errors[0].error,
            "Invalid email format; Invalid phone number format"
        );
        assert!(summary.created_buyers.is_empty());
    }

    #[tokio::test]
    async fn atypical_budgets_become_warnings() {
        let store = MemoryLeadStore::new();
        let cheap = row_with("budget_min", "1000");
        let summary =
            import_batch(vec![raw_apartment(), cheap], &Identity::anonymous(), &store)
                .await
                .unwrap();
        assert_eq!(summary.valid_rows, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].row, 3);
    }

    #[tokio::test]
    async fn parses_csv_bodies() {
        let store = MemoryLeadStore::new();
        let body = "full_name,email,phone,city,property_type,bhk,purpose,budget_min,budget_max,timeline,source\n\
                    Asha Rao,asha@example.com,+91 98200-12345,pune,plot,,buy,2500000,4000000,1year,referral\n";
        let summary = import_csv(body.as_bytes(), &Identity::anonymous(), &store)
            .await
            .unwrap();
        assert_eq!(summary.valid_rows, 1);
        let lead = store.get(summary.created_buyers[0]).await.unwrap().unwrap();
        assert_eq!(lead.fields.full_name, "Asha Rao");
        assert_eq!(lead.fields.bhk, None);
        assert_eq!(lead.owner_id, "anonymous");
    }

    #[tokio::test]
    async fn undecodable_body_is_one_batch_error() {
        let store = MemoryLeadStore::new();
        let err = import_csv(&[0xff, 0xfe, 0x00], &Identity::anonymous(), &store)
            .await
            .unwrap_err();
        assert_matches!(err, ImportError::Unreadable(_));
        assert!(err.to_string().starts_with("Failed to process CSV file: "));
    }

    /// Delegates to a memory store but fails every `create` after the first
    /// `allowed` calls.
    struct FlakyStore {
        inner: MemoryLeadStore,
        allowed: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeadStore for FlakyStore {
        async fn get(&self, id: DbId) -> Result<Option<Lead>, StoreError> {
            self.inner.get(id).await
        }

        async fn create(&self, fields: &LeadFields, owner: &Identity) -> Result<Lead, StoreError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= self.allowed {
                return Err(StoreError::backend(std::io::Error::other("connection reset")));
            }
            self.inner.create(fields, owner).await
        }

        async fn update(&self, id: DbId, fields: &LeadFields) -> Result<Option<Lead>, StoreError> {
            self.inner.update(id, fields).await
        }

        async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
            self.inner.delete(id).await
        }

        async fn list(&self, query: &LeadQuery) -> Result<LeadPage, StoreError> {
            self.inner.list(query).await
        }

        async fn append_history(
            &self,
            entry: &NewHistoryEntry,
        ) -> Result<HistoryEntry, StoreError> {
            self.inner.append_history(entry).await
        }

        async fn list_history(
            &self,
            lead_id: DbId,
            limit: i64,
        ) -> Result<Vec<HistoryEntry>, StoreError> {
            self.inner.list_history(lead_id, limit).await
        }
    }

    #[tokio::test]
    async fn store_failure_aborts_without_rollback() {
        let store = FlakyStore {
            inner: MemoryLeadStore::new(),
            allowed: 1,
            calls: AtomicUsize::new(0),
        };
        let rows = vec![raw_apartment(), raw_apartment(), raw_apartment()];

        let err = import_batch(rows, &Identity::anonymous(), &store).await.unwrap_err();
        assert_matches!(err, ImportError::Store(_));
        assert_eq!(err.to_string(), "Failed to process CSV file: connection reset");

        let page = store.list(&LeadQuery::default()).await.unwrap();
        assert_eq!(page.total, 1);
    }
}
