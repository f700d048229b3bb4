//! Repository for the `buyer_leads` table.

use leadbook_core::lead::LeadFields;
use leadbook_core::listing::LeadQuery;
use leadbook_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{PgPool, Postgres};

use crate::models::lead::LeadRow;

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `buyer_leads` SELECT / RETURNING clauses.
const COLUMNS: &str = "\
    id, full_name, email, phone, city, property_type, bhk, purpose, \
    budget_min, budget_max, timeline, source, status, notes, tags, \
    owner_id, created_at, updated_at";

/// Writable columns in bind order (`$1..$14`).
const WRITE_COLUMNS: &str = "\
    full_name, email, phone, city, property_type, bhk, purpose, \
    budget_min, budget_max, timeline, source, status, notes, tags";

/// Shared WHERE clause for list and count. Binds `$1..$5`.
const FILTER: &str = "\
    WHERE ($1::text IS NULL OR full_name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1) \
      AND ($2::text IS NULL OR city = $2) \
      AND ($3::text IS NULL OR property_type = $3) \
      AND ($4::text IS NULL OR status = $4) \
      AND ($5::text IS NULL OR timeline = $5)";

// ---------------------------------------------------------------------------
// LeadRepo
// ---------------------------------------------------------------------------

/// CRUD and list queries for buyer leads.
pub struct LeadRepo;

impl LeadRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buyer_leads WHERE id = $1");
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a lead owned by `owner_id`. Timestamps come from the database.
    pub async fn create(
        pool: &PgPool,
        fields: &LeadFields,
        owner_id: &str,
    ) -> Result<LeadRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO buyer_leads ({WRITE_COLUMNS}, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        bind_fields(sqlx::query_as::<_, LeadRow>(&query), fields)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// Replace every writable column and bump `updated_at`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &LeadFields,
    ) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!(
            "UPDATE buyer_leads SET \
                full_name = $1, email = $2, phone = $3, city = $4, \
                property_type = $5, bhk = $6, purpose = $7, \
                budget_min = $8, budget_max = $9, timeline = $10, \
                source = $11, status = $12, notes = $13, tags = $14, \
                updated_at = NOW() \
             WHERE id = $15 \
             RETURNING {COLUMNS}"
        );
        bind_fields(sqlx::query_as::<_, LeadRow>(&query), fields)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM buyer_leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of leads matching `params`. A `None` limit returns every match.
    pub async fn list(pool: &PgPool, params: &LeadQuery) -> Result<Vec<LeadRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM buyer_leads {FILTER} \
             ORDER BY {} \
             LIMIT $6 OFFSET $7",
            params.ordering.sql()
        );
        bind_filter(sqlx::query_as::<_, LeadRow>(&query), params)
            .bind(params.limit)
            .bind(params.offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching `params`, ignoring pagination.
    pub async fn count(pool: &PgPool, params: &LeadQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM buyer_leads {FILTER}");
        bind_filter_scalar(sqlx::query_scalar::<_, i64>(&query), params)
            .fetch_one(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Bind helpers
// ---------------------------------------------------------------------------

fn bind_fields<'q>(
    q: QueryAs<'q, Postgres, LeadRow, PgArguments>,
    fields: &'q LeadFields,
) -> QueryAs<'q, Postgres, LeadRow, PgArguments> {
    q.bind(&fields.full_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.city.code())
        .bind(fields.property_type.code())
        .bind(fields.bhk.map(|b| b.code()))
        .bind(fields.purpose.code())
        .bind(fields.budget_min)
        .bind(fields.budget_max)
        .bind(fields.timeline.code())
        .bind(fields.source.code())
        .bind(fields.status.code())
        .bind(&fields.notes)
        .bind(&fields.tags)
}

/// `$1..$5` values for [`FILTER`].
fn filter_values(params: &LeadQuery) -> [Option<String>; 5] {
    [
        params.search_term().map(like_pattern),
        params.city.map(|c| c.code().to_string()),
        params.property_type.map(|p| p.code().to_string()),
        params.status.map(|s| s.code().to_string()),
        params.timeline.map(|t| t.code().to_string()),
    ]
}

fn bind_filter<'q>(
    mut q: QueryAs<'q, Postgres, LeadRow, PgArguments>,
    params: &LeadQuery,
) -> QueryAs<'q, Postgres, LeadRow, PgArguments> {
    for value in filter_values(params) {
        q = q.bind(value);
    }
    q
}

fn bind_filter_scalar<'q>(
    mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    params: &LeadQuery,
) -> QueryScalar<'q, Postgres, i64, PgArguments> {
    for value in filter_values(params) {
        q = q.bind(value);
    }
    q
}

/// Wrap a search term for `ILIKE`, escaping its wildcards.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
