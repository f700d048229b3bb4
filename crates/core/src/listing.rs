//! Lead list queries: search, filters, ordering and pagination.
//!
//! Lives in `core` so the SQL store and the in-memory store interpret a
//! query identically.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use crate::choices::{City, PropertyType, Status, Timeline};
use crate::error::CoreError;
use crate::lead::Lead;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for lead lists.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size for lead lists.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-supplied limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-supplied offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Columns a list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    FullName,
    Email,
    City,
    BudgetMin,
    BudgetMax,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column name, also the accepted query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::City => "city",
            Self::BudgetMin => "budget_min",
            Self::BudgetMax => "budget_max",
            Self::Status => "status",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn compare(&self, a: &Lead, b: &Lead) -> Ordering {
        match self {
            Self::FullName => a.fields.full_name.cmp(&b.fields.full_name),
            Self::Email => a.fields.email.cmp(&b.fields.email),
            Self::City => a.fields.city.code().cmp(b.fields.city.code()),
            Self::BudgetMin => a.fields.budget_min.cmp(&b.fields.budget_min),
            Self::BudgetMax => a.fields.budget_max.cmp(&b.fields.budget_max),
            Self::Status => a.fields.status.code().cmp(b.fields.status.code()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_name" => Ok(Self::FullName),
            "email" => Ok(Self::Email),
            "city" => Ok(Self::City),
            "budget_min" => Ok(Self::BudgetMin),
            "budget_max" => Ok(Self::BudgetMax),
            "status" => Ok(Self::Status),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            other => Err(CoreError::Validation(format!(
                "Cannot order by '{other}'"
            ))),
        }
    }
}

/// Sort column plus direction. Parsed from `field` or `-field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadOrdering {
    pub field: SortField,
    pub descending: bool,
}

impl Default for LeadOrdering {
    /// Most recently updated first.
    fn default() -> Self {
        Self {
            field: SortField::UpdatedAt,
            descending: true,
        }
    }
}

impl FromStr for LeadOrdering {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        Ok(Self {
            field: name.parse()?,
            descending,
        })
    }
}

impl LeadOrdering {
    pub fn compare(&self, a: &Lead, b: &Lead) -> Ordering {
        // Ties broken by id so pages are stable.
        let ord = self.field.compare(a, b).then_with(|| a.id.cmp(&b.id));
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }

    /// `ORDER BY` body for SQL stores. Only whitelisted column names appear.
    pub fn sql(&self) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };
        format!("{} {dir}, id {dir}", self.field.as_str())
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A lead list request after parameter parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
    /// Case-insensitive substring over name, email and phone.
    pub search: Option<String>,
    pub city: Option<City>,
    pub property_type: Option<PropertyType>,
    pub status: Option<Status>,
    pub timeline: Option<Timeline>,
    pub ordering: LeadOrdering,
    /// `None` returns every match (used by export).
    pub limit: Option<i64>,
    pub offset: i64,
}

impl LeadQuery {
    /// Trimmed search text, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether `lead` passes the search text and every filter.
    pub fn matches(&self, lead: &Lead) -> bool {
        let f = &lead.fields;
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let hit = [&f.full_name, &f.email, &f.phone]
                .iter()
                .any(|v| v.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        self.city.map_or(true, |c| c == f.city)
            && self.property_type.map_or(true, |p| p == f.property_type)
            && self.status.map_or(true, |s| s == f.status)
            && self.timeline.map_or(true, |t| t == f.timeline)
    }
}

/// One page of leads plus the total number of matches.
#[derive(Debug, Clone, Serialize)]
pub struct LeadPage {
    pub items: Vec<Lead>,
    pub total: i64,
}
