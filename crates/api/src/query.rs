//! Query parameter types for API handlers.
//!
//! Raw strings are parsed into core types here so handlers only ever see a
//! [`LeadQuery`].

use std::str::FromStr;

use leadbook_core::choices::UnknownChoice;
use leadbook_core::listing::{
    clamp_limit, LeadOrdering, LeadQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// Filters, ordering and pagination for `GET /buyers` and `GET /export`.
///
/// Blank values mean "no filter". `propertyType` is accepted as an alias.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LeadListParams {
    #[validate(length(max = 100))]
    pub search: Option<String>,
    pub city: Option<String>,
    #[serde(alias = "propertyType")]
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub timeline: Option<String>,
    #[validate(length(max = 32))]
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

impl LeadListParams {
    /// Validate and convert into a [`LeadQuery`]. Bad values map to 400.
    pub fn into_query(self) -> Result<LeadQuery, AppError> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let ordering = match non_blank(self.ordering) {
            Some(raw) => raw.parse::<LeadOrdering>()?,
            None => LeadOrdering::default(),
        };

        Ok(LeadQuery {
            search: non_blank(self.search),
            city: choice(self.city)?,
            property_type: choice(self.property_type)?,
            status: choice(self.status)?,
            timeline: choice(self.timeline)?,
            ordering,
            limit: Some(clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Query parameters for `GET /buyers/{id}/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn choice<T>(value: Option<String>) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = UnknownChoice>,
{
    non_blank(value)
        .map(|code| code.parse::<T>())
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
