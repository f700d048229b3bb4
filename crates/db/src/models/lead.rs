//! `buyer_leads` row model.

use std::str::FromStr;

use leadbook_core::choices::UnknownChoice;
use leadbook_core::lead::{Lead, LeadFields};
use leadbook_core::store::StoreError;
use leadbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A `buyer_leads` row as stored. Choice columns are raw codes.
#[derive(Debug, Clone, FromRow)]
pub struct LeadRow {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub property_type: String,
    pub bhk: Option<String>,
    pub purpose: String,
    pub budget_min: i64,
    pub budget_max: i64,
    pub timeline: String,
    pub source: String,
    pub status: String,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub owner_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<LeadRow> for Lead {
    type Error = StoreError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let bhk = match row.bhk.as_deref() {
            Some(code) => Some(decode(id, code)?),
            None => None,
        };

        Ok(Lead {
            id,
            fields: LeadFields {
                full_name: row.full_name,
                email: row.email,
                phone: row.phone,
                city: decode(id, &row.city)?,
                property_type: decode(id, &row.property_type)?,
                bhk,
                purpose: decode(id, &row.purpose)?,
                budget_min: row.budget_min,
                budget_max: row.budget_max,
                timeline: decode(id, &row.timeline)?,
                source: decode(id, &row.source)?,
                status: decode(id, &row.status)?,
                notes: row.notes,
                tags: row.tags,
            },
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn decode<T: FromStr<Err = UnknownChoice>>(id: DbId, code: &str) -> Result<T, StoreError> {
    code.parse().map_err(|e: UnknownChoice| StoreError::Corrupt {
        entity: "buyer",
        id,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use leadbook_core::choices::{Bhk, City, Timeline};

    use super::*;

    fn row() -> LeadRow {
        LeadRow {
            id: 9,
            full_name: "Meera Iyer".into(),
            email: "meera@example.com".into(),
            phone: "9123456789".into(),
            city: "bangalore".into(),
            property_type: "villa".into(),
            bhk: Some("4bhk".into()),
            purpose: "buy".into(),
            budget_min: 20_000_000,
            budget_max: 30_000_000,
            timeline: "6months".into(),
            source: "walk_in".into(),
            status: "qualified".into(),
            notes: None,
            tags: vec!["garden".into()],
            owner_id: "u1".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn converts_codes_to_enums() {
        let lead = Lead::try_from(row()).unwrap();
        assert_eq!(lead.fields.city, City::Bangalore);
        assert_eq!(lead.fields.bhk, Some(Bhk::Four));
        assert_eq!(lead.fields.timeline, Timeline::SixMonths);
        assert_eq!(lead.fields.tags, vec!["garden"]);
    }

    #[test]
    fn unknown_code_is_corrupt() {
        let mut bad = row();
        bad.city = "goa".into();
        assert_matches!(
            Lead::try_from(bad),
            Err(StoreError::Corrupt { id: 9, ref reason, .. }) if reason == "Invalid city: goa"
        );
    }
}
