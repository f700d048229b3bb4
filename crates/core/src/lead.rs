//! The lead record and its partial-update shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::choices::{Bhk, City, PropertyType, Purpose, Source, Status, Timeline};
use crate::fields;
use crate::types::{DbId, Timestamp};

/// Untyped candidate fields keyed by field name: a CSV row or a flattened
/// JSON payload. Values are kept exactly as received.
pub type RawFields = BTreeMap<String, String>;

/// Validated, writable lead fields. Produced only by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: City,
    pub property_type: PropertyType,
    pub bhk: Option<Bhk>,
    pub purpose: Purpose,
    pub budget_min: i64,
    pub budget_max: i64,
    pub timeline: Timeline,
    pub source: Source,
    pub status: Status,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

/// A persisted lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: LeadFields,
    pub owner_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Incoming changes to an existing lead. `None` means "not supplied".
///
/// Nullable fields use a nested option so "clear the value" is distinct
/// from "leave it alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<City>,
    pub property_type: Option<PropertyType>,
    pub bhk: Option<Option<Bhk>>,
    pub purpose: Option<Purpose>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Option<Timeline>,
    pub source: Option<Source>,
    pub status: Option<Status>,
    pub notes: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

/// Whether an update replaces the whole record or only the supplied fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

impl LeadPatch {
    /// A patch that supplies every field of `fields`.
    pub fn full(fields: &LeadFields) -> Self {
        Self::select(fields, fields::WRITABLE.iter().copied())
    }

    /// A patch carrying only the named fields, with values taken from
    /// `fields`. Unknown names are ignored.
    pub fn select<'a>(fields: &LeadFields, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut patch = Self::default();
        for name in names {
            match name {
                fields::FULL_NAME => patch.full_name = Some(fields.full_name.clone()),
                fields::EMAIL => patch.email = Some(fields.email.clone()),
                fields::PHONE => patch.phone = Some(fields.phone.clone()),
                fields::CITY => patch.city = Some(fields.city),
                fields::PROPERTY_TYPE => patch.property_type = Some(fields.property_type),
                fields::BHK => patch.bhk = Some(fields.bhk),
                fields::PURPOSE => patch.purpose = Some(fields.purpose),
                fields::BUDGET_MIN => patch.budget_min = Some(fields.budget_min),
                fields::BUDGET_MAX => patch.budget_max = Some(fields.budget_max),
                fields::TIMELINE => patch.timeline = Some(fields.timeline),
                fields::SOURCE => patch.source = Some(fields.source),
                fields::STATUS => patch.status = Some(fields.status),
                fields::NOTES => patch.notes = Some(fields.notes.clone()),
                fields::TAGS => patch.tags = Some(fields.tags.clone()),
                _ => {}
            }
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl LeadFields {
    /// Render back into raw form so stored values can be overlaid with
    /// incoming ones and re-validated as a whole.
    pub fn to_raw_fields(&self) -> RawFields {
        let mut raw = RawFields::new();
        raw.insert(fields::FULL_NAME.into(), self.full_name.clone());
        raw.insert(fields::EMAIL.into(), self.email.clone());
        raw.insert(fields::PHONE.into(), self.phone.clone());
        raw.insert(fields::CITY.into(), self.city.code().into());
        raw.insert(fields::PROPERTY_TYPE.into(), self.property_type.code().into());
        if let Some(bhk) = self.bhk {
            raw.insert(fields::BHK.into(), bhk.code().into());
        }
        raw.insert(fields::PURPOSE.into(), self.purpose.code().into());
        raw.insert(fields::BUDGET_MIN.into(), self.budget_min.to_string());
        raw.insert(fields::BUDGET_MAX.into(), self.budget_max.to_string());
        raw.insert(fields::TIMELINE.into(), self.timeline.code().into());
        raw.insert(fields::SOURCE.into(), self.source.code().into());
        raw.insert(fields::STATUS.into(), self.status.code().into());
        if let Some(notes) = &self.notes {
            raw.insert(fields::NOTES.into(), notes.clone());
        }
        if !self.tags.is_empty() {
            raw.insert(fields::TAGS.into(), self.tags.join(","));
        }
        raw
    }
}

/// Flatten a JSON object into [`RawFields`].
///
/// Scalars become their text form, arrays (tags) are joined with commas and
/// `null` counts as absent. Nested objects are dropped.
///
/// Tags share the comma-separated form of the CSV column, so a comma inside
/// one array element splits it into separate tags.
pub fn raw_fields_from_json(object: &serde_json::Map<String, serde_json::Value>) -> RawFields {
    use serde_json::Value;

    object
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null | Value::Object(_) => return None,
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            };
            Some((key.clone(), text))
        })
        .collect()
}

/// Overlay `incoming` on top of `base`. Incoming blanks clear optional fields.
pub fn overlay(base: RawFields, incoming: &RawFields) -> RawFields {
    let mut merged = base;
    for (key, value) in incoming {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
