//! Field-level change detection for lead updates.

use std::collections::BTreeMap;

use crate::choices::{Bhk, City, PropertyType, Purpose, Source, Status, Timeline};
use crate::fields;
use crate::lead::{LeadFields, LeadPatch};

/// Field name to `"old → new"`.
pub type FieldDiff = BTreeMap<String, String>;

/// Text form of a field value inside a diff entry.
pub trait DiffValue {
    fn render(&self) -> String;
}

impl DiffValue for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl DiffValue for i64 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl DiffValue for Vec<String> {
    fn render(&self) -> String {
        self.join(", ")
    }
}

impl<T: DiffValue> DiffValue for Option<T> {
    fn render(&self) -> String {
        self.as_ref().map(DiffValue::render).unwrap_or_default()
    }
}

macro_rules! diff_by_code {
    ($($ty:ty),+) => {
        $(impl DiffValue for $ty {
            fn render(&self) -> String {
                self.code().to_string()
            }
        })+
    };
}

diff_by_code!(City, PropertyType, Bhk, Purpose, Timeline, Source, Status);

/// Compare every field supplied in `incoming` against `existing`.
///
/// Fields the patch leaves out never appear. An empty result means nothing
/// changed and no history entry should be written.
pub fn diff_lead(existing: &LeadFields, incoming: &LeadPatch) -> FieldDiff {
    let mut diff = FieldDiff::new();

    record(&mut diff, fields::FULL_NAME, &existing.full_name, incoming.full_name.as_ref());
    record(&mut diff, fields::EMAIL, &existing.email, incoming.email.as_ref());
    record(&mut diff, fields::PHONE, &existing.phone, incoming.phone.as_ref());
    record(&mut diff, fields::CITY, &existing.city, incoming.city.as_ref());
    record(
        &mut diff,
        fields::PROPERTY_TYPE,
        &existing.property_type,
        incoming.property_type.as_ref(),
    );
    record(&mut diff, fields::BHK, &existing.bhk, incoming.bhk.as_ref());
    record(&mut diff, fields::PURPOSE, &existing.purpose, incoming.purpose.as_ref());
    record(&mut diff, fields::BUDGET_MIN, &existing.budget_min, incoming.budget_min.as_ref());
    record(&mut diff, fields::BUDGET_MAX, &existing.budget_max, incoming.budget_max.as_ref());
    record(&mut diff, fields::TIMELINE, &existing.timeline, incoming.timeline.as_ref());
    record(&mut diff, fields::SOURCE, &existing.source, incoming.source.as_ref());
    record(&mut diff, fields::STATUS, &existing.status, incoming.status.as_ref());
    record(&mut diff, fields::NOTES, &existing.notes, incoming.notes.as_ref());
    record(&mut diff, fields::TAGS, &existing.tags, incoming.tags.as_ref());

    diff
}

fn record<T: DiffValue + PartialEq>(diff: &mut FieldDiff, name: &str, old: &T, new: Option<&T>) {
    if let Some(new) = new {
        if new != old {
            diff.insert(name.to_string(), format!("{} → {}", old.render(), new.render()));
        }
    }
}

/// Apply a patch to stored fields, returning the resulting record.
pub fn apply_patch(existing: &LeadFields, patch: &LeadPatch) -> LeadFields {
    let mut next = existing.clone();
    if let Some(v) = &patch.full_name {
        next.full_name = v.clone();
    }
    if let Some(v) = &patch.email {
        next.email = v.clone();
    }
    if let Some(v) = &patch.phone {
        next.phone = v.clone();
    }
    if let Some(v) = patch.city {
        next.city = v;
    }
    if let Some(v) = patch.property_type {
        next.property_type = v;
    }
    if let Some(v) = patch.bhk {
        next.bhk = v;
    }
    if let Some(v) = patch.purpose {
        next.purpose = v;
    }
    if let Some(v) = patch.budget_min {
        next.budget_min = v;
    }
    if let Some(v) = patch.budget_max {
        next.budget_max = v;
    }
    if let Some(v) = patch.timeline {
        next.timeline = v;
    }
    if let Some(v) = patch.source {
        next.source = v;
    }
    if let Some(v) = patch.status {
        next.status = v;
    }
    if let Some(v) = &patch.notes {
        next.notes = v.clone();
    }
    if let Some(v) = &patch.tags {
        next.tags = v.clone();
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::test_support::apartment_fields;

    #[test]
    fn same_status_produces_no_entry() {
        let existing = apartment_fields();
        let patch = LeadPatch { status: Some(Status::New), ..Default::default() };
        assert!(diff_lead(&existing, &patch).is_empty());
    }

    #[test]
    fn status_change_is_rendered_by_code() {
        let existing = apartment_fields();
        let patch = LeadPatch { status: Some(Status::Contacted), ..Default::default() };
        let diff = diff_lead(&existing, &patch);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff["status"], "new → contacted");
    }

    #[test]
    fn absent_fields_are_ignored() {
        let existing = apartment_fields();
        assert!(diff_lead(&existing, &LeadPatch::default()).is_empty());
    }

    #[test]
    fn full_patch_of_identical_record_is_empty() {
        let existing = apartment_fields();
        assert!(diff_lead(&existing, &LeadPatch::full(&existing)).is_empty());
    }

    #[test]
    fn optional_values_render_as_empty() {
        let existing = apartment_fields();
        let patch = LeadPatch {
            bhk: Some(None),
            notes: Some(Some("call after 6pm".into())),
            ..Default::default()
        };
        let diff = diff_lead(&existing, &patch);
        assert_eq!(diff["bhk"], "2bhk → ");
        assert_eq!(diff["notes"], " → call after 6pm");
    }

    #[test]
    fn numbers_and_tags() {
        let existing = apartment_fields();
        let patch = LeadPatch {
            budget_max: Some(9_000_000),
            tags: Some(vec!["vip".into(), "nri".into()]),
            ..Default::default()
        };
        let diff = diff_lead(&existing, &patch);
        assert_eq!(diff["budget_max"], "8000000 → 9000000");
        assert_eq!(diff["tags"], " → vip, nri");
    }

    #[test]
    fn apply_patch_touches_only_supplied_fields() {
        let existing = apartment_fields();
        let patch = LeadPatch {
            city: Some(City::Pune),
            notes: Some(Some("x".into())),
            ..Default::default()
        };
        let next = apply_patch(&existing, &patch);
        assert_eq!(next.city, City::Pune);
        assert_eq!(next.notes.as_deref(), Some("x"));
        assert_eq!(next.full_name, existing.full_name);
        assert_eq!(next.bhk, existing.bhk);
    }
}
