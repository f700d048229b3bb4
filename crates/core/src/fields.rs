//! Lead field names as they appear in CSV headers, JSON payloads and
//! history diffs.

pub const FULL_NAME: &str = "full_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const CITY: &str = "city";
pub const PROPERTY_TYPE: &str = "property_type";
pub const BHK: &str = "bhk";
pub const PURPOSE: &str = "purpose";
pub const BUDGET_MIN: &str = "budget_min";
pub const BUDGET_MAX: &str = "budget_max";
pub const TIMELINE: &str = "timeline";
pub const SOURCE: &str = "source";
pub const STATUS: &str = "status";
pub const NOTES: &str = "notes";
pub const TAGS: &str = "tags";

/// Fields that must be present and non-blank on every candidate.
pub const REQUIRED: &[&str] = &[
    FULL_NAME,
    EMAIL,
    PHONE,
    CITY,
    PROPERTY_TYPE,
    PURPOSE,
    BUDGET_MIN,
    BUDGET_MAX,
    TIMELINE,
    SOURCE,
];

/// Every writable field, in CSV column order.
pub const WRITABLE: &[&str] = &[
    FULL_NAME,
    EMAIL,
    PHONE,
    CITY,
    PROPERTY_TYPE,
    BHK,
    PURPOSE,
    BUDGET_MIN,
    BUDGET_MAX,
    TIMELINE,
    SOURCE,
    STATUS,
    NOTES,
    TAGS,
];

pub fn is_writable(name: &str) -> bool {
    WRITABLE.contains(&name)
}
