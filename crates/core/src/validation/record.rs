//! Whole-record validation.

use std::str::FromStr;

use crate::choices::{Bhk, City, PropertyType, Purpose, Source, Status, Timeline};
use crate::fields;
use crate::lead::{LeadFields, RawFields};

use super::rules::{
    check_budget_range, is_valid_email, is_valid_phone, parse_budget, parse_tags,
    MAX_EMAIL_CHARS, MAX_FULL_NAME_CHARS, MAX_PHONE_CHARS, MAX_TAG_CHARS,
};

/// A candidate that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLead {
    pub fields: LeadFields,
    /// Non-blocking notices (currently only the budget band advisory).
    pub advisories: Vec<String>,
}

/// Validate one candidate record.
///
/// Missing required fields are reported on their own; nothing else is
/// checked until every required field is present. Past that gate every
/// failing rule contributes a message, and the caller gets either the whole
/// clean record or the whole list.
pub fn validate_lead(raw: &RawFields) -> Result<ValidatedLead, Vec<String>> {
    let missing: Vec<String> = fields::REQUIRED
        .iter()
        .filter(|name| present(raw, name).is_none())
        .map(|name| format!("{name} is required"))
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    // Every required field is present from here on.
    let required = |name: &str| present(raw, name).unwrap_or_default();
    let mut errors = Vec::new();

    let full_name = required(fields::FULL_NAME);
    let email = required(fields::EMAIL);
    let phone = required(fields::PHONE);

    check_length(&mut errors, fields::FULL_NAME, full_name, MAX_FULL_NAME_CHARS);
    check_length(&mut errors, fields::EMAIL, email, MAX_EMAIL_CHARS);
    check_length(&mut errors, fields::PHONE, phone, MAX_PHONE_CHARS);

    if !is_valid_email(email) {
        errors.push("Invalid email format".to_string());
    }
    if !is_valid_phone(phone) {
        errors.push("Invalid phone number format".to_string());
    }

    let city = choice::<City>(&mut errors, required(fields::CITY));
    let property_type = choice::<PropertyType>(&mut errors, required(fields::PROPERTY_TYPE));
    let purpose = choice::<Purpose>(&mut errors, required(fields::PURPOSE));
    let timeline = choice::<Timeline>(&mut errors, required(fields::TIMELINE));
    let source = choice::<Source>(&mut errors, required(fields::SOURCE));

    let budget = parse_budget(required(fields::BUDGET_MIN))
        .and_then(|min| parse_budget(required(fields::BUDGET_MAX)).map(|max| (min, max)))
        .and_then(|(min, max)| check_budget_range(min, max).map(|band| (min, max, band)));
    let budget = match budget {
        Ok(parsed) => Some(parsed),
        Err(reason) => {
            errors.push(format!("Invalid budget: {reason}"));
            None
        }
    };

    let bhk = present(raw, fields::BHK).and_then(|code| choice::<Bhk>(&mut errors, code));
    // An unknown code counts as missing for the apartment/villa rule.
    if bhk.is_none() && property_type.is_some_and(|p| p.requires_bhk()) {
        errors.push("BHK is required for apartments and villas".to_string());
    }

    // Unknown status codes are corrected to `new`, never reported.
    let status = Status::from_code_or_default(present(raw, fields::STATUS));

    let notes = present(raw, fields::NOTES).map(str::to_string);

    let tags = present(raw, fields::TAGS).map(parse_tags).unwrap_or_default();
    for tag in &tags {
        if tag.chars().count() > MAX_TAG_CHARS {
            errors.push(format!("Tag exceeds {MAX_TAG_CHARS} characters: {tag}"));
        }
    }

    match (city, property_type, purpose, timeline, source, budget) {
        (
            Some(city),
            Some(property_type),
            Some(purpose),
            Some(timeline),
            Some(source),
            Some((budget_min, budget_max, band)),
        ) if errors.is_empty() => {
            let advisories: Vec<String> = band.advisory().into_iter().collect();
            for advisory in &advisories {
                tracing::warn!(budget_min, budget_max, "{advisory}");
            }
            Ok(ValidatedLead {
                fields: LeadFields {
                    full_name: full_name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    city,
                    property_type,
                    bhk,
                    purpose,
                    budget_min,
                    budget_max,
                    timeline,
                    source,
                    status,
                    notes,
                    tags,
                },
                advisories,
            })
        }
        _ => Err(errors),
    }
}

/// The trimmed value of `name`, or `None` when absent or blank.
fn present<'a>(raw: &'a RawFields, name: &str) -> Option<&'a str> {
    raw.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn choice<T: FromStr>(errors: &mut Vec<String>, code: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match code.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err.to_string());
            None
        }
    }
}

fn check_length(errors: &mut Vec<String>, name: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(format!("{name} must be at most {max} characters"));
    }
}
