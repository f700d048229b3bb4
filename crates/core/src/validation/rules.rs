//! Field-level rules.

use std::sync::LazyLock;

use regex::Regex;

/// Lower edge of the typical budget band (50 thousand rupees).
pub const TYPICAL_BUDGET_MIN: i64 = 50_000;

/// Upper edge of the typical budget band (50 crore rupees).
pub const TYPICAL_BUDGET_MAX: i64 = 500_000_000;

pub const MAX_FULL_NAME_CHARS: usize = 100;
pub const MAX_EMAIL_CHARS: usize = 100;
pub const MAX_PHONE_CHARS: usize = 15;
pub const MAX_TAG_CHARS: usize = 50;

/// Country prefix accepted in front of Indian mobile numbers.
const INDIA_DIAL_PREFIX: &str = "+91";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid regex"));

/// `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Indian mobile number: ten digits starting with 6-9, optionally prefixed
/// with `+91`, hyphens and spaces ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let local = phone.strip_prefix(INDIA_DIAL_PREFIX).unwrap_or(phone);
    let digits: String = local.chars().filter(|c| *c != '-' && *c != ' ').collect();
    MOBILE_RE.is_match(&digits)
}

/// Parse a budget figure. Accepts integers and decimals; decimals are
/// truncated toward zero.
pub fn parse_budget(value: &str) -> Result<i64, String> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n);
    }
    match value.parse::<f64>() {
        // `i64::MAX as f64` is exactly 2^63, one past the largest i64.
        Ok(n) if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 => {
            Ok(n.trunc() as i64)
        }
        Ok(n) if n.is_finite() => Err(format!("'{value}' is out of range")),
        _ => Err(format!("could not parse '{value}' as a number")),
    }
}

/// Where a budget range sits relative to the typical band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBand {
    Typical,
    /// Accepted, but outside the typical band. Advisory only.
    Atypical,
}

impl BudgetBand {
    pub fn advisory(&self) -> Option<String> {
        match self {
            Self::Typical => None,
            Self::Atypical => Some(format!(
                "Budget outside typical range ({TYPICAL_BUDGET_MIN} - {TYPICAL_BUDGET_MAX})"
            )),
        }
    }
}

/// Hard budget rules plus the advisory band classification.
///
/// Negative values and `max < min` fail. Anything else passes; values
/// outside the typical band come back as [`BudgetBand::Atypical`].
pub fn check_budget_range(min: i64, max: i64) -> Result<BudgetBand, String> {
    if min < 0 || max < 0 {
        return Err("Budget values must be positive".to_string());
    }
    if max < min {
        return Err("Budget max must be greater than or equal to budget min".to_string());
    }
    if min < TYPICAL_BUDGET_MIN || max > TYPICAL_BUDGET_MAX {
        return Ok(BudgetBand::Atypical);
    }
    Ok(BudgetBand::Typical)
}

/// Split a comma-separated tag string into trimmed, non-empty, distinct tags
/// in first-seen order.
pub fn parse_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
