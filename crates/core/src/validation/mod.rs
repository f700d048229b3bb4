//! Lead validation.
//!
//! [`rules`] holds the single-field and budget checks; [`record`] runs them
//! over a whole candidate and decides between a clean record and the full
//! error list. Pure logic, no I/O.

pub mod record;
pub mod rules;

pub use record::{validate_lead, ValidatedLead};
pub use rules::{check_budget_range, BudgetBand};
