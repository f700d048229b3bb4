//! Domain logic for the buyer-lead backend.
//!
//! Everything here is free of HTTP and SQL: choice enums, the lead record,
//! the validator, the diff engine, the CSV import pipeline and the
//! [`store::LeadStore`] seam that persistence backends implement.

pub mod choices;
pub mod csv_codec;
pub mod diff;
pub mod error;
pub mod fields;
pub mod history;
pub mod identity;
pub mod import;
pub mod lead;
pub mod listing;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;
