//! Row types for the lead tables and their conversion into domain types.

pub mod history;
pub mod lead;
