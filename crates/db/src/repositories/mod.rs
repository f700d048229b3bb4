//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod lead_history_repo;
pub mod lead_repo;

pub use lead_history_repo::LeadHistoryRepo;
pub use lead_repo::LeadRepo;
