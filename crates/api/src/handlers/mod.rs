//! Request handlers.
//!
//! Handlers parse the request, delegate to `leadbook_core::service` or
//! `leadbook_core::import` over the configured store, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod choices;
pub mod csv;
pub mod leads;
