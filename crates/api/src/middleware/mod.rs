//! Request extractors.
//!
//! - [`auth::Actor`] -- The identity behind a request (JWT subject or anonymous).

pub mod auth;
