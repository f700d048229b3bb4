use std::sync::Arc;

use leadbook_core::store::LeadStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Lead and history persistence.
    pub store: Arc<dyn LeadStore>,
    /// Present only when running on PostgreSQL; used by the health check.
    pub pool: Option<leadbook_db::DbPool>,
    pub config: Arc<ServerConfig>,
}
