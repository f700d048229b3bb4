//! CSV routes, merged directly under `/api/v1`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::csv;
use crate::state::AppState;

/// ```text
/// POST   /import          -> import_leads (multipart)
/// GET    /export          -> export_leads
/// GET    /template        -> import_template
/// ```
///
/// The import route lifts axum's default body limit; the handler enforces
/// `max_import_bytes` itself so the caller gets a readable error.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/import",
            post(csv::import_leads).layer(DefaultBodyLimit::disable()),
        )
        .route("/export", get(csv::export_leads))
        .route("/template", get(csv::import_template))
}
