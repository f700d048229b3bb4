pub mod csv;
pub mod health;
pub mod leads;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /buyers                       list, create
/// /buyers/{id}                  get, replace, patch, delete
/// /buyers/{id}/history          recent changes
///
/// /import                       CSV import (multipart)
/// /export                       CSV export of the filtered list
/// /template                     sample import CSV
///
/// /choices                      choice lists for every enum field
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/buyers", leads::router())
        .merge(csv::router())
        .route("/choices", get(handlers::choices::list_choices))
}
