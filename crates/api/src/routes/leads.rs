use axum::routing::get;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead routes mounted at `/buyers`.
///
/// ```text
/// GET    /                -> list_leads
/// POST   /                -> create_lead
/// GET    /{id}            -> get_lead
/// PUT    /{id}            -> replace_lead
/// PATCH  /{id}            -> patch_lead
/// DELETE /{id}            -> delete_lead
/// GET    /{id}/history    -> lead_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/{id}",
            get(leads::get_lead)
                .put(leads::replace_lead)
                .patch(leads::patch_lead)
                .delete(leads::delete_lead),
        )
        .route("/{id}/history", get(leads::lead_history))
}
