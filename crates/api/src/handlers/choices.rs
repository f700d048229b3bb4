use std::collections::BTreeMap;

use axum::response::IntoResponse;
use axum::Json;
use leadbook_core::choices::all_options;

use crate::response::DataResponse;

/// GET /api/v1/choices
///
/// Every choice list as `{ field: [{ code, label }, ...] }`.
pub async fn list_choices() -> impl IntoResponse {
    let data: BTreeMap<_, _> = all_options().into_iter().collect();

    Json(DataResponse { data })
}
