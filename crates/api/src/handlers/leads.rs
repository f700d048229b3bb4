//! Handlers for buyer leads and their change history.
//!
//! Mutations run as the request's [`Actor`]; anonymous callers are allowed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use leadbook_core::lead::{raw_fields_from_json, RawFields, UpdateMode};
use leadbook_core::service;
use leadbook_core::types::DbId;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::query::{HistoryParams, LeadListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Flatten a JSON request body. Anything but an object is rejected.
fn raw_fields(body: &Value) -> AppResult<RawFields> {
    body.as_object()
        .map(raw_fields_from_json)
        .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".into()))
}

// ---------------------------------------------------------------------------
// Lead CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/buyers
///
/// Search, filter, order and paginate leads. Returns `{ items, total }`.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query()?;
    let page = service::list_leads(state.store.as_ref(), &query).await?;

    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/buyers
pub async fn create_lead(
    Actor(actor): Actor,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let raw = raw_fields(&body)?;
    let lead = service::create_lead(state.store.as_ref(), &raw, &actor).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/buyers/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lead = service::get_lead(state.store.as_ref(), id).await?;

    Ok(Json(DataResponse { data: lead }))
}

/// PUT /api/v1/buyers/{id}
///
/// Replace every writable field. The body must be a complete lead.
pub async fn replace_lead(
    Actor(actor): Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let raw = raw_fields(&body)?;
    let lead =
        service::update_lead(state.store.as_ref(), id, &raw, UpdateMode::Full, &actor).await?;

    Ok(Json(DataResponse { data: lead }))
}

/// PATCH /api/v1/buyers/{id}
///
/// Change only the supplied fields. The merged record must still be valid.
pub async fn patch_lead(
    Actor(actor): Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let raw = raw_fields(&body)?;
    let lead =
        service::update_lead(state.store.as_ref(), id, &raw, UpdateMode::Partial, &actor).await?;

    Ok(Json(DataResponse { data: lead }))
}

/// DELETE /api/v1/buyers/{id}
pub async fn delete_lead(
    Actor(actor): Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    service::delete_lead(state.store.as_ref(), id, &actor).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/v1/buyers/{id}/history
///
/// Newest entries first. Unknown or deleted leads yield an empty list.
pub async fn lead_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let entries = service::lead_history(state.store.as_ref(), id, params.limit).await?;

    Ok(Json(DataResponse { data: entries }))
}
