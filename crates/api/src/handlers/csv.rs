//! Handlers for CSV import, export and the import template.

use axum::extract::{Multipart, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use leadbook_core::csv_codec::{self, EXPORT_FILENAME, TEMPLATE_FILENAME};
use leadbook_core::import;
use leadbook_core::service;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::query::LeadListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Wrap a CSV body as a file download.
fn csv_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

/// POST /api/v1/import
///
/// Accepts a multipart form with a required `file` field holding a `.csv`
/// upload no larger than `MAX_IMPORT_BYTES`. Always answers with the
/// per-row summary unless the batch as a whole is rejected.
pub async fn import_leads(
    Actor(actor): Actor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let max_bytes = state.config.max_import_bytes;
    let mut upload: Option<Vec<u8>> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(AppError::BadRequest("File must be a CSV file".into()));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if data.len() + chunk.len() > max_bytes {
                return Err(AppError::BadRequest("File size too large".into()));
            }
            data.extend_from_slice(&chunk);
        }
        upload = Some(data);
    }

    let data =
        upload.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    tracing::info!(bytes = data.len(), actor = %actor, "CSV import received");
    let summary = import::import_csv(&data, &actor, state.store.as_ref()).await?;

    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/export
///
/// Every lead matching the list filters, ignoring pagination.
pub async fn export_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query()?;
    let body = service::export_leads(state.store.as_ref(), &query).await?;

    Ok(csv_attachment(EXPORT_FILENAME, body))
}

/// GET /api/v1/template
pub async fn import_template() -> AppResult<impl IntoResponse> {
    let body = csv_codec::template().map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(csv_attachment(TEMPLATE_FILENAME, body))
}
