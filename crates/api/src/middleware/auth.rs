//! JWT-based identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use leadbook_core::error::CoreError;
use leadbook_core::identity::Identity;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Who is making the request.
///
/// No `Authorization` header means [`Identity::anonymous`]. A header that is
/// present must carry a valid Bearer token, otherwise the request is
/// rejected with 401.
///
/// ```ignore
/// async fn my_handler(Actor(actor): Actor) -> AppResult<Json<()>> {
///     tracing::info!(actor = %actor, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Actor(pub Identity);

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get("authorization") else {
            return Ok(Actor(Identity::anonymous()));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(Actor(Identity::new(claims.sub)))
    }
}
