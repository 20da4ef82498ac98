use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::Ticket;
use crate::policy;
use crate::AppState;

/// GET /api/v1/tickets/:id - fetch a single ticket, policy-gated
pub async fn ticket_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Ticket> {
    let principal = user.principal();

    let ticket = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No ticket found with the id of {}", id)))?;

    if !policy::can_view(&ticket, &principal) {
        tracing::debug!(principal = %principal.id, ticket = %id, "view denied");
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to access this ticket",
            principal.id
        )));
    }

    Ok(ApiResponse::success(ticket))
}
