use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Ticket, TicketUpdate};
use crate::policy;
use crate::AppState;

/// PUT /api/v1/tickets/:id - update a ticket, policy-gated
///
/// General fields (title, description) require the view-level predicate.
/// Privileged fields (status, assigned_to) additionally require admin or
/// the assigned support principal; that check runs only when the request
/// touches one of them. Denial means nothing is applied.
pub async fn ticket_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(update): Json<TicketUpdate>,
) -> ApiResult<Ticket> {
    let principal = user.principal();
    validate(&update)?;

    let ticket = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No ticket found with the id of {}", id)))?;

    if !policy::can_modify_general_fields(&ticket, &principal) {
        tracing::debug!(principal = %principal.id, ticket = %id, "update denied");
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to update this ticket",
            principal.id
        )));
    }

    if update.touches_privileged_fields() && !policy::can_modify_privileged_fields(&ticket, &principal)
    {
        tracing::debug!(principal = %principal.id, ticket = %id, "privileged update denied");
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to update ticket status or assignee",
            principal.id
        )));
    }

    let updated = state.store.update(id, &update).await?;

    Ok(ApiResponse::success(updated))
}

fn validate(update: &TicketUpdate) -> Result<(), ApiError> {
    if update.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let mut field_errors = HashMap::new();

    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        field_errors.insert("title".to_string(), "This field cannot be empty".to_string());
    }
    if update.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
        field_errors.insert("description".to_string(), "This field cannot be empty".to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid field values", Some(field_errors)))
    }
}
