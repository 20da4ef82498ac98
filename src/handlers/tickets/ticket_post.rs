use std::collections::HashMap;

use axum::extract::State;
use axum::{Extension, Json};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{NewTicket, Ticket};
use crate::AppState;

/// POST /api/v1/tickets - create a ticket
///
/// Any authenticated principal may create; `created_by` always comes from
/// the token, never from the request body.
pub async fn ticket_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(fields): Json<NewTicket>,
) -> ApiResult<Ticket> {
    validate(&fields)?;

    let ticket = state.store.create(user.id, fields).await?;

    Ok(ApiResponse::created(ticket))
}

fn validate(fields: &NewTicket) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if fields.title.trim().is_empty() {
        field_errors.insert("title".to_string(), "This field is required".to_string());
    }
    if fields.description.trim().is_empty() {
        field_errors.insert("description".to_string(), "This field is required".to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Missing required fields", Some(field_errors)))
    }
}
