use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Comment, NewComment};
use crate::policy;
use crate::AppState;

/// POST /api/v1/tickets/:id/comments - append a comment, policy-gated
///
/// Same predicate as viewing. The new comment is prepended; the response
/// carries the full updated sequence, newest first.
pub async fn comment_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<NewComment>,
) -> ApiResult<Vec<Comment>> {
    let principal = user.principal();
    validate(&body)?;

    let ticket = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No ticket found with the id of {}", id)))?;

    if !policy::can_comment(&ticket, &principal) {
        tracing::debug!(principal = %principal.id, ticket = %id, "comment denied");
        return Err(ApiError::forbidden(format!(
            "User {} is not authorized to comment on this ticket",
            principal.id
        )));
    }

    let comment = Comment { author: principal.id, text: body.text, created_at: Utc::now() };
    let comments = state.store.append_comment(id, comment).await?;

    Ok(ApiResponse::success(comments))
}

fn validate(body: &NewComment) -> Result<(), ApiError> {
    if body.text.trim().is_empty() {
        let mut field_errors = HashMap::new();
        field_errors.insert("text".to_string(), "This field is required".to_string());
        return Err(ApiError::validation_error("Missing required fields", Some(field_errors)));
    }
    Ok(())
}
