use axum::extract::State;
use axum::Extension;

use crate::middleware::{ApiListResponse, ApiListResult, AuthUser};
use crate::models::Ticket;
use crate::policy;
use crate::AppState;

/// GET /api/v1/tickets - list tickets visible to the caller
///
/// Admins see everything, support sees assigned-or-open, requesters see
/// their own. Ordered newest first.
pub async fn ticket_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiListResult<Ticket> {
    let principal = user.principal();
    let scope = policy::list_scope(&principal);

    let tickets = state.store.find(&scope).await?;

    Ok(ApiListResponse::new(tickets))
}
