pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use store::TicketStore;

/// Shared handler state: the ticket store behind its trait seam.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TicketStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state.clone())
        // Protected ticket API
        .merge(ticket_routes(state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn ticket_routes(state: AppState) -> Router {
    use axum::routing::post;
    use handlers::tickets;

    Router::new()
        .route("/api/v1/tickets", get(tickets::ticket_list).post(tickets::ticket_post))
        .route("/api/v1/tickets/:id", get(tickets::ticket_get).put(tickets::ticket_put))
        .route("/api/v1/tickets/:id/comments", post(tickets::comment_post))
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Helpdesk API (Rust)",
            "version": version,
            "description": "Helpdesk ticketing API with role-based ticket access control",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "tickets": "/api/v1/tickets[/:id] (protected)",
                "comments": "/api/v1/tickets/:id/comments (protected)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health().await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "ticket store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
