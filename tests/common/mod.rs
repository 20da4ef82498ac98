#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use helpdesk_api_rust::auth::{generate_jwt, Claims};
use helpdesk_api_rust::models::{Role, Ticket, TicketStatus};
use helpdesk_api_rust::store::MemoryStore;
use helpdesk_api_rust::{app, AppState};

/// Router wired to an in-memory store the test can reach into directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let router = app(AppState::new(store.clone()));
    TestApp { router, store }
}

pub fn token_for(user_id: Uuid, role: Role) -> String {
    generate_jwt(Claims::new(user_id, role)).expect("failed to mint test token")
}

/// Seed a ticket directly into the store, bypassing the HTTP surface.
pub fn seed_ticket(
    store: &MemoryStore,
    created_by: Uuid,
    assigned_to: Option<Uuid>,
    status: TicketStatus,
) -> Ticket {
    let now = Utc::now();
    let ticket = Ticket {
        id: Uuid::new_v4(),
        title: "seeded ticket".to_string(),
        description: "seeded for a test scenario".to_string(),
        status,
        created_by,
        assigned_to,
        comments: vec![],
        created_at: now,
        updated_at: now,
    };
    store.insert(ticket.clone());
    ticket
}

/// Fire one request at the router and return status plus parsed JSON body.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Ok((status, value))
}
