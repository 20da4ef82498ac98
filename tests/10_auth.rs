mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use helpdesk_api_rust::auth::{generate_jwt, Claims};
use helpdesk_api_rust::models::Role;

#[tokio::test]
async fn root_endpoint_is_public() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app.router, "GET", "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    Ok(())
}

#[tokio::test]
async fn health_endpoint_is_public() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app.router, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn ticket_routes_require_a_token() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::send(&app.router, "GET", "/api/v1/tickets", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "UNAUTHORIZED");

    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let app = common::test_app();

    let (status, _) = common::send(
        &app.router,
        "GET",
        "/api/v1/tickets",
        Some("not-a-jwt"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn unknown_role_claim_is_rejected_not_defaulted() -> Result<()> {
    let app = common::test_app();

    // Valid signature, bogus role. Must fail identity resolution rather
    // than quietly landing in the requester scope.
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4(),
        role: "superuser".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = generate_jwt(claims)?;

    let (status, body) =
        common::send(&app.router, "GET", "/api/v1/tickets", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    Ok(())
}

#[tokio::test]
async fn valid_token_passes_the_middleware() -> Result<()> {
    let app = common::test_app();
    let token = common::token_for(Uuid::new_v4(), Role::Requester);

    let (status, body) =
        common::send(&app.router, "GET", "/api/v1/tickets", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);

    Ok(())
}
