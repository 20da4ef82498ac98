use std::sync::Arc;

use helpdesk_api_rust::store::PgTicketStore;
use helpdesk_api_rust::{app, config, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Helpdesk API in {:?} mode", config.environment);

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set to a Postgres URL");

    let store = PgTicketStore::connect(&database_url)
        .await
        .unwrap_or_else(|e| panic!("failed to connect ticket store: {}", e));

    let app = app(AppState::new(Arc::new(store)));

    // Allow tests or deployments to override port via env
    let port = std::env::var("HELPDESK_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Helpdesk API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
