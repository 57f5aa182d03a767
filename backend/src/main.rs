use dotenvy::dotenv;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    middleware,
    Router,
};
use std::sync::Arc;
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;

mod handlers {
    pub mod contact_handlers;
    pub mod contact_dtos;
    pub mod cors_middleware;
}
mod utils {
    pub mod mailer;
}
mod config {
    pub mod mail;
}

use handlers::contact_handlers;
use handlers::cors_middleware;
use utils::mailer::Mailer;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    pub mailer: Mailer,
}

pub fn validate_env() {
    let _ = std::env::var("SMTP_HOST")
        .expect("SMTP_HOST must be set");
    let _ = std::env::var("SMTP_PORT")
        .expect("SMTP_PORT must be set");
    let _ = std::env::var("SMTP_USERNAME")
        .expect("SMTP_USERNAME must be set");
    let _ = std::env::var("SMTP_PASSWORD")
        .expect("SMTP_PASSWORD must be set");
    let _ = std::env::var("SMTP_SECURE") // 'ssl'/'smtps' for implicit TLS, anything else STARTTLS
        .expect("SMTP_SECURE must be set");
    let _ = std::env::var("SMTP_FROM_EMAIL")
        .expect("SMTP_FROM_EMAIL must be set");
    let _ = std::env::var("SMTP_FROM_NAME")
        .expect("SMTP_FROM_NAME must be set");
}

// Create router with CORS
fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contact", post(contact_handlers::send_contact))
        .method_not_allowed_fallback(contact_handlers::method_not_allowed)
        .layer(DefaultBodyLimit::max(contact_handlers::MAX_REQUEST_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(middleware::from_fn(cors_middleware::apply_cors))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    validate_env();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let mailer = Mailer::from_env().expect("Failed to configure SMTP transport");
    let state = Arc::new(AppState { mailer });

    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:3000").await.unwrap();
    axum::serve(listener, app(state).into_make_service())
        .await
        .unwrap();
}
