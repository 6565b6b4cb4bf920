use crate::handlers::{
    auth::{login, logout, register},
    books::{add_book, delete_book, edit_book},
    dashboard::dashboard,
    health::health_check,
    pages::{home, login_page, register_page},
};
use crate::schemas::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tower_sessions::{service::SignedCookie, MemoryStore, SessionManagerLayer};

/// Create application router with all routes and middleware
pub fn create_router(
    state: AppState,
    session_layer: SessionManagerLayer<MemoryStore, SignedCookie>,
) -> Router {
    Router::new()
        // Pages
        .route("/", get(home))
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", get(logout))
        // Dashboard (authenticated)
        .route("/main", get(dashboard))
        // Book mutations (authenticated)
        .route("/books/add", post(add_book))
        .route("/books/edit", post(edit_book))
        .route("/books/delete", post(delete_book))
        // Health check
        .route("/health", get(health_check))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(session_layer),
        )
        .with_state(state)
}
