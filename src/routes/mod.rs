use axum::{Router, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

pub mod admin;
pub mod auth;
pub mod content;
pub mod doc;
pub mod health;
pub mod leads;
pub mod orders;
pub mod params;
pub mod products;
pub mod reviews;
pub mod site;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/reviews", reviews::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(content::router())
        .merge(leads::router())
        .merge(site::router())
}

/// Full application: health check, API, docs and the JSON 404 fallback.
/// Transport layers (tracing, request ids, limits) are added by the server binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::NotFound
}
