//! HTTP adapters - REST API implementations.
//!
//! - `GET /articles` - index, newest first
//! - `GET /articles/:slug` - one article (`?format=html` for a fragment)
//! - `GET /health` - liveness

pub mod articles;

pub use articles::{article_routes, ArticlesAppState};

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the application router without middleware.
pub fn app_router(state: ArticlesAppState) -> Router {
    Router::new()
        .nest("/articles", article_routes(state))
        .route("/health", get(articles::health))
}

/// Builds the application router with tracing, CORS and timeout layers.
pub fn build_router(state: ArticlesAppState, server: &ServerConfig) -> Router {
    app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods([Method::GET, Method::HEAD]);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
