//! HTTP routes for article endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_article, list_articles, ArticlesAppState};

/// Creates the article router. Mount under `/articles`.
pub fn article_routes(state: ArticlesAppState) -> Router {
    Router::new()
        .route("/", get(list_articles))
        .route("/:slug", get(get_article))
        .with_state(state)
}
