//! HTTP handlers for article endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::adapters::html::HtmlFragmentRenderer;
use crate::application::{
    ErrorView, FreshnessPolicy, IndexOutcome, RenderOutcome, RenderPipeline, NOT_FOUND_MESSAGE,
    UNAVAILABLE_MESSAGE,
};

use super::dto::{
    ArticleListResponse, ArticleResponse, ErrorResponse, FormatQuery, HealthResponse,
    ResponseFormat,
};

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// API error type for article endpoints.
///
/// Neither variant carries detail: a rejected slug and an absent article
/// look the same, and store failures are only described in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticlesApiError {
    NotFound,
    Unavailable,
}

impl IntoResponse for ArticlesApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ArticlesApiError::NotFound => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(NOT_FOUND_MESSAGE))
            }
            ArticlesApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::internal(UNAVAILABLE_MESSAGE),
            ),
        };
        (
            status,
            [(header::CACHE_CONTROL, "no-store")],
            Json(error),
        )
            .into_response()
    }
}

impl From<ErrorView> for ArticlesApiError {
    fn from(_: ErrorView) -> Self {
        ArticlesApiError::Unavailable
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for article endpoints.
#[derive(Clone)]
pub struct ArticlesAppState {
    pub pipeline: Arc<RenderPipeline>,
    pub html: HtmlFragmentRenderer,
}

impl ArticlesAppState {
    pub fn new(pipeline: Arc<RenderPipeline>) -> Self {
        Self {
            pipeline,
            html: HtmlFragmentRenderer::new(),
        }
    }

    fn cache_control(&self) -> [(header::HeaderName, String); 1] {
        cache_control(self.pipeline.freshness())
    }
}

fn cache_control(policy: FreshnessPolicy) -> [(header::HeaderName, String); 1] {
    [(header::CACHE_CONTROL, policy.cache_control())]
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /articles/:slug - Render one article
pub async fn get_article(
    State(state): State<ArticlesAppState>,
    path: Result<Path<String>, PathRejection>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ArticlesApiError> {
    // A segment that does not even decode is just another unknown slug.
    let Path(slug) = path.map_err(|rejection| {
        tracing::debug!(outcome = "not_found", stage = "resolve", %rejection, "Undecodable slug");
        ArticlesApiError::NotFound
    })?;

    let article = match state.pipeline.render_article(&slug).await {
        RenderOutcome::Rendered(article) => article,
        RenderOutcome::NotFound(_) => return Err(ArticlesApiError::NotFound),
        RenderOutcome::Error(view) => return Err(view.into()),
    };

    let headers = state.cache_control();
    let response = match query.format {
        ResponseFormat::Json => {
            (StatusCode::OK, headers, Json(ArticleResponse::from(article))).into_response()
        }
        ResponseFormat::Html => {
            (StatusCode::OK, headers, Html(state.html.render_article(&article))).into_response()
        }
    };
    Ok(response)
}

/// GET /articles - List all articles, newest first
pub async fn list_articles(
    State(state): State<ArticlesAppState>,
    Query(query): Query<FormatQuery>,
) -> Result<Response, ArticlesApiError> {
    let listings = match state.pipeline.render_index().await {
        IndexOutcome::Listed(listings) => listings,
        IndexOutcome::Error(view) => return Err(view.into()),
    };

    let headers = state.cache_control();
    let response = match query.format {
        ResponseFormat::Json => {
            (StatusCode::OK, headers, Json(ArticleListResponse::from(listings))).into_response()
        }
        ResponseFormat::Html => {
            (StatusCode::OK, headers, Html(state.html.render_index(&listings))).into_response()
        }
    };
    Ok(response)
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
