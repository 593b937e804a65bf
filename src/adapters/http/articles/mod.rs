//! HTTP adapter for article endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ArticleListResponse, ArticleResponse, ArticleSummaryResponse, DegradationResponse,
    ErrorResponse, FormatQuery, HealthResponse, ResponseFormat,
};
pub use handlers::{health, ArticlesApiError, ArticlesAppState};
pub use routes::article_routes;
