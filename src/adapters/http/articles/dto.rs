//! DTOs for article endpoints.

use serde::{Deserialize, Serialize};

use crate::application::RenderedArticle;
use crate::domain::article::ArticleListing;
use crate::domain::document::{CompilePass, Degradation, RenderedDocument};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Output format for article endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Render tree as JSON
    #[default]
    Json,
    /// Pre-rendered HTML fragment
    Html,
}

/// Query parameters for article endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: ResponseFormat,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a single article.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub document: RenderedDocument,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<DegradationResponse>,
}

impl From<RenderedArticle> for ArticleResponse {
    fn from(article: RenderedArticle) -> Self {
        Self {
            degraded: article.is_degraded(),
            slug: article.slug.into_inner(),
            title: article.title,
            description: article.description,
            date: article.date.to_string(),
            document: article.document,
            degradations: article.degradations.into_iter().map(Into::into).collect(),
        }
    }
}

/// A span that fell back to literal rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DegradationResponse {
    pub pass: CompilePass,
    pub excerpt: String,
}

impl From<Degradation> for DegradationResponse {
    fn from(d: Degradation) -> Self {
        Self {
            pass: d.pass,
            excerpt: d.excerpt,
        }
    }
}

/// Listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummaryResponse {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: String,
}

impl From<ArticleListing> for ArticleSummaryResponse {
    fn from(listing: ArticleListing) -> Self {
        Self {
            slug: listing.slug.into_inner(),
            title: listing.title,
            description: listing.description,
            date: listing.date.to_string(),
        }
    }
}

/// Response for the article index.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleSummaryResponse>,
    pub total: usize,
}

impl From<Vec<ArticleListing>> for ArticleListResponse {
    fn from(listings: Vec<ArticleListing>) -> Self {
        let articles: Vec<ArticleSummaryResponse> =
            listings.into_iter().map(Into::into).collect();
        Self {
            total: articles.len(),
            articles,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::PublishedAt;

    fn listing(slug: &str) -> ArticleListing {
        ArticleListing {
            slug: slug.parse().unwrap(),
            title: "T".to_string(),
            description: String::new(),
            date: PublishedAt::parse("2023-01-02").unwrap(),
        }
    }

    #[test]
    fn format_defaults_to_json() {
        assert_eq!(FormatQuery::default().format, ResponseFormat::Json);
        let q: FormatQuery = serde_json::from_str(r#"{"format": "html"}"#).unwrap();
        assert_eq!(q.format, ResponseFormat::Html);
    }

    #[test]
    fn list_response_counts_articles() {
        let response = ArticleListResponse::from(vec![listing("a"), listing("b")]);
        assert_eq!(response.total, 2);
        assert_eq!(response.articles[0].slug, "a");
        assert_eq!(response.articles[0].date, "2023-01-02T00:00:00+00:00");
    }

    #[test]
    fn error_response_codes() {
        let error = ErrorResponse::not_found("Post not found");
        assert_eq!(error.code, "NOT_FOUND");
        let json = serde_json::to_value(&error).unwrap();
        assert!(json.get("details").is_none());

        assert_eq!(ErrorResponse::internal("x").code, "INTERNAL_ERROR");
    }
}
