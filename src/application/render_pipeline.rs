//! RenderPipeline - resolves, fetches and compiles one article per request.
//!
//! ```text
//! START -> RESOLVED | REJECTED
//! RESOLVED -> FOUND | ABSENT | FETCH_ERROR
//! FOUND -> RENDERED | COMPILE_DEGRADED
//! REJECTED | ABSENT -> NOT_FOUND_VIEW
//! FETCH_ERROR -> ERROR_VIEW
//! ```
//!
//! Every render goes to the store. There is no cache in front of it; the
//! freshness policy is only handed on to the embedding layer.

use serde::Serialize;
use tracing::{debug, error, warn};

use super::content_fetcher::{ContentFetcher, FetchError, FetchOutcome};
use super::freshness::FreshnessPolicy;
use crate::domain::article::{ArticleListing, ContentRecord, PublishedAt, Slug, SlugResolver};
use crate::domain::document::{Degradation, DocumentCompiler, RenderedDocument};

/// Message shown for both unknown and malformed slugs.
pub const NOT_FOUND_MESSAGE: &str = "Post not found";

/// Message shown when the store could not be consulted.
pub const UNAVAILABLE_MESSAGE: &str = "Content is temporarily unavailable";

/// A successfully compiled article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArticle {
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub date: PublishedAt,
    pub document: RenderedDocument,
    /// Spans that fell back to literal text or stayed unhighlighted.
    pub degradations: Vec<Degradation>,
}

impl RenderedArticle {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Shown for absent articles and rejected slugs alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundView {
    pub message: &'static str,
}

impl Default for NotFoundView {
    fn default() -> Self {
        Self {
            message: NOT_FOUND_MESSAGE,
        }
    }
}

/// Shown when it could not be determined whether content exists.
///
/// The cause is kept for logging and status mapping; only `message` is meant
/// for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: &'static str,
    pub cause: FetchError,
}

impl From<FetchError> for ErrorView {
    fn from(cause: FetchError) -> Self {
        Self {
            message: UNAVAILABLE_MESSAGE,
            cause,
        }
    }
}

/// Outcome of rendering one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(RenderedArticle),
    NotFound(NotFoundView),
    Error(ErrorView),
}

impl RenderOutcome {
    /// The `outcome` tag used in logs.
    pub fn tag(&self) -> &'static str {
        match self {
            RenderOutcome::Rendered(article) if article.is_degraded() => "degraded",
            RenderOutcome::Rendered(_) => "rendered",
            RenderOutcome::NotFound(_) => "not_found",
            RenderOutcome::Error(_) => "error",
        }
    }
}

/// Outcome of rendering the article index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    Listed(Vec<ArticleListing>),
    Error(ErrorView),
}

/// Composes slug resolution, fetching and compilation.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    fetcher: ContentFetcher,
    compiler: DocumentCompiler,
    freshness: FreshnessPolicy,
}

impl RenderPipeline {
    pub fn new(fetcher: ContentFetcher, compiler: DocumentCompiler) -> Self {
        Self {
            fetcher,
            compiler,
            freshness: FreshnessPolicy::default(),
        }
    }

    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }

    /// Freshness contract for everything this pipeline renders.
    pub fn freshness(&self) -> FreshnessPolicy {
        self.freshness
    }

    /// Renders the article addressed by a raw, percent-decoded path segment.
    pub async fn render_article(&self, raw_segment: &str) -> RenderOutcome {
        let slug = match SlugResolver::resolve(raw_segment) {
            Ok(slug) => slug,
            Err(reason) => {
                debug!(outcome = "not_found", stage = "resolve", %reason, "Rejected slug");
                return RenderOutcome::NotFound(NotFoundView::default());
            }
        };

        let record = match self.fetcher.fetch_by_slug(&slug).await {
            Ok(FetchOutcome::Found(record)) => record,
            Ok(FetchOutcome::NotFound) => {
                debug!(outcome = "not_found", stage = "fetch", slug = %slug, "No such article");
                return RenderOutcome::NotFound(NotFoundView::default());
            }
            Err(e) => {
                error!(
                    outcome = "error",
                    stage = "fetch",
                    slug = %slug,
                    store = self.fetcher.store_name(),
                    error = %e,
                    "Failed to fetch article"
                );
                return RenderOutcome::Error(e.into());
            }
        };

        let article = self.compile(record);
        if article.is_degraded() {
            warn!(
                outcome = "degraded",
                slug = %article.slug,
                degradations = article.degradations.len(),
                "Rendered article with degraded spans"
            );
        } else {
            debug!(outcome = "rendered", slug = %article.slug, nodes = article.document.len(), "Rendered article");
        }
        RenderOutcome::Rendered(article)
    }

    /// Renders the index of all articles, newest first.
    pub async fn render_index(&self) -> IndexOutcome {
        match self.fetcher.fetch_listing().await {
            Ok(listings) => {
                debug!(outcome = "rendered", count = listings.len(), "Rendered index");
                IndexOutcome::Listed(listings)
            }
            Err(e) => {
                error!(
                    outcome = "error",
                    stage = "fetch",
                    store = self.fetcher.store_name(),
                    error = %e,
                    "Failed to fetch listing"
                );
                IndexOutcome::Error(e.into())
            }
        }
    }

    fn compile(&self, record: ContentRecord) -> RenderedArticle {
        let compilation = self.compiler.compile(record.body.as_deref());
        RenderedArticle {
            slug: record.slug,
            title: record.title,
            description: record.description,
            date: record.date,
            document: compilation.document,
            degradations: compilation.degradations,
        }
    }
}
