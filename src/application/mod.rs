//! Application layer - fetching and rendering articles.
//!
//! Orchestrates the domain (slugs, records, document compilation) against the
//! content store port. Each render is independent and stateless.

mod content_fetcher;
mod freshness;
mod render_pipeline;

pub use content_fetcher::{
    record_from_row, ContentFetcher, FetchError, FetchOutcome, DEFAULT_ARTICLES_TABLE,
};
pub use freshness::{FreshnessPolicy, InvalidFreshness};
pub use render_pipeline::{
    ErrorView, IndexOutcome, NotFoundView, RenderOutcome, RenderPipeline, RenderedArticle,
    NOT_FOUND_MESSAGE, UNAVAILABLE_MESSAGE,
};
