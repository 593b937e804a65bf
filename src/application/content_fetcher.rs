//! ContentFetcher - one round trip to the content store per call.
//!
//! Turns raw store rows into typed records. A missing row is a normal
//! outcome (`FetchOutcome::NotFound`); an unreachable store, a timeout or a
//! row missing a required field is a `FetchError`, so callers can tell
//! "does not exist" from "could not find out".

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::article::{sort_listings, ArticleListing, ContentRecord, PublishedAt, Slug};
use crate::ports::{ContentStore, OrderBy, StoreError, StoreRow};

/// Default table holding articles.
pub const DEFAULT_ARTICLES_TABLE: &str = "articles";

const SLUG_COLUMN: &str = "slug";
const DATE_COLUMN: &str = "date";

/// Body column names, in lookup order.
const BODY_COLUMNS: [&str; 2] = ["content", "body"];

/// Result of a keyed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(ContentRecord),
    NotFound,
}

/// Reasons a fetch could not determine whether content exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Content store timed out after {secs} seconds")]
    StoreTimeout { secs: u64 },

    #[error("Malformed record: field '{field}' is missing or invalid")]
    MalformedRecord { field: String },
}

impl FetchError {
    pub fn malformed(field: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field: field.into(),
        }
    }
}

impl From<StoreError> for FetchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(secs) => FetchError::StoreTimeout { secs },
            // A payload that is not a row set, or a rejected query, means the
            // store could not answer the question.
            StoreError::Unavailable(reason)
            | StoreError::Malformed(reason)
            | StoreError::InvalidQuery(reason) => FetchError::StoreUnavailable(reason),
        }
    }
}

/// Reads articles from a content store.
#[derive(Clone)]
pub struct ContentFetcher {
    store: Arc<dyn ContentStore>,
    table: String,
}

impl std::fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("store", &self.store.name())
            .field("table", &self.table)
            .finish()
    }
}

impl ContentFetcher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            table: DEFAULT_ARTICLES_TABLE.to_string(),
        }
    }

    /// Reads from `table` instead of the default.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Name of the underlying store adapter.
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Looks up the article with `slug`.
    pub async fn fetch_by_slug(&self, slug: &Slug) -> Result<FetchOutcome, FetchError> {
        let row = self
            .store
            .get_by_key(&self.table, SLUG_COLUMN, slug.as_str())
            .await?;

        match row {
            Some(row) => Ok(FetchOutcome::Found(record_from_row(&row)?)),
            None => Ok(FetchOutcome::NotFound),
        }
    }

    /// Lists every article, newest first, equal dates by slug.
    pub async fn fetch_listing(&self) -> Result<Vec<ArticleListing>, FetchError> {
        let rows = self
            .store
            .list_ordered(&self.table, &OrderBy::descending(DATE_COLUMN))
            .await?;

        let mut listings = rows
            .iter()
            .map(listing_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        sort_listings(&mut listings);
        Ok(listings)
    }
}

/// Builds a record from a store row.
///
/// `slug`, `title` and `date` are required. `description` defaults to empty
/// and the body may be absent or null.
pub fn record_from_row(row: &StoreRow) -> Result<ContentRecord, FetchError> {
    let meta = listing_from_row(row)?;
    let body = body_from_row(row)?;
    Ok(ContentRecord {
        slug: meta.slug,
        title: meta.title,
        description: meta.description,
        date: meta.date,
        body,
    })
}

fn listing_from_row(row: &StoreRow) -> Result<ArticleListing, FetchError> {
    let slug = required_str(row, SLUG_COLUMN)?
        .parse::<Slug>()
        .map_err(|_| FetchError::malformed(SLUG_COLUMN))?;
    let title = required_str(row, "title")?.to_string();
    let date = PublishedAt::parse(required_str(row, DATE_COLUMN)?)
        .ok_or_else(|| FetchError::malformed(DATE_COLUMN))?;
    let description = match row.get("description") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(FetchError::malformed("description")),
    };

    Ok(ArticleListing {
        slug,
        title,
        description,
        date,
    })
}

fn required_str<'a>(row: &'a StoreRow, field: &str) -> Result<&'a str, FetchError> {
    row.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| FetchError::malformed(field))
}

fn body_from_row(row: &StoreRow) -> Result<Option<String>, FetchError> {
    for column in BODY_COLUMNS {
        match row.get(column) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => return Ok(Some(s.clone())),
            Some(_) => return Err(FetchError::malformed(column)),
        }
    }
    Ok(None)
}
