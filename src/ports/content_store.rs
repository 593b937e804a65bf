//! Content store port - the remote structured store articles live in.
//!
//! The core consumes exactly two operations: a keyed lookup returning zero or
//! one row, and an ordered listing. Transport and protocol belong to the
//! adapters (PostgREST over HTTP, PostgreSQL, in-memory).
//!
//! # Contract
//!
//! Implementations must:
//! - Return `Ok(None)` when no row matches; absence is not an error
//! - Report transport failures as `Unavailable` and deadline overruns as
//!   `Timeout`, so callers can tell "missing" from "could not ask"
//! - Not retry internally unless explicitly configured to

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// A single row as returned by the store: column name to JSON value.
pub type StoreRow = Map<String, Value>;

/// Sort direction for ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// SQL / PostgREST keyword for this direction.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Ordering for a listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.column, self.direction.keyword())
    }
}

/// Port for reading content from the remote store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Looks up the row of `table` whose `column` equals `value` exactly.
    ///
    /// Returns `None` if no row matches. If the store holds more than one
    /// match the first is returned.
    async fn get_by_key(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<StoreRow>, StoreError>;

    /// Lists all rows of `table` in the given order.
    async fn list_ordered(&self, table: &str, order: &OrderBy)
        -> Result<Vec<StoreRow>, StoreError>;

    /// Short adapter name used in logs.
    fn name(&self) -> &'static str;
}

/// Errors a content store adapter can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or answered with a server error.
    #[error("Content store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer within the configured deadline.
    #[error("Content store timed out after {0} seconds")]
    Timeout(u64),

    /// The store answered with a payload that is not a row set.
    #[error("Content store returned malformed data: {0}")]
    Malformed(String),

    /// The query itself was rejected (bad table or column name).
    #[error("Invalid content store query: {0}")]
    InvalidQuery(String),
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }

    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery(reason.into())
    }
}

/// Checks that a table or column name is a plain SQL identifier.
///
/// Adapters interpolate identifiers into queries, so anything beyond
/// `[A-Za-z_][A-Za-z0-9_]*` is refused.
pub fn validate_identifier(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && name.len() <= 63 {
        Ok(())
    } else {
        Err(StoreError::invalid_query(format!(
            "'{}' is not a valid identifier",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_displays_postgrest_form() {
        assert_eq!(OrderBy::descending("date").to_string(), "date.desc");
        assert_eq!(OrderBy::ascending("slug").to_string(), "slug.asc");
    }

    #[test]
    fn identifiers_are_validated() {
        assert!(validate_identifier("articles").is_ok());
        assert!(validate_identifier("_private_2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("articles; drop table x").is_err());
        assert!(validate_identifier("a.b").is_err());
    }

    #[test]
    fn store_error_messages() {
        assert!(StoreError::Timeout(5).to_string().contains("5 seconds"));
        assert!(StoreError::unavailable("refused")
            .to_string()
            .contains("refused"));
    }

    #[test]
    fn content_store_is_object_safe() {
        fn check<T: ContentStore + ?Sized>() {}
        check::<dyn ContentStore>();
    }
}
