//! Slug value object and resolver.
//!
//! A slug is the URL-safe identifier of an article: lowercase ASCII letters,
//! digits and single hyphens between alphanumeric runs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum accepted slug length in bytes.
pub const MAX_SLUG_LEN: usize = 128;

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// Why a path segment was rejected.
///
/// Only used for internal diagnostics; the HTTP boundary renders every
/// variant exactly like an absent article.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSlug {
    #[error("slug is empty")]
    Empty,

    #[error("slug exceeds {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("slug has invalid format")]
    Malformed,
}

/// Validated article identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the slug, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Slug {
    type Err = InvalidSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlugResolver::resolve(s)
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SlugResolver::resolve(&raw).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turns a raw request path segment into a [`Slug`].
///
/// The segment is expected to be percent-decoded already. No case folding or
/// trimming happens here: a segment that would need it is malformed.
pub struct SlugResolver;

impl SlugResolver {
    /// Validates a single path segment.
    pub fn resolve(raw: &str) -> Result<Slug, InvalidSlug> {
        if raw.is_empty() {
            return Err(InvalidSlug::Empty);
        }
        if raw.len() > MAX_SLUG_LEN {
            return Err(InvalidSlug::TooLong {
                max: MAX_SLUG_LEN,
                actual: raw.len(),
            });
        }
        if !SLUG_PATTERN.is_match(raw) {
            return Err(InvalidSlug::Malformed);
        }
        Ok(Slug(raw.to_string()))
    }
}
