//! Freshness policy for rendered output.
//!
//! Nothing is cached between a request and the content store: every render
//! fetches and compiles from scratch. The policy only tells the embedding
//! layer how long downstream caches may keep the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How long a rendered page may be reused downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FreshnessPolicy {
    /// Never reuse; a content edit is visible on the very next request.
    #[default]
    AlwaysFresh,
    /// Downstream caches may serve the page for this many seconds.
    MaxAge(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid freshness policy '{0}' (expected 'always-fresh' or 'max-age=<seconds>')")]
pub struct InvalidFreshness(pub String);

impl FreshnessPolicy {
    /// `Cache-Control` header value for this policy.
    pub fn cache_control(&self) -> String {
        match self {
            FreshnessPolicy::AlwaysFresh => "no-store".to_string(),
            FreshnessPolicy::MaxAge(secs) => format!("public, max-age={}", secs),
        }
    }
}

impl FromStr for FreshnessPolicy {
    type Err = InvalidFreshness;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("always-fresh") {
            return Ok(FreshnessPolicy::AlwaysFresh);
        }
        value
            .strip_prefix("max-age=")
            .and_then(|secs| secs.parse::<u64>().ok())
            .map(FreshnessPolicy::MaxAge)
            .ok_or_else(|| InvalidFreshness(s.to_string()))
    }
}

impl TryFrom<String> for FreshnessPolicy {
    type Error = InvalidFreshness;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FreshnessPolicy> for String {
    fn from(policy: FreshnessPolicy) -> Self {
        policy.to_string()
    }
}

impl fmt::Display for FreshnessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreshnessPolicy::AlwaysFresh => write!(f, "always-fresh"),
            FreshnessPolicy::MaxAge(secs) => write!(f, "max-age={}", secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_always_fresh() {
        assert_eq!(FreshnessPolicy::default(), FreshnessPolicy::AlwaysFresh);
        assert_eq!(FreshnessPolicy::default().cache_control(), "no-store");
    }

    #[test]
    fn parses_both_forms() {
        assert_eq!("always-fresh".parse(), Ok(FreshnessPolicy::AlwaysFresh));
        assert_eq!("max-age=60".parse(), Ok(FreshnessPolicy::MaxAge(60)));
        assert_eq!(" max-age=0 ".parse(), Ok(FreshnessPolicy::MaxAge(0)));
    }

    #[test]
    fn rejects_garbage() {
        assert!("forever".parse::<FreshnessPolicy>().is_err());
        assert!("max-age=".parse::<FreshnessPolicy>().is_err());
        assert!("max-age=-5".parse::<FreshnessPolicy>().is_err());
    }

    #[test]
    fn max_age_cache_control() {
        assert_eq!(
            FreshnessPolicy::MaxAge(300).cache_control(),
            "public, max-age=300"
        );
    }

    #[test]
    fn deserializes_from_string() {
        let policy: FreshnessPolicy = serde_json::from_str("\"max-age=30\"").unwrap();
        assert_eq!(policy, FreshnessPolicy::MaxAge(30));
        assert!(serde_json::from_str::<FreshnessPolicy>("\"sometimes\"").is_err());
    }
}
