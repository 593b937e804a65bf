//! Content record and publication date value objects.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Slug;

/// Publication timestamp of an article, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishedAt(DateTime<Utc>);

impl PublishedAt {
    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parses the encodings a content store hands back for a date column.
    ///
    /// Accepts RFC 3339, PostgreSQL's text form of `timestamptz`
    /// (`2024-03-01 09:30:00.123+00`), a naive `YYYY-MM-DD HH:MM:SS` taken
    /// as UTC, and a bare `YYYY-MM-DD` taken as midnight UTC.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// The unit of published content, read-only from this service's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub date: PublishedAt,
    /// Raw markup. `None` when the store holds no body at all.
    pub body: Option<String>,
}

impl ContentRecord {
    /// Returns true when there is no markup to compile.
    pub fn has_empty_body(&self) -> bool {
        self.body.as_deref().map_or(true, |b| b.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_rfc3339() {
        let date = PublishedAt::parse("2023-10-01T12:30:00Z").unwrap();
        assert_eq!(date.as_datetime().year(), 2023);
        assert_eq!(date.as_datetime().hour(), 12);
    }

    #[test]
    fn parses_rfc3339_with_offset_into_utc() {
        let date = PublishedAt::parse("2023-10-01T12:30:00+02:00").unwrap();
        assert_eq!(date.as_datetime().hour(), 10);
    }

    #[test]
    fn parses_postgres_timestamptz_text() {
        let date = PublishedAt::parse("2024-03-01 09:30:00.123+00").unwrap();
        assert_eq!(date.as_datetime().month(), 3);
        assert_eq!(date.as_datetime().minute(), 30);
    }

    #[test]
    fn parses_naive_timestamp_as_utc() {
        let date = PublishedAt::parse("2024-03-01T09:30:00").unwrap();
        assert_eq!(date.as_datetime().hour(), 9);
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let date = PublishedAt::parse("2022-07-14").unwrap();
        assert_eq!(date.as_datetime().day(), 14);
        assert_eq!(date.as_datetime().hour(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(PublishedAt::parse("last tuesday").is_none());
        assert!(PublishedAt::parse("").is_none());
    }

    #[test]
    fn ordering_follows_time() {
        let earlier = PublishedAt::parse("2022-01-01").unwrap();
        let later = PublishedAt::parse("2023-01-01").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn empty_body_detection() {
        let record = ContentRecord {
            slug: "a".parse().unwrap(),
            title: "A".to_string(),
            description: String::new(),
            date: PublishedAt::parse("2022-01-01").unwrap(),
            body: None,
        };
        assert!(record.has_empty_body());

        let record = ContentRecord {
            body: Some("  \n".to_string()),
            ..record
        };
        assert!(record.has_empty_body());

        let record = ContentRecord {
            body: Some("# Hi".to_string()),
            ..record
        };
        assert!(!record.has_empty_body());
    }
}
