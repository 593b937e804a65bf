//! Article listing projection used by index views.

use serde::Serialize;
use std::cmp::Ordering;

use super::{ContentRecord, PublishedAt, Slug};

/// Summary of an article for index pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleListing {
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub date: PublishedAt,
}

impl ArticleListing {
    /// Listing order: newest first, equal dates by slug ascending.
    pub fn listing_order(a: &ArticleListing, b: &ArticleListing) -> Ordering {
        b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
    }
}

impl From<ContentRecord> for ArticleListing {
    fn from(record: ContentRecord) -> Self {
        Self {
            slug: record.slug,
            title: record.title,
            description: record.description,
            date: record.date,
        }
    }
}

/// Sorts listings into their canonical, total order.
///
/// The store's own ordering is not trusted: equal dates come back in
/// whatever order the query plan produced.
pub fn sort_listings(listings: &mut [ArticleListing]) {
    listings.sort_by(ArticleListing::listing_order);
}
