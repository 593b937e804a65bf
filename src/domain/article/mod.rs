//! Article module - content records, slugs and listings.
//!
//! Records are owned by the external content store; this module only
//! describes their shape and the rules for identifying and ordering them.

mod listing;
mod record;
mod slug;

pub use listing::{sort_listings, ArticleListing};
pub use record::{ContentRecord, PublishedAt};
pub use slug::{InvalidSlug, Slug, SlugResolver, MAX_SLUG_LEN};
