//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `store` - Content store (PostgREST, PostgreSQL, in-memory)
//! - `highlight` - Code highlighting (syntect)
//! - `math` - TeX typesetting (MathML)
//! - `html` - HTML fragment serialization of render trees
//! - `http` - REST API (axum)

pub mod highlight;
pub mod html;
pub mod http;
pub mod math;
pub mod store;

pub use highlight::SyntectHighlighter;
pub use html::HtmlFragmentRenderer;
pub use math::MathmlTypesetter;
pub use store::{InMemoryContentStore, PostgresContentStore, PostgrestConfig, PostgrestContentStore};
