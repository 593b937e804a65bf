//! Domain layer containing the article model and document compilation.
//!
//! # Module Organization
//!
//! - `article` - Content records, slug validation, listing order
//! - `document` - Render tree types and the multi-pass document compiler

pub mod article;
pub mod document;
