//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ContentStore` - Keyed lookup and ordered listing against the remote store
//! - `CodeHighlighter` - Syntax annotation of code blocks
//! - `MathTypesetter` - TeX to typeset output

mod code_highlighter;
mod content_store;
mod math_typesetter;

pub use code_highlighter::{CodeHighlighter, HighlightError, NoopHighlighter};
pub use content_store::{
    validate_identifier, ContentStore, OrderBy, SortDirection, StoreError, StoreRow,
};
pub use math_typesetter::{MathDisplay, MathTypesetter, TypesetError};
