//! Code highlighting adapters.
//!
//! - `SyntectHighlighter` - Sublime-syntax grammars via syntect, emitting
//!   class-annotated spans

mod syntect_highlighter;

pub use syntect_highlighter::{SyntectHighlighter, HIGHLIGHT_CLASS_PREFIX};
