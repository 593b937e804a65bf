//! Code highlighter port.
//!
//! Highlighting is best effort: a language the implementation does not know
//! is not an error, it simply yields no markup.

use thiserror::Error;

/// Port for annotating code with syntax classes.
pub trait CodeHighlighter: Send + Sync {
    /// Returns class-annotated markup for `source`, or `Ok(None)` when the
    /// language is unknown.
    fn highlight(&self, language: &str, source: &str) -> Result<Option<String>, HighlightError>;
}

/// The highlighter recognised the language but failed on the input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Highlighting failed: {0}")]
pub struct HighlightError(pub String);

/// Highlighter that never highlights; used when highlighting is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHighlighter;

impl CodeHighlighter for NoopHighlighter {
    fn highlight(&self, _language: &str, _source: &str) -> Result<Option<String>, HighlightError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_returns_none() {
        assert_eq!(NoopHighlighter.highlight("rust", "fn main() {}"), Ok(None));
    }
}
