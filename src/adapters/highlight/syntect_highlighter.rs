//! Syntect-based code highlighter adapter.
//!
//! Emits HTML spans carrying scope classes (`hl-keyword`, `hl-string`, ...)
//! rather than inline colours, so the presentation layer's stylesheet picks
//! the theme.

use once_cell::sync::Lazy;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::ports::{CodeHighlighter, HighlightError};

/// Prefix applied to every emitted scope class.
pub const HIGHLIGHT_CLASS_PREFIX: &str = "hl-";

/// Loading the bundled grammars takes tens of milliseconds; do it once.
static DEFAULT_SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Highlighter backed by syntect's bundled grammars.
#[derive(Clone, Copy)]
pub struct SyntectHighlighter {
    syntaxes: &'static SyntaxSet,
}

impl SyntectHighlighter {
    /// Creates a highlighter over the default grammar set.
    pub fn new() -> Self {
        Self {
            syntaxes: &DEFAULT_SYNTAXES,
        }
    }

    /// Returns true if a grammar exists for the language token.
    pub fn supports(&self, language: &str) -> bool {
        self.syntaxes.find_syntax_by_token(language).is_some()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .finish()
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, source: &str) -> Result<Option<String>, HighlightError> {
        let Some(syntax) = self.syntaxes.find_syntax_by_token(language) else {
            return Ok(None);
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            self.syntaxes,
            ClassStyle::SpacedPrefixed {
                prefix: HIGHLIGHT_CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(source) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| HighlightError(e.to_string()))?;
        }
        Ok(Some(generator.finalize()))
    }
}
