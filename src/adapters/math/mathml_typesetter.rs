//! MathML typesetter adapter.
//!
//! Converts TeX to presentation MathML, which browsers render natively with
//! no client-side script.

use latex2mathml::{latex_to_mathml, DisplayStyle};

use crate::ports::{MathDisplay, MathTypesetter, TypesetError};

const PARSE_ERROR_MARKER: &str = "[PARSE ERROR";

/// Typesetter backed by `latex2mathml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathmlTypesetter;

impl MathmlTypesetter {
    pub fn new() -> Self {
        Self
    }
}

impl MathTypesetter for MathmlTypesetter {
    fn typeset(&self, source: &str, display: MathDisplay) -> Result<String, TypesetError> {
        let style = match display {
            MathDisplay::Inline => DisplayStyle::Inline,
            MathDisplay::Block => DisplayStyle::Block,
        };
        let mathml =
            latex_to_mathml(source.trim(), style).map_err(|e| TypesetError(e.to_string()))?;
        // latex2mathml reports many syntax errors inline rather than as `Err`.
        if mathml.contains(PARSE_ERROR_MARKER) {
            return Err(TypesetError(format!("unparseable TeX: {}", source.trim())));
        }
        Ok(mathml)
    }
}
