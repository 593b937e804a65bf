//! Records of spans that compiled to a fallback rendering.

use serde::Serialize;
use std::fmt;

/// Compiler pass that recovered from a bad span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilePass {
    Structure,
    Highlight,
    Math,
}

impl fmt::Display for CompilePass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilePass::Structure => write!(f, "structure"),
            CompilePass::Highlight => write!(f, "highlight"),
            CompilePass::Math => write!(f, "math"),
        }
    }
}

/// A span that could not be compiled and fell back to literal text (or to an
/// unhighlighted block). The rest of the document is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    pub pass: CompilePass,
    pub reason: String,
    /// Leading part of the offending source.
    pub excerpt: String,
}

const EXCERPT_CHARS: usize = 40;

impl Degradation {
    pub fn new(pass: CompilePass, reason: impl Into<String>, source: &str) -> Self {
        Self {
            pass,
            reason: reason.into(),
            excerpt: excerpt(source),
        }
    }
}

fn excerpt(source: &str) -> String {
    let mut chars = source.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
