//! Document compiler - raw markup to render tree.
//!
//! Passes run in a fixed order:
//!
//! 1. Structural parse (blocks, inlines, tables, lists, math delimiters)
//! 2. Syntax highlighting of fenced code blocks
//! 3. Math typesetting
//!
//! Compilation never fails as a whole. Spans that cannot be handled are
//! kept as literal text (or left unhighlighted) and reported as
//! [`Degradation`]s alongside the document.

use std::sync::Arc;

use crate::ports::{CodeHighlighter, MathTypesetter, NoopHighlighter};

use super::degradation::{CompilePass, Degradation};
use super::node::{RenderNode, RenderedDocument};
use super::passes::{HighlightPass, MathPass};
use super::structure;

/// Result of compiling one body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub document: RenderedDocument,
    pub degradations: Vec<Degradation>,
}

impl Compilation {
    /// True when at least one span fell back to a literal rendering.
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Compiles article markup into a [`RenderedDocument`].
///
/// Holds only immutable collaborators, so a single instance is shared across
/// concurrent requests.
#[derive(Clone)]
pub struct DocumentCompiler {
    highlighter: Arc<dyn CodeHighlighter>,
    typesetter: Option<Arc<dyn MathTypesetter>>,
}

impl DocumentCompiler {
    /// Creates a compiler with the given highlighter and math typesetter.
    pub fn new(highlighter: Arc<dyn CodeHighlighter>, typesetter: Arc<dyn MathTypesetter>) -> Self {
        Self {
            highlighter,
            typesetter: Some(typesetter),
        }
    }

    /// Creates a compiler that only performs the structural parse.
    ///
    /// Math nodes keep their TeX source with no typeset form.
    pub fn structural_only() -> Self {
        Self {
            highlighter: Arc::new(NoopHighlighter),
            typesetter: None,
        }
    }

    /// Replaces the highlighter.
    pub fn with_highlighter(mut self, highlighter: Arc<dyn CodeHighlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Enables math typesetting with `typesetter`.
    pub fn with_typesetter(mut self, typesetter: Arc<dyn MathTypesetter>) -> Self {
        self.typesetter = Some(typesetter);
        self
    }

    /// Compiles `markup`. Empty or absent markup yields an empty document.
    pub fn compile(&self, markup: Option<&str>) -> Compilation {
        let markup = markup.unwrap_or_default();
        if markup.trim().is_empty() {
            return Compilation {
                document: RenderedDocument::empty(),
                degradations: Vec::new(),
            };
        }

        let mut degradations = Vec::new();
        let mut nodes = structure::parse(markup);
        if nodes.is_empty() {
            // Front matter or reference definitions only; keep the body visible.
            degradations.push(Degradation::new(
                CompilePass::Structure,
                "body has no renderable blocks",
                markup,
            ));
            nodes.push(RenderNode::Paragraph {
                children: vec![RenderNode::text(markup.trim())],
            });
        }
        let mut document = RenderedDocument::new(nodes);

        HighlightPass::new(self.highlighter.as_ref()).apply(&mut document, &mut degradations);
        if let Some(typesetter) = &self.typesetter {
            MathPass::new(typesetter.as_ref()).apply(&mut document, &mut degradations);
        }

        Compilation {
            document,
            degradations,
        }
    }
}

impl std::fmt::Debug for DocumentCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCompiler")
            .field("math", &self.typesetter.is_some())
            .finish_non_exhaustive()
    }
}
