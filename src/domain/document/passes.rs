//! Transformation passes run after the structural parse.
//!
//! Each pass owns one node kind and leaves every other node untouched. A
//! node finalized by a pass (highlighted block, typeset formula) is skipped
//! if it is seen again.

use crate::ports::{CodeHighlighter, MathDisplay, MathTypesetter};

use super::degradation::{CompilePass, Degradation};
use super::node::{RenderNode, RenderedDocument};

/// Annotates fenced code blocks with highlight markup.
pub struct HighlightPass<'a> {
    highlighter: &'a dyn CodeHighlighter,
}

impl<'a> HighlightPass<'a> {
    pub fn new(highlighter: &'a dyn CodeHighlighter) -> Self {
        Self { highlighter }
    }

    pub fn apply(&self, document: &mut RenderedDocument, degradations: &mut Vec<Degradation>) {
        document.walk_mut(&mut |node| {
            let RenderNode::CodeBlock(block) = node else {
                return;
            };
            if block.highlighted.is_some() {
                return;
            }
            let Some(language) = block.language.as_deref() else {
                return;
            };
            match self.highlighter.highlight(language, &block.source) {
                Ok(markup) => block.highlighted = markup,
                Err(e) => {
                    degradations.push(Degradation::new(
                        CompilePass::Highlight,
                        e.to_string(),
                        &block.source,
                    ));
                }
            }
        });
    }
}

/// Typesets math nodes; a formula the typesetter rejects becomes literal
/// text with its original delimiters.
pub struct MathPass<'a> {
    typesetter: &'a dyn MathTypesetter,
}

impl<'a> MathPass<'a> {
    pub fn new(typesetter: &'a dyn MathTypesetter) -> Self {
        Self { typesetter }
    }

    pub fn apply(&self, document: &mut RenderedDocument, degradations: &mut Vec<Degradation>) {
        document.walk_mut(&mut |node| {
            let (math, display) = match node {
                RenderNode::MathInline(math) => (math, MathDisplay::Inline),
                RenderNode::MathBlock(math) => (math, MathDisplay::Block),
                _ => return,
            };
            if math.typeset.is_some() {
                return;
            }
            match self.typesetter.typeset(&math.source, display) {
                Ok(markup) => math.typeset = Some(markup),
                Err(e) => {
                    degradations.push(Degradation::new(CompilePass::Math, e.to_string(), &math.source));
                    let literal = match display {
                        MathDisplay::Inline => format!("${}$", math.source),
                        MathDisplay::Block => format!("$${}$$", math.source),
                    };
                    *node = RenderNode::text(literal);
                }
            }
        });
    }
}
