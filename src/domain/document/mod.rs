//! Document module - render tree and the multi-pass compiler.
//!
//! - `node` - Typed render tree (`RenderedDocument`, `RenderNode`)
//! - `structure` - Markdown structural parse
//! - `passes` - Highlighting and math typesetting passes
//! - `compiler` - `DocumentCompiler` running the passes in order
//! - `degradation` - Records of spans that fell back to literal rendering

mod compiler;
mod degradation;
mod node;
mod passes;
mod structure;

pub use compiler::{Compilation, DocumentCompiler};
pub use degradation::{CompilePass, Degradation};
pub use node::{
    walk_all_mut, CodeBlock, ColumnAlignment, ListItem, Math, RenderNode, RenderedDocument,
    TableCell, TableRow,
};
pub use structure::parser_options;
