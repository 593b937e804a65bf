//! Render tree node types.
//!
//! The tree is presentation-agnostic: every node carries enough data for an
//! embedding layer to serialize it (JSON via serde, or HTML via the
//! presentation adapter).

use serde::Serialize;

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAlignment {
    None,
    Left,
    Center,
    Right,
}

/// Fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Language token from the fence info string, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub source: String,
    /// Pre-rendered highlight markup (class-annotated spans).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<String>,
}

/// Mathematical notation, inline or display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Math {
    /// TeX source between the delimiters.
    pub source: String,
    /// Typeset MathML, once the math pass has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typeset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Task list marker state, `None` for plain items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub children: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub children: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    Heading {
        level: u8,
        children: Vec<RenderNode>,
    },
    Paragraph {
        children: Vec<RenderNode>,
    },
    Text {
        value: String,
    },
    Emphasis {
        children: Vec<RenderNode>,
    },
    Strong {
        children: Vec<RenderNode>,
    },
    Strikethrough {
        children: Vec<RenderNode>,
    },
    InlineCode {
        value: String,
    },
    CodeBlock(CodeBlock),
    MathInline(Math),
    MathBlock(Math),
    List {
        /// Start number for ordered lists, `None` for bullet lists.
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    Table {
        alignments: Vec<ColumnAlignment>,
        head: TableRow,
        rows: Vec<TableRow>,
    },
    Link {
        href: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        title: String,
        children: Vec<RenderNode>,
    },
    Image {
        src: String,
        alt: String,
        #[serde(skip_serializing_if = "String::is_empty")]
        title: String,
    },
    BlockQuote {
        children: Vec<RenderNode>,
    },
    FootnoteReference {
        label: String,
    },
    FootnoteDefinition {
        label: String,
        children: Vec<RenderNode>,
    },
    Rule,
    SoftBreak,
    HardBreak,
}

impl RenderNode {
    pub fn text(value: impl Into<String>) -> Self {
        RenderNode::Text {
            value: value.into(),
        }
    }

    /// Mutable access to direct children, for node kinds that have them.
    ///
    /// Table cells and list items are visited through [`RenderNode::walk_mut`].
    pub fn children_mut(&mut self) -> Option<&mut Vec<RenderNode>> {
        match self {
            RenderNode::Heading { children, .. }
            | RenderNode::Paragraph { children }
            | RenderNode::Emphasis { children }
            | RenderNode::Strong { children }
            | RenderNode::Strikethrough { children }
            | RenderNode::Link { children, .. }
            | RenderNode::BlockQuote { children }
            | RenderNode::FootnoteDefinition { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Visits this node and all descendants depth-first, parents first.
    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut RenderNode)) {
        visit(self);
        match self {
            RenderNode::List { items, .. } => {
                for item in items {
                    walk_all_mut(&mut item.children, visit);
                }
            }
            RenderNode::Table { head, rows, .. } => {
                for row in std::iter::once(head).chain(rows.iter_mut()) {
                    for cell in &mut row.cells {
                        walk_all_mut(&mut cell.children, visit);
                    }
                }
            }
            other => {
                if let Some(children) = other.children_mut() {
                    walk_all_mut(children, visit);
                }
            }
        }
    }

    /// Concatenated text content, used for image alt text and excerpts.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

/// Walks every node of a sibling list.
pub fn walk_all_mut(nodes: &mut [RenderNode], visit: &mut dyn FnMut(&mut RenderNode)) {
    for node in nodes {
        node.walk_mut(visit);
    }
}

fn collect_text(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Text { value } | RenderNode::InlineCode { value } => out.push_str(value),
        RenderNode::MathInline(math) | RenderNode::MathBlock(math) => out.push_str(&math.source),
        RenderNode::CodeBlock(block) => out.push_str(&block.source),
        RenderNode::SoftBreak | RenderNode::HardBreak => out.push(' '),
        RenderNode::Image { alt, .. } => out.push_str(alt),
        RenderNode::Heading { children, .. }
        | RenderNode::Paragraph { children }
        | RenderNode::Emphasis { children }
        | RenderNode::Strong { children }
        | RenderNode::Strikethrough { children }
        | RenderNode::Link { children, .. }
        | RenderNode::BlockQuote { children }
        | RenderNode::FootnoteDefinition { children, .. } => {
            for child in children {
                collect_text(child, out);
            }
        }
        RenderNode::List { items, .. } => {
            for item in items {
                for child in &item.children {
                    collect_text(child, out);
                }
            }
        }
        RenderNode::Table { head, rows, .. } => {
            for row in std::iter::once(head).chain(rows.iter()) {
                for cell in &row.cells {
                    for child in &cell.children {
                        collect_text(child, out);
                    }
                }
            }
        }
        RenderNode::FootnoteReference { .. } | RenderNode::Rule => {}
    }
}

/// The compiled form of an article body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub nodes: Vec<RenderNode>,
}

impl RenderedDocument {
    pub fn new(nodes: Vec<RenderNode>) -> Self {
        Self { nodes }
    }

    /// An empty document, the result of compiling empty or absent markup.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut RenderNode)) {
        walk_all_mut(&mut self.nodes, visit);
    }
}
