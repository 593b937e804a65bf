//! Structural parse: markdown events to a render tree.
//!
//! Driven by pulldown-cmark with GFM tables, strikethrough, task lists,
//! footnotes and math delimiters enabled. Containers are assembled on an
//! explicit stack; every `End` event closes the innermost open frame.

use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag,
};

use super::node::{CodeBlock, ColumnAlignment, ListItem, Math, RenderNode, TableCell, TableRow};

/// Parser options used for article bodies.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

enum FrameKind {
    Root,
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock(Option<String>),
    List(Option<u64>),
    Item,
    Table(Vec<ColumnAlignment>),
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: String },
    Image { src: String, title: String },
    FootnoteDefinition(String),
    /// Containers this tree does not model; children are spliced into the parent.
    Transparent,
    /// Content that must not appear in the document (front matter).
    Discard,
}

struct Frame {
    kind: FrameKind,
    children: Vec<RenderNode>,
    items: Vec<ListItem>,
    rows: Vec<TableRow>,
    head: Option<TableRow>,
    cells: Vec<TableCell>,
    checked: Option<bool>,
    code: String,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            items: Vec::new(),
            rows: Vec::new(),
            head: None,
            cells: Vec::new(),
            checked: None,
            code: String::new(),
        }
    }
}

/// Builds the render tree for a markdown body.
pub fn parse(markdown: &str) -> Vec<RenderNode> {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.push(event);
    }
    builder.finish()
}

struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::new(FrameKind::Root)],
        }
    }

    fn top(&mut self) -> &mut Frame {
        // The root frame is never popped.
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push_node(&mut self, node: RenderNode) {
        let top = self.top();
        match top.kind {
            FrameKind::Discard => {}
            _ => top.children.push(node),
        }
    }

    fn push_text(&mut self, text: &str) {
        let top = self.top();
        match top.kind {
            FrameKind::CodeBlock(_) => top.code.push_str(text),
            FrameKind::Discard => {}
            _ => {
                // Adjacent text events (entity boundaries, smart splits) merge.
                if let Some(RenderNode::Text { value }) = top.children.last_mut() {
                    value.push_str(text);
                } else {
                    top.children.push(RenderNode::text(text));
                }
            }
        }
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => {
                let kind = frame_kind(tag);
                self.stack.push(Frame::new(kind));
            }
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_node(RenderNode::InlineCode {
                value: code.into_string(),
            }),
            Event::InlineMath(source) => self.push_node(RenderNode::MathInline(Math {
                source: source.into_string(),
                typeset: None,
            })),
            Event::DisplayMath(source) => self.push_node(RenderNode::MathBlock(Math {
                source: source.into_string(),
                typeset: None,
            })),
            // Raw HTML/JSX is not trusted; it is kept as literal text.
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::FootnoteReference(label) => self.push_node(RenderNode::FootnoteReference {
                label: label.into_string(),
            }),
            Event::SoftBreak => self.push_node(RenderNode::SoftBreak),
            Event::HardBreak => self.push_node(RenderNode::HardBreak),
            Event::Rule => self.push_node(RenderNode::Rule),
            Event::TaskListMarker(checked) => {
                if let Some(item) = self
                    .stack
                    .iter_mut()
                    .rev()
                    .find(|f| matches!(f.kind, FrameKind::Item))
                {
                    item.checked = Some(checked);
                }
            }
        }
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let parent = self.top();

        match frame.kind {
            FrameKind::Root | FrameKind::Discard => {}
            FrameKind::Transparent => parent.children.extend(frame.children),
            FrameKind::Item => parent.items.push(ListItem {
                checked: frame.checked,
                children: frame.children,
            }),
            FrameKind::TableCell => parent.cells.push(TableCell {
                children: frame.children,
            }),
            FrameKind::TableHead => {
                parent.head = Some(TableRow { cells: frame.cells });
            }
            FrameKind::TableRow => parent.rows.push(TableRow { cells: frame.cells }),
            kind => {
                if matches!(parent.kind, FrameKind::Discard) {
                    return;
                }
                let node = finish_node(kind, frame.children, frame.items, frame.rows, frame.head, frame.code);
                parent.children.push(node);
            }
        }
    }

    fn finish(mut self) -> Vec<RenderNode> {
        // A well-formed event stream is balanced; close anything left open.
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack.pop().map(|root| root.children).unwrap_or_default()
    }
}

fn finish_node(
    kind: FrameKind,
    children: Vec<RenderNode>,
    items: Vec<ListItem>,
    rows: Vec<TableRow>,
    head: Option<TableRow>,
    code: String,
) -> RenderNode {
    match kind {
        FrameKind::Paragraph => RenderNode::Paragraph { children },
        FrameKind::Heading(level) => RenderNode::Heading { level, children },
        FrameKind::BlockQuote => RenderNode::BlockQuote { children },
        FrameKind::CodeBlock(language) => RenderNode::CodeBlock(CodeBlock {
            language,
            source: code,
            highlighted: None,
        }),
        FrameKind::List(start) => RenderNode::List { start, items },
        FrameKind::Table(alignments) => RenderNode::Table {
            alignments,
            head: head.unwrap_or(TableRow { cells: Vec::new() }),
            rows,
        },
        FrameKind::Emphasis => RenderNode::Emphasis { children },
        FrameKind::Strong => RenderNode::Strong { children },
        FrameKind::Strikethrough => RenderNode::Strikethrough { children },
        FrameKind::Link { href, title } => RenderNode::Link {
            href,
            title,
            children,
        },
        FrameKind::Image { src, title } => {
            let alt = children.iter().map(RenderNode::plain_text).collect();
            RenderNode::Image { src, alt, title }
        }
        FrameKind::FootnoteDefinition(label) => RenderNode::FootnoteDefinition { label, children },
        // Handled by `close` before reaching here.
        FrameKind::Root
        | FrameKind::Item
        | FrameKind::TableHead
        | FrameKind::TableRow
        | FrameKind::TableCell
        | FrameKind::Transparent
        | FrameKind::Discard => RenderNode::Paragraph { children },
    }
}

fn frame_kind(tag: Tag<'_>) -> FrameKind {
    match tag {
        Tag::Paragraph => FrameKind::Paragraph,
        Tag::Heading { level, .. } => FrameKind::Heading(heading_level(level)),
        Tag::BlockQuote(_) => FrameKind::BlockQuote,
        Tag::CodeBlock(kind) => FrameKind::CodeBlock(code_language(kind)),
        Tag::List(start) => FrameKind::List(start),
        Tag::Item => FrameKind::Item,
        Tag::Table(alignments) => {
            FrameKind::Table(alignments.into_iter().map(column_alignment).collect())
        }
        Tag::TableHead => FrameKind::TableHead,
        Tag::TableRow => FrameKind::TableRow,
        Tag::TableCell => FrameKind::TableCell,
        Tag::Emphasis => FrameKind::Emphasis,
        Tag::Strong => FrameKind::Strong,
        Tag::Strikethrough => FrameKind::Strikethrough,
        Tag::Link {
            dest_url, title, ..
        } => FrameKind::Link {
            href: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => FrameKind::Image {
            src: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::FootnoteDefinition(label) => FrameKind::FootnoteDefinition(label.into_string()),
        Tag::MetadataBlock(_) => FrameKind::Discard,
        _ => FrameKind::Transparent,
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn code_language(kind: CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Indented => None,
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
    }
}

fn column_alignment(alignment: Alignment) -> ColumnAlignment {
    match alignment {
        Alignment::None => ColumnAlignment::None,
        Alignment::Left => ColumnAlignment::Left,
        Alignment::Center => ColumnAlignment::Center,
        Alignment::Right => ColumnAlignment::Right,
    }
}
