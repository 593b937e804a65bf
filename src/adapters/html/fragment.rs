//! HTML fragment serializer for render trees.
//!
//! Produces a body fragment (no `<html>`/`<head>`), leaving page layout and
//! styling to whatever embeds it. Text is escaped; highlighted code and
//! typeset MathML are inserted as produced by their passes.

use std::fmt::Write;

use crate::application::RenderedArticle;
use crate::domain::article::ArticleListing;
use crate::domain::document::{ColumnAlignment, ListItem, Math, RenderNode, RenderedDocument, TableRow};

/// Serializes render trees to HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFragmentRenderer;

impl HtmlFragmentRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders a whole article: title, date and body.
    pub fn render_article(&self, article: &RenderedArticle) -> String {
        let mut out = String::new();
        out.push_str("<article>\n<header>\n");
        let _ = writeln!(out, "<h1>{}</h1>", html_escape(&article.title));
        let date = article.date.as_datetime();
        let _ = writeln!(
            out,
            "<time datetime=\"{}\">{}</time>",
            date.to_rfc3339(),
            date.format("%B %-d, %Y")
        );
        out.push_str("</header>\n");
        out.push_str(&self.render_document(&article.document));
        out.push_str("</article>\n");
        out
    }

    /// Renders the article index as a list of links.
    pub fn render_index(&self, listings: &[ArticleListing]) -> String {
        let mut out = String::from("<ul class=\"article-index\">\n");
        for listing in listings {
            let _ = write!(
                out,
                "<li><a href=\"/articles/{}\">{}</a>",
                listing.slug,
                html_escape(&listing.title)
            );
            if !listing.description.is_empty() {
                let _ = write!(out, " <p>{}</p>", html_escape(&listing.description));
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
        out
    }

    /// Renders the body nodes only.
    pub fn render_document(&self, document: &RenderedDocument) -> String {
        let mut out = String::new();
        render_nodes(&document.nodes, &mut out);
        out
    }
}

fn render_nodes(nodes: &[RenderNode], out: &mut String) {
    for node in nodes {
        render_node(node, out);
    }
}

fn wrap(tag: &str, children: &[RenderNode], out: &mut String) {
    let _ = write!(out, "<{}>", tag);
    render_nodes(children, out);
    let _ = write!(out, "</{}>", tag);
}

fn render_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Heading { level, children } => {
            let _ = write!(out, "<h{}>", level);
            render_nodes(children, out);
            let _ = writeln!(out, "</h{}>", level);
        }
        RenderNode::Paragraph { children } => {
            wrap("p", children, out);
            out.push('\n');
        }
        RenderNode::Text { value } => out.push_str(&html_escape(value)),
        RenderNode::Emphasis { children } => wrap("em", children, out),
        RenderNode::Strong { children } => wrap("strong", children, out),
        RenderNode::Strikethrough { children } => wrap("del", children, out),
        RenderNode::InlineCode { value } => {
            let _ = write!(out, "<code>{}</code>", html_escape(value));
        }
        RenderNode::CodeBlock(block) => {
            out.push_str("<pre><code");
            match (&block.language, &block.highlighted) {
                (Some(lang), Some(_)) => {
                    let _ = write!(out, " class=\"language-{} highlight\"", html_escape(lang));
                }
                (Some(lang), None) => {
                    let _ = write!(out, " class=\"language-{}\"", html_escape(lang));
                }
                _ => {}
            }
            out.push('>');
            match &block.highlighted {
                Some(markup) => out.push_str(markup),
                None => out.push_str(&html_escape(&block.source)),
            }
            out.push_str("</code></pre>\n");
        }
        RenderNode::MathInline(math) => render_math(math, "span", "math math-inline", out),
        RenderNode::MathBlock(math) => {
            render_math(math, "div", "math math-display", out);
            out.push('\n');
        }
        RenderNode::List { start, items } => render_list(*start, items, out),
        RenderNode::Table {
            alignments,
            head,
            rows,
        } => {
            out.push_str("<table>\n<thead>\n");
            render_row(head, alignments, "th", out);
            out.push_str("</thead>\n<tbody>\n");
            for row in rows {
                render_row(row, alignments, "td", out);
            }
            out.push_str("</tbody>\n</table>\n");
        }
        RenderNode::Link {
            href,
            title,
            children,
        } => {
            let _ = write!(out, "<a href=\"{}\"", html_escape(safe_url(href)));
            if !title.is_empty() {
                let _ = write!(out, " title=\"{}\"", html_escape(title));
            }
            out.push('>');
            render_nodes(children, out);
            out.push_str("</a>");
        }
        RenderNode::Image { src, alt, title } => {
            let _ = write!(
                out,
                "<img src=\"{}\" alt=\"{}\"",
                html_escape(safe_url(src)),
                html_escape(alt)
            );
            if !title.is_empty() {
                let _ = write!(out, " title=\"{}\"", html_escape(title));
            }
            out.push_str(" />");
        }
        RenderNode::BlockQuote { children } => {
            out.push_str("<blockquote>\n");
            render_nodes(children, out);
            out.push_str("</blockquote>\n");
        }
        RenderNode::FootnoteReference { label } => {
            let label = html_escape(label);
            let _ = write!(
                out,
                "<sup class=\"footnote-reference\"><a href=\"#fn-{0}\">{0}</a></sup>",
                label
            );
        }
        RenderNode::FootnoteDefinition { label, children } => {
            let label = html_escape(label);
            let _ = write!(
                out,
                "<div class=\"footnote-definition\" id=\"fn-{0}\"><sup class=\"footnote-definition-label\">{0}</sup>\n",
                label
            );
            render_nodes(children, out);
            out.push_str("</div>\n");
        }
        RenderNode::Rule => out.push_str("<hr />\n"),
        RenderNode::SoftBreak => out.push('\n'),
        RenderNode::HardBreak => out.push_str("<br />\n"),
    }
}

fn render_math(math: &Math, tag: &str, class: &str, out: &mut String) {
    let _ = write!(out, "<{} class=\"{}\">", tag, class);
    match &math.typeset {
        Some(mathml) => out.push_str(mathml),
        None => out.push_str(&html_escape(&math.source)),
    }
    let _ = write!(out, "</{}>", tag);
}

fn render_list(start: Option<u64>, items: &[ListItem], out: &mut String) {
    let tag = match start {
        Some(1) => {
            out.push_str("<ol>\n");
            "ol"
        }
        Some(n) => {
            let _ = writeln!(out, "<ol start=\"{}\">", n);
            "ol"
        }
        None => {
            out.push_str("<ul>\n");
            "ul"
        }
    };
    for item in items {
        out.push_str("<li>");
        match item.checked {
            Some(true) => out.push_str("<input type=\"checkbox\" disabled checked /> "),
            Some(false) => out.push_str("<input type=\"checkbox\" disabled /> "),
            None => {}
        }
        render_nodes(&item.children, out);
        out.push_str("</li>\n");
    }
    let _ = writeln!(out, "</{}>", tag);
}

fn render_row(row: &TableRow, alignments: &[ColumnAlignment], cell_tag: &str, out: &mut String) {
    out.push_str("<tr>");
    for (i, cell) in row.cells.iter().enumerate() {
        let align = match alignments.get(i) {
            Some(ColumnAlignment::Left) => " style=\"text-align: left\"",
            Some(ColumnAlignment::Center) => " style=\"text-align: center\"",
            Some(ColumnAlignment::Right) => " style=\"text-align: right\"",
            _ => "",
        };
        let _ = write!(out, "<{}{}>", cell_tag, align);
        render_nodes(&cell.children, out);
        let _ = write!(out, "</{}>", cell_tag);
    }
    out.push_str("</tr>\n");
}

/// Keeps relative URLs and `http`, `https` and `mailto` links; anything
/// else becomes `#`. Browsers drop tabs and newlines inside a URL, so the
/// scheme is read with control characters and whitespace removed.
fn safe_url(url: &str) -> &str {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_ascii_whitespace())
        .collect();
    let path_start = cleaned
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(cleaned.len());
    match cleaned[..path_start].split_once(':') {
        None => url,
        Some((scheme, _)) => match scheme.to_ascii_lowercase().as_str() {
            "http" | "https" | "mailto" => url,
            _ => "#",
        },
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{CodeBlock, DocumentCompiler, TableCell};

    fn render(nodes: Vec<RenderNode>) -> String {
        HtmlFragmentRenderer::new().render_document(&RenderedDocument::new(nodes))
    }

    #[test]
    fn escapes_text() {
        let html = render(vec![RenderNode::Paragraph {
            children: vec![RenderNode::text("<script>alert(1)</script> & more")],
        }]);
        assert_eq!(
            html,
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; more</p>\n"
        );
    }

    #[test]
    fn heading_levels() {
        let html = render(vec![RenderNode::Heading {
            level: 3,
            children: vec![RenderNode::text("Intro")],
        }]);
        assert_eq!(html, "<h3>Intro</h3>\n");
    }

    #[test]
    fn highlighted_code_is_inserted_verbatim() {
        let html = render(vec![RenderNode::CodeBlock(CodeBlock {
            language: Some("rust".to_string()),
            source: "fn x() {}".to_string(),
            highlighted: Some("<span class=\"hl-keyword\">fn</span> x() {}".to_string()),
        })]);
        assert!(html.starts_with("<pre><code class=\"language-rust highlight\">"));
        assert!(html.contains("<span class=\"hl-keyword\">fn</span>"));
    }

    #[test]
    fn plain_code_is_escaped() {
        let html = render(vec![RenderNode::CodeBlock(CodeBlock {
            language: None,
            source: "a < b".to_string(),
            highlighted: None,
        })]);
        assert_eq!(html, "<pre><code>a &lt; b</code></pre>\n");
    }

    #[test]
    fn math_uses_typeset_form_or_escaped_source() {
        let html = render(vec![
            RenderNode::MathInline(Math {
                source: "x".to_string(),
                typeset: Some("<math><mi>x</mi></math>".to_string()),
            }),
            RenderNode::MathBlock(Math {
                source: "a<b".to_string(),
                typeset: None,
            }),
        ]);
        assert!(html.contains("<span class=\"math math-inline\"><math><mi>x</mi></math></span>"));
        assert!(html.contains("<div class=\"math math-display\">a&lt;b</div>"));
    }

    #[test]
    fn task_list_and_ordered_start() {
        let html = render(vec![RenderNode::List {
            start: Some(3),
            items: vec![
                ListItem {
                    checked: Some(true),
                    children: vec![RenderNode::text("done")],
                },
                ListItem {
                    checked: None,
                    children: vec![RenderNode::text("plain")],
                },
            ],
        }]);
        assert!(html.starts_with("<ol start=\"3\">"));
        assert!(html.contains("<li><input type=\"checkbox\" disabled checked /> done</li>"));
        assert!(html.contains("<li>plain</li>"));
    }

    #[test]
    fn table_alignment() {
        let cell = |s: &str| TableCell {
            children: vec![RenderNode::text(s)],
        };
        let html = render(vec![RenderNode::Table {
            alignments: vec![ColumnAlignment::None, ColumnAlignment::Right],
            head: TableRow {
                cells: vec![cell("k"), cell("v")],
            },
            rows: vec![TableRow {
                cells: vec![cell("a"), cell("1")],
            }],
        }]);
        assert!(html.contains("<tr><th>k</th><th style=\"text-align: right\">v</th></tr>"));
        assert!(html.contains("<tr><td>a</td><td style=\"text-align: right\">1</td></tr>"));
    }

    #[test]
    fn script_urls_are_neutralised() {
        let html = render(vec![RenderNode::Link {
            href: "JavaScript:alert(1)".to_string(),
            title: String::new(),
            children: vec![RenderNode::text("click")],
        }]);
        assert_eq!(html, "<a href=\"#\">click</a>");

        let html = render(vec![RenderNode::Link {
            href: "https://example.com/?a=1&b=2".to_string(),
            title: "t".to_string(),
            children: vec![RenderNode::text("ok")],
        }]);
        assert_eq!(
            html,
            "<a href=\"https://example.com/?a=1&amp;b=2\" title=\"t\">ok</a>"
        );
    }

    #[test]
    fn renders_compiled_markdown() {
        let compilation = DocumentCompiler::structural_only()
            .compile(Some("# Title\n\nSome *emphasis* and ~~gone~~.\n\n---\n"));
        let html = HtmlFragmentRenderer::new().render_document(&compilation.document);
        assert_eq!(
            html,
            "<h1>Title</h1>\n<p>Some <em>emphasis</em> and <del>gone</del>.</p>\n<hr />\n"
        );
    }

    #[test]
    fn script_schemes_hidden_by_control_characters_are_neutralised() {
        let compilation = DocumentCompiler::structural_only().compile(Some(
            "[click](java&#9;script:alert(1)) ![i](java&#10;script:alert(2)) [d](DATA:text/html,x)",
        ));
        let html = HtmlFragmentRenderer::new().render_document(&compilation.document);
        assert!(!html.to_ascii_lowercase().contains("script:"), "{}", html);
        assert!(!html.contains("text/html"), "{}", html);
        assert!(html.contains("<a href=\"#\">click</a>"), "{}", html);
    }

    #[test]
    fn ordinary_links_are_kept() {
        assert_eq!(safe_url("https://example.com/a?b=c"), "https://example.com/a?b=c");
        assert_eq!(safe_url("mailto:me@example.com"), "mailto:me@example.com");
        assert_eq!(safe_url("/articles/rust-lifetimes"), "/articles/rust-lifetimes");
        assert_eq!(safe_url("#footnote-1"), "#footnote-1");
        assert_eq!(safe_url("notes/a:b"), "notes/a:b");
        assert_eq!(safe_url(" JavaScript:alert(1)"), "#");
        assert_eq!(safe_url("vbscript:x"), "#");
    }
}
