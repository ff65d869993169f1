//! Markdown to HTML rendering on top of pulldown-cmark.
//!
//! The parser's event stream is rewritten before it reaches
//! [`pulldown_cmark::html::push_html`]: headings, table cells and code blocks
//! are replaced by raw HTML events carrying our own markup, and constructs
//! we do not render are turned back into their literal source text.

use std::ops::Range;

use pulldown_cmark::{
    html, Alignment, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd,
};
use turndown_core::{ConversionError, RenderOptions};

use crate::highlight::highlight_comments;
use crate::template;

/// Renders Markdown into HTML.
///
/// Rendering is a pure function of the input and the options the renderer
/// was built with.
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    options: RenderOptions,
}

impl MarkupRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a complete HTML document, including the preamble and the
    /// behavior script
    pub fn render(&self, markdown: &str, title: Option<&str>) -> String {
        let body = self.render_body(markdown);
        template::document(&body, title, &self.options)
    }

    /// Render only the HTML fragment for `markdown`
    pub fn render_body(&self, markdown: &str) -> String {
        let events: Vec<_> = Parser::new_ext(markdown, self.parser_options())
            .into_offset_iter()
            .collect();
        let events = self.rewrite(markdown, events);

        let mut body = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut body, events.into_iter());
        log::debug!(
            "rendered {} bytes of Markdown into {} bytes of HTML",
            markdown.len(),
            body.len()
        );
        body
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.options.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.options.task_lists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.options.math {
            options.insert(Options::ENABLE_MATH);
        }
        if self.options.metadata_blocks {
            options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        }
        options
    }

    fn rewrite<'a>(
        &self,
        source: &'a str,
        events: Vec<(Event<'a>, Range<usize>)>,
    ) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut events = events.into_iter();

        let mut alignments: Vec<Alignment> = Vec::new();
        let mut in_head = false;
        let mut column = 0;

        while let Some((event, range)) = events.next() {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    out.push(Event::Html(format!("<h{}>", level as usize).into()));
                }
                Event::End(TagEnd::Heading(level)) => {
                    out.push(Event::Html(format!("</h{}>\n", level as usize).into()));
                }
                Event::Start(Tag::Table(table_alignments)) => {
                    alignments = table_alignments.clone();
                    out.push(Event::Start(Tag::Table(table_alignments)));
                }
                Event::Start(Tag::TableHead) => {
                    in_head = true;
                    column = 0;
                    out.push(Event::Start(Tag::TableHead));
                }
                Event::End(TagEnd::TableHead) => {
                    in_head = false;
                    out.push(Event::End(TagEnd::TableHead));
                }
                Event::Start(Tag::TableRow) => {
                    column = 0;
                    out.push(Event::Start(Tag::TableRow));
                }
                Event::Start(Tag::TableCell) => {
                    let alignment = alignments.get(column).copied().unwrap_or(Alignment::None);
                    out.push(Event::Html(open_cell(in_head, alignment).into()));
                }
                Event::End(TagEnd::TableCell) => {
                    let close = if in_head { "</th>" } else { "</td>" };
                    out.push(Event::Html(CowStr::Borrowed(close)));
                    column += 1;
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let mut code = String::new();
                    for (inner, _) in events.by_ref() {
                        match inner {
                            Event::Text(text) => code.push_str(&text),
                            Event::End(TagEnd::CodeBlock) => break,
                            _ => {}
                        }
                    }
                    out.push(Event::Html(self.code_block(&kind, &code).into()));
                }
                Event::InlineMath(_) | Event::DisplayMath(_) => {
                    let error = ConversionError::UnsupportedConstruct("math".to_string());
                    out.push(passthrough(source, range, &error));
                }
                Event::Start(Tag::MetadataBlock(_)) => {
                    for (inner, _) in events.by_ref() {
                        if let Event::End(TagEnd::MetadataBlock(_)) = inner {
                            break;
                        }
                    }
                    let error =
                        ConversionError::UnsupportedConstruct("metadata block".to_string());
                    out.push(Event::Start(Tag::Paragraph));
                    out.push(passthrough(source, range, &error));
                    out.push(Event::End(TagEnd::Paragraph));
                }
                event => out.push(event),
            }
        }

        out
    }

    fn code_block(&self, kind: &CodeBlockKind, code: &str) -> String {
        let mut body = html_escape::encode_text(code).into_owned();
        if self.options.highlight_comments {
            body = highlight_comments(&body, &self.options.comment_class);
        }

        let language = match kind {
            CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
            CodeBlockKind::Indented => "",
        };
        if language.is_empty() {
            format!("<pre><code>{}</code></pre>\n", body)
        } else {
            format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                html_escape::encode_double_quoted_attribute(language),
                body
            )
        }
    }
}

fn open_cell(in_head: bool, alignment: Alignment) -> String {
    let tag = if in_head { "th" } else { "td" };
    match alignment {
        Alignment::None => format!("<{}>", tag),
        Alignment::Left => format!("<{} align=\"left\">", tag),
        Alignment::Center => format!("<{} align=\"center\">", tag),
        Alignment::Right => format!("<{} align=\"right\">", tag),
    }
}

/// Emit the source of a construct we do not render as plain text
fn passthrough<'a>(source: &'a str, range: Range<usize>, error: &ConversionError) -> Event<'a> {
    log::debug!("{}; passing source through as text", error);
    let text = source.get(range).unwrap_or_default().trim_end_matches(['\r', '\n']);
    Event::Text(CowStr::Borrowed(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(markdown: &str) -> String {
        MarkupRenderer::new().render_body(markdown)
    }

    #[test]
    fn test_heading_has_no_attributes() {
        assert_eq!(body("# Hello *World*"), "<h1>Hello <em>World</em></h1>\n");
        assert_eq!(body("### Three"), "<h3>Three</h3>\n");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(body("Hello world."), "<p>Hello world.</p>\n");
    }

    #[test]
    fn test_table_cells() {
        let html = body("| a | b | c |\n|:--|:-:|---|\n| 1 | 2 | 3 |\n");
        assert!(html.contains("<th align=\"left\">a</th><th align=\"center\">b</th><th>c</th>"));
        assert!(html.contains("<td align=\"left\">1</td><td align=\"center\">2</td><td>3</td>"));
        assert!(!html.contains("style="));
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            body("```rust\nlet a = 1 < 2; // check\n```\n"),
            "<pre><code class=\"language-rust\">let a = 1 &lt; 2; // <span class=\"comment\">check</span>\n</code></pre>\n"
        );
    }

    #[test]
    fn test_highlighting_can_be_disabled() {
        let renderer = MarkupRenderer::with_options(RenderOptions {
            highlight_comments: false,
            ..Default::default()
        });
        assert_eq!(
            renderer.render_body("    # not a heading\n"),
            "<pre><code># not a heading\n</code></pre>\n"
        );
    }

    #[test]
    fn test_math_passes_through() {
        assert_eq!(body("Area is $a < b$ here"), "<p>Area is $a &lt; b$ here</p>\n");
    }

    #[test]
    fn test_metadata_passes_through() {
        let html = body("---\ntitle: x\n---\n\n# Doc\n");
        assert!(html.starts_with("<p>---"));
        assert!(html.contains("title: x"));
        assert!(html.ends_with("<h1>Doc</h1>\n"));
    }

    #[test]
    fn test_task_list_and_strikethrough() {
        let html = body("- [x] done\n- [ ] ~~todo~~\n");
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("<del>todo</del>"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        assert_eq!(
            body("<div data-x=\"1\"></div>\n"),
            "<div data-x=\"1\"></div>\n"
        );
    }

    #[test]
    fn test_full_document() {
        let html = MarkupRenderer::new().render("Hi", Some("A <title>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &lt;title&gt;</title>"));
        assert!(html.contains("<p>Hi</p>"));
        assert!(html.contains("data-asset=\"site-toggle/"));
    }
}
