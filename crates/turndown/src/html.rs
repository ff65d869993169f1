//! HTML parsing support.
//!
//! This module parses HTML strings with `scraper` and converts the `<body>`
//! into the owned [`StructuredNode`] tree used by the converter.

use scraper::{ElementRef, Html, Node as ScraperNode};
use turndown_core::{ConversionError, Result};

use crate::node::{StructuredNode, MAX_DEPTH};

/// Parse an HTML string into a node tree rooted at `<body>`.
///
/// Fragments are accepted; the parser places them inside an implied body.
///
/// # Example
///
/// ```rust
/// use turndown::{parse_html, TurndownService};
///
/// let body = parse_html("<h1>Hello <em>World</em></h1>").unwrap();
/// assert_eq!(body.tag_name(), "body");
///
/// let service = TurndownService::new();
/// let markdown = service.convert_node(&body).unwrap();
/// assert_eq!(markdown, "# Hello _World_\n");
/// ```
pub fn parse_html(html: &str) -> Result<StructuredNode> {
    parse_html_with(html, false)
}

/// Parse an HTML string, optionally rejecting any input the parser had to
/// repair.
pub fn parse_html_with(html: &str, strict: bool) -> Result<StructuredNode> {
    if html.contains('\0') {
        return Err(ConversionError::MalformedInput(
            "input contains NUL characters".to_string(),
        ));
    }

    let document = Html::parse_document(html);

    if strict {
        if let Some(error) = document.errors.first() {
            return Err(ConversionError::MalformedInput(error.to_string()));
        }
    }

    let body = document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "body")
        .ok_or_else(|| ConversionError::MalformedInput("document has no body".to_string()))?;

    log::trace!("parsed {} bytes of HTML", html.len());
    scraper_to_node(body, 0)
}

/// Convert a scraper ElementRef to our node structure
fn scraper_to_node(element: ElementRef, depth: usize) -> Result<StructuredNode> {
    if depth > MAX_DEPTH {
        return Err(ConversionError::MalformedInput(format!(
            "elements nested deeper than {} levels",
            MAX_DEPTH
        )));
    }

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = StructuredNode::element_with_attrs(element.value().name(), attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_text(&text.text);
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element, depth + 1)?);
                }
            }
            // comments, doctypes and processing instructions carry no content
            _ => {}
        }
    }

    Ok(node)
}
