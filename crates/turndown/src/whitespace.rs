//! Whitespace collapsing for parsed trees.
//!
//! HTML ignores most source whitespace; Markdown does not. Before conversion
//! every run of ASCII whitespace in text becomes a single space, whitespace
//! touching a block boundary is dropped, and text runs left empty are removed.
//! `<pre>` subtrees are left alone.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::{Child, StructuredNode};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \r\n\t]+").unwrap());

/// Collapse whitespace below `root` in place.
///
/// Two passes: the first walks the tree in document order and decides the
/// final text of every run (it may need to trim a run it already passed), the
/// second writes the results back and drops emptied runs.
pub fn collapse_whitespace(root: &mut StructuredNode) {
    let mut collapser = Collapser::default();
    collapser.visit_children(root);
    collapser.trim_previous();

    let mut texts = collapser.texts.into_iter();
    apply(root, &mut texts);
}

#[derive(Default)]
struct Collapser {
    /// Final text of each visited run, in document order
    texts: Vec<String>,
    /// Last non-empty run, as an index into `texts`
    previous: Option<usize>,
    keep_leading_ws: bool,
}

impl Collapser {
    fn visit_children(&mut self, node: &StructuredNode) {
        for child in &node.children {
            match child {
                Child::Text(text) => self.text(text),
                Child::Element(element) => self.element(element),
            }
        }
    }

    fn element(&mut self, element: &StructuredNode) {
        self.boundary(element);
        if is_pre(element) || element.children.is_empty() {
            return;
        }
        self.visit_children(element);
        // leaving the element is a boundary too
        self.boundary(element);
    }

    fn boundary(&mut self, element: &StructuredNode) {
        if element.is_block || element.tag == "br" {
            self.trim_previous();
            self.previous = None;
            self.keep_leading_ws = false;
        } else if element.is_void() || is_pre(element) {
            self.previous = None;
            self.keep_leading_ws = true;
        } else if self.previous.is_some() {
            self.keep_leading_ws = false;
        }
    }

    fn text(&mut self, raw: &str) {
        let mut text = WHITESPACE_RUN.replace_all(raw, " ").into_owned();

        let after_space = match self.previous {
            Some(i) => self.texts[i].ends_with(' '),
            None => true,
        };
        if after_space && !self.keep_leading_ws && text.starts_with(' ') {
            text.remove(0);
        }

        let empty = text.is_empty();
        self.texts.push(text);
        if !empty {
            self.previous = Some(self.texts.len() - 1);
        }
    }

    fn trim_previous(&mut self) {
        if let Some(i) = self.previous {
            if self.texts[i].ends_with(' ') {
                self.texts[i].pop();
            }
        }
    }
}

fn is_pre(node: &StructuredNode) -> bool {
    node.tag == "pre"
}

/// Mirror of the visiting order in [`Collapser`]
fn apply(node: &mut StructuredNode, texts: &mut std::vec::IntoIter<String>) {
    for child in node.children.iter_mut() {
        match child {
            Child::Text(text) => {
                if let Some(collapsed) = texts.next() {
                    *text = collapsed;
                }
            }
            Child::Element(element) => {
                if !is_pre(element) {
                    apply(element, texts);
                }
            }
        }
    }
    node.children
        .retain(|child| !matches!(child, Child::Text(text) if text.is_empty()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapsed(mut node: StructuredNode) -> StructuredNode {
        collapse_whitespace(&mut node);
        node
    }

    #[test]
    fn test_drops_whitespace_between_blocks() {
        let body = StructuredNode::element("body")
            .with_text("\n")
            .with_child(StructuredNode::element("p").with_text("  Hello \n world  "))
            .with_text("\n  ");
        let body = collapsed(body);
        assert_eq!(body.children.len(), 1);
        assert_eq!(body.text_content(), "Hello world");
    }

    #[test]
    fn test_keeps_space_between_inlines() {
        let p = StructuredNode::element("p")
            .with_text("Hello ")
            .with_child(StructuredNode::element("em").with_text(" world"))
            .with_text(" !");
        let p = collapsed(StructuredNode::element("body").with_child(p));
        assert_eq!(p.text_content(), "Hello world !");
    }

    #[test]
    fn test_pre_is_untouched() {
        let pre = StructuredNode::element("pre")
            .with_child(StructuredNode::element("code").with_text("a\n    b\n"));
        let body = collapsed(StructuredNode::element("body").with_child(pre));
        assert_eq!(body.text_content(), "a\n    b\n");
    }

    #[test]
    fn test_space_after_void_is_kept() {
        let li = StructuredNode::element("li")
            .with_child(StructuredNode::element_with_attrs("input", vec![("type", "checkbox")]))
            .with_text("\ntask");
        let body = collapsed(StructuredNode::element("body").with_child(li));
        assert_eq!(body.text_content(), " task");
    }
}
