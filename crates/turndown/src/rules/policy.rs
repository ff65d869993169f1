//! Default handling for nodes no specific rule claims: blank elements,
//! unknown elements and elements whose attributes must survive.

use super::{Filter, Precedence, Rule};
use crate::node::StructuredNode;

/// Blank elements vanish, unless their attributes carry information
pub(super) fn blank_rule() -> Rule {
    Rule::new(
        "blank",
        Filter::predicate(|node, _| node.is_blank()),
        |node, _, _| {
            if node.has_attributes() {
                node.outer_html()
            } else if node.is_block {
                "\n\n".to_string()
            } else {
                String::new()
            }
        },
    )
    .with_precedence(Precedence::BLANK)
    .verbatim()
}

/// Catch-all for elements no other rule converts
pub(super) fn fallback_rule() -> Rule {
    Rule::new(
        "fallback",
        Filter::predicate(|_, _| true),
        |node, content, _| {
            if node.has_attributes() {
                wrap(node, content)
            } else if node.is_block {
                format!("\n\n{}\n\n", content)
            } else {
                content.to_string()
            }
        },
    )
    .with_precedence(Precedence::FALLBACK)
}

/// `span`, `p` and `div` with attributes keep their wrapper
pub(super) fn preserve_attributes_rule() -> Rule {
    Rule::new(
        "preserveAttributes",
        Filter::predicate(|node, _| {
            matches!(node.tag.as_str(), "span" | "p" | "div") && node.has_attributes()
        }),
        |node, content, _| wrap(node, content),
    )
}

pub(super) fn keep_replacement(node: &StructuredNode) -> String {
    let html = node.outer_html();
    if node.is_block {
        format!("\n\n{}\n\n", html)
    } else {
        html
    }
}

/// Original opening and closing tags around converted content
fn wrap(node: &StructuredNode, content: &str) -> String {
    if node.is_void() {
        return node.outer_html();
    }
    let html = format!("{}{}</{}>", node.opening_tag(), content, node.tag);
    if node.is_block {
        format!("\n\n{}\n\n", html)
    } else {
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeRef;
    use turndown_core::ConvertOptions;

    fn apply(rule: &Rule, node: &StructuredNode, content: &str) -> String {
        rule.replace(&NodeRef::new(node), content, &ConvertOptions::default())
    }

    #[test]
    fn test_blank_with_attributes_is_verbatim() {
        let div = StructuredNode::element_with_attrs("div", vec![("data-x", "1")]);
        assert_eq!(apply(&blank_rule(), &div, ""), "<div data-x=\"1\"></div>");
    }

    #[test]
    fn test_blank_block_and_inline() {
        assert_eq!(apply(&blank_rule(), &StructuredNode::element("div"), ""), "\n\n");
        assert_eq!(apply(&blank_rule(), &StructuredNode::element("span"), ""), "");
    }

    #[test]
    fn test_fallback_wraps_attributes() {
        let div = StructuredNode::element_with_attrs("div", vec![("data-x", "1")]);
        assert_eq!(
            apply(&fallback_rule(), &div, "text"),
            "\n\n<div data-x=\"1\">text</div>\n\n"
        );
        let span = StructuredNode::element_with_attrs("span", vec![("class", "k")]);
        assert_eq!(
            apply(&preserve_attributes_rule(), &span, "_x_"),
            "<span class=\"k\">_x_</span>"
        );
    }

    #[test]
    fn test_fallback_plain() {
        let section = StructuredNode::element("section");
        assert_eq!(apply(&fallback_rule(), &section, "x"), "\n\nx\n\n");
        let mark = StructuredNode::element("mark");
        assert_eq!(apply(&fallback_rule(), &mark, "x"), "x");
    }
}
