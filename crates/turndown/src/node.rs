//! Owned structured-markup tree used by the converter.
//!
//! Any HTML parser can produce this structure; the `html` feature ships one
//! built on `scraper`. A tree is built per conversion and dropped afterwards.

use std::ops::Deref;

use indexmap::IndexMap;

use crate::utilities::{is_block, is_meaningful_when_blank, is_void};

/// Deepest element nesting the converter accepts. Conversion walks the tree
/// recursively; deeper input is rejected as malformed.
pub const MAX_DEPTH: usize = 512;

/// A child of an element: either a nested element or a run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(StructuredNode),
    Text(String),
}

impl Child {
    pub fn as_element(&self) -> Option<&StructuredNode> {
        match self {
            Child::Element(node) => Some(node),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Element(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Child::Text(text) => text.clone(),
            Child::Element(node) => node.text_content(),
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Child::Text(text) => out.push_str(text),
            Child::Element(node) => node.write_text(out),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Child::Text(text) => out.push_str(&html_escape::encode_text(text)),
            Child::Element(node) => node.write_html(out),
        }
    }
}

impl From<StructuredNode> for Child {
    fn from(node: StructuredNode) -> Self {
        Child::Element(node)
    }
}

/// One structured-markup element.
///
/// Attribute names are stored lowercase and keep their source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredNode {
    /// Tag name (lowercase, e.g. "div")
    pub tag: String,

    /// Attributes in source order
    pub attributes: IndexMap<String, String>,

    /// Child elements and text runs
    pub children: Vec<Child>,

    /// Whether the tag is a block-level element
    pub is_block: bool,
}

impl StructuredNode {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        let tag = tag_name.to_lowercase();
        Self {
            is_block: is_block(&tag),
            tag,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Get the tag name
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.to_lowercase().as_str())
            .map(String::as_str)
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Check if the element carries any attribute at all
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_lowercase(), value.to_string());
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Child> {
        self.children.iter()
    }

    /// Get only element children
    pub fn element_children(&self) -> impl Iterator<Item = &StructuredNode> {
        self.children.iter().filter_map(Child::as_element)
    }

    /// First child of any kind
    pub fn first_child(&self) -> Option<&Child> {
        self.children.first()
    }

    /// Add a child element
    pub fn add_child(&mut self, child: StructuredNode) {
        self.children.push(Child::Element(child));
    }

    /// Add a text run
    pub fn add_text(&mut self, text: &str) {
        self.children.push(Child::Text(text.to_string()));
    }

    /// Builder form of [`add_child`](Self::add_child)
    pub fn with_child(mut self, child: StructuredNode) -> Self {
        self.add_child(child);
        self
    }

    /// Builder form of [`add_text`](Self::add_text)
    pub fn with_text(mut self, text: &str) -> Self {
        self.add_text(text);
        self
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        for child in &self.children {
            child.write_text(out);
        }
    }

    /// The opening tag with all attributes, e.g. `<div data-x="1">`
    pub fn opening_tag(&self) -> String {
        let attrs = self.attributes_string();
        if attrs.is_empty() {
            format!("<{}>", self.tag)
        } else {
            format!("<{} {}>", self.tag, attrs)
        }
    }

    /// Reconstruct outer HTML (for keep rules)
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push_str(&self.opening_tag());
        if self.is_void() {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    /// Get attributes as a string for HTML output
    fn attributes_string(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}=\"{}\"",
                    name,
                    html_escape::encode_double_quoted_attribute(value)
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if this is a void element
    pub fn is_void(&self) -> bool {
        is_void(&self.tag)
    }

    /// Check if this element means something even without content
    pub fn is_meaningful_when_blank(&self) -> bool {
        is_meaningful_when_blank(&self.tag)
    }

    /// An element is blank when it has no text and nothing inside it
    /// carries meaning without text. Descendants with attributes count as
    /// meaningful so the blank rule never swallows them.
    pub fn is_blank(&self) -> bool {
        !self.is_void()
            && !self.is_meaningful_when_blank()
            && self.text_content().trim().is_empty()
            && !self.has_descendant(&|n: &StructuredNode| {
                n.is_void() || n.is_meaningful_when_blank() || n.has_attributes()
            })
    }

    /// Number of element levels below this node, counted without recursion
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.element_children().map(|child| (child, depth + 1)));
        }
        deepest
    }

    fn has_descendant(&self, pred: &dyn Fn(&StructuredNode) -> bool) -> bool {
        self.element_children()
            .any(|child| pred(child) || child.has_descendant(pred))
    }
}

/// A reference to a node with its parent context.
///
/// Rules need to look at the parent (list numbering, table rows) and at
/// siblings (flanking whitespace); the tree itself stores no back pointers.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a StructuredNode,
    parent: Option<&'a StructuredNode>,
    /// Position in `parent.children`
    index: usize,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a StructuredNode) -> Self {
        Self {
            node,
            parent: None,
            index: 0,
        }
    }

    /// Create a new NodeRef for `parent.children[index]`
    pub fn with_parent(node: &'a StructuredNode, parent: &'a StructuredNode, index: usize) -> Self {
        Self {
            node,
            parent: Some(parent),
            index,
        }
    }

    pub fn parent(&self) -> Option<&'a StructuredNode> {
        self.parent
    }

    /// Get the parent tag name if known
    pub fn parent_tag(&self) -> Option<&'a str> {
        self.parent.map(|p| p.tag.as_str())
    }

    pub fn previous_sibling(&self) -> Option<&'a Child> {
        let parent = self.parent?;
        self.index.checked_sub(1).and_then(|i| parent.children.get(i))
    }

    pub fn next_sibling(&self) -> Option<&'a Child> {
        self.parent?.children.get(self.index + 1)
    }

    /// Position among the parent's element children
    pub fn element_index(&self) -> usize {
        match self.parent {
            Some(parent) => parent.children[..self.index]
                .iter()
                .filter(|c| c.as_element().is_some())
                .count(),
            None => 0,
        }
    }

    pub fn is_first_child(&self) -> bool {
        self.parent.is_some() && self.index == 0
    }

    pub fn is_last_element_child(&self) -> bool {
        match self.parent {
            Some(parent) => parent.children[self.index + 1..]
                .iter()
                .all(|c| c.as_element().is_none()),
            None => false,
        }
    }
}

impl Deref for NodeRef<'_> {
    type Target = StructuredNode;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_element() {
        let node = StructuredNode::element("DIV");
        assert_eq!(node.tag_name(), "div");
        assert!(node.is_block);
        assert!(!StructuredNode::element("span").is_block);
    }

    #[test]
    fn test_attributes_keep_order() {
        let node = StructuredNode::element_with_attrs(
            "a",
            vec![("href", "https://example.com"), ("title", "Example")],
        );
        assert_eq!(node.attr("HREF"), Some("https://example.com"));
        assert_eq!(node.attr("class"), None);
        let names: Vec<_> = node.attributes.keys().collect();
        assert_eq!(names, ["href", "title"]);
    }

    #[test]
    fn test_children() {
        let parent = StructuredNode::element("div")
            .with_text("Hello")
            .with_child(StructuredNode::element("span"))
            .with_text("World");

        assert_eq!(parent.children().count(), 3);
        assert_eq!(parent.element_children().count(), 1);
    }

    #[test]
    fn test_text_content() {
        let div = StructuredNode::element("div")
            .with_text("Hello ")
            .with_child(StructuredNode::element("span").with_text("World"));
        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_outer_html_escapes() {
        let a = StructuredNode::element_with_attrs("a", vec![("href", "x?a=1&b=\"2\"")])
            .with_text("1 < 2");
        assert_eq!(
            a.outer_html(),
            "<a href=\"x?a=1&amp;b=&quot;2&quot;\">1 &lt; 2</a>"
        );
    }

    #[test]
    fn test_void_element_html() {
        assert_eq!(StructuredNode::element("br").outer_html(), "<br>");
        let img = StructuredNode::element_with_attrs("img", vec![("src", "test.png"), ("alt", "")]);
        assert_eq!(img.outer_html(), "<img src=\"test.png\" alt=\"\">");
    }

    #[test]
    fn test_blank() {
        assert!(StructuredNode::element("p").with_text("  ").is_blank());
        assert!(!StructuredNode::element("p").with_text("x").is_blank());
        assert!(!StructuredNode::element("td").is_blank());
        assert!(!StructuredNode::element("p")
            .with_child(StructuredNode::element("img"))
            .is_blank());
        assert!(!StructuredNode::element("p")
            .with_child(StructuredNode::element_with_attrs("span", vec![("data-x", "1")]))
            .is_blank());
    }

    #[test]
    fn test_empty_attribute_value_is_written() {
        let div = StructuredNode::element_with_attrs("div", vec![("data-y", "")]);
        assert_eq!(div.outer_html(), "<div data-y=\"\"></div>");
    }

    #[test]
    fn test_depth() {
        assert_eq!(StructuredNode::element("p").depth(), 0);
        let mut node = StructuredNode::element("div").with_text("x");
        for _ in 0..3 {
            node = StructuredNode::element("div").with_child(node);
        }
        let tree = node.with_child(StructuredNode::element("span"));
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_node_ref_siblings() {
        let ol = StructuredNode::element("ol")
            .with_child(StructuredNode::element("li").with_text("a"))
            .with_text(" ")
            .with_child(StructuredNode::element("li").with_text("b"));
        let Child::Element(second) = &ol.children[2] else {
            panic!("expected element");
        };
        let node = NodeRef::with_parent(second, &ol, 2);
        assert_eq!(node.element_index(), 1);
        assert!(node.is_last_element_child());
        assert!(node.next_sibling().is_none());
        assert_eq!(node.previous_sibling().and_then(Child::as_text), Some(" "));
        assert_eq!(node.parent_tag(), Some("ol"));
    }
}
