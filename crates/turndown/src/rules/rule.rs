//! Rule and Filter types for HTML conversion.

use std::fmt;

use turndown_core::ConvertOptions;

use crate::node::NodeRef;

/// Predicate deciding whether a rule applies to a node
pub type PredicateFn = fn(&NodeRef<'_>, &ConvertOptions) -> bool;

/// Replacement function that generates Markdown from a node and the
/// already converted content of its children
pub type ReplacementFn = fn(&NodeRef<'_>, &str, &ConvertOptions) -> String;

/// Rule ordering. Higher values are consulted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(pub i32);

impl Precedence {
    /// Blank nodes, decided before anything else looks at them
    pub const BLANK: Self = Self(400);
    /// Rules registered on top of the defaults
    pub const OVERRIDE: Self = Self(300);
    /// Built-in CommonMark rules
    pub const DEFAULT: Self = Self(200);
    /// Elements preserved as HTML
    pub const KEEP: Self = Self(100);
    /// Elements dropped from the output
    pub const REMOVE: Self = Self(50);
    /// Catch-all
    pub const FALLBACK: Self = Self(0);
}

/// A filter determines which elements a rule applies to
#[derive(Clone)]
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match using a predicate function
    Predicate(PredicateFn),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a filter with a predicate
    pub fn predicate(f: PredicateFn) -> Self {
        Filter::Predicate(f)
    }

    /// Check if this filter matches a node
    pub fn matches(&self, node: &NodeRef, options: &ConvertOptions) -> bool {
        match self {
            Filter::TagName(t) => node.tag == *t,
            Filter::TagNames(tags) => tags.iter().any(|t| node.tag == *t),
            Filter::Predicate(f) => f(node, options),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::TagName(tag) => f.debug_tuple("TagName").field(tag).finish(),
            Filter::TagNames(tags) => f.debug_tuple("TagNames").field(tags).finish(),
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A rule defines how to convert a matched HTML element to Markdown
#[derive(Clone)]
pub struct Rule {
    /// Identifier, unique by convention
    pub name: String,
    /// Filter to determine which elements this rule applies to
    pub filter: Filter,
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
    /// Position in the resolution order
    pub precedence: Precedence,
    /// The replacement reads the node itself; children are not converted
    pub verbatim: bool,
}

impl Rule {
    /// Create a new rule with override precedence
    pub fn new(name: &str, filter: Filter, replacement: ReplacementFn) -> Self {
        Self {
            name: name.to_string(),
            filter,
            replacement,
            precedence: Precedence::OVERRIDE,
            verbatim: false,
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag(name: &str, tag: &str, replacement: ReplacementFn) -> Self {
        Self::new(name, Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags(name: &str, tags: &[&str], replacement: ReplacementFn) -> Self {
        Self::new(name, Filter::tags(tags), replacement)
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Skip converting the children before the replacement runs
    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    /// Check if this rule applies to a node
    pub fn matches(&self, node: &NodeRef, options: &ConvertOptions) -> bool {
        self.filter.matches(node, options)
    }

    /// Apply this rule's replacement
    pub fn replace(&self, node: &NodeRef, content: &str, options: &ConvertOptions) -> String {
        (self.replacement)(node, content, options)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .field("precedence", &self.precedence)
            .field("verbatim", &self.verbatim)
            .finish_non_exhaustive()
    }
}
