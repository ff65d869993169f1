//! TurndownService - the main entry point for HTML to Markdown conversion.

use once_cell::sync::Lazy;
use regex::Regex;
use turndown_core::{ConversionError, ConvertOptions, Result};

use crate::node::{Child, NodeRef, StructuredNode, MAX_DEPTH};
use crate::rules::{Filter, Rule, RuleSet};
use crate::utilities::{escape_markdown, join_into};
use crate::whitespace::collapse_whitespace;

static BLANK_LINE_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)(\n\s+$)+").unwrap());

/// The main service for converting HTML to Markdown.
///
/// A service is configured once and then only read, so one instance can be
/// shared by reference between threads.
#[derive(Debug, Clone)]
pub struct TurndownService {
    options: ConvertOptions,
    rules: RuleSet,
}

impl TurndownService {
    /// Create a new TurndownService with default options
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    /// Create a TurndownService with custom options
    pub fn with_options(options: ConvertOptions) -> Self {
        Self::with_rules(options, RuleSet::new())
    }

    /// Create a TurndownService with custom options and rules
    pub fn with_rules(options: ConvertOptions, rules: RuleSet) -> Self {
        Self { options, rules }
    }

    /// Convert an HTML string to Markdown
    #[cfg(feature = "html")]
    pub fn convert(&self, html: &str) -> Result<String> {
        let mut body = crate::html::parse_html_with(html, self.options.strict)?;
        collapse_whitespace(&mut body);
        let markdown = self.process(&body)?;
        log::debug!(
            "converted {} bytes of HTML into {} bytes of Markdown",
            html.len(),
            markdown.len()
        );
        Ok(self.post_process(&markdown))
    }

    /// Convert the children of an already parsed node to Markdown
    pub fn convert_node(&self, node: &StructuredNode) -> Result<String> {
        if node.depth() > MAX_DEPTH {
            return Err(ConversionError::MalformedInput(format!(
                "elements nested deeper than {} levels",
                MAX_DEPTH
            )));
        }
        let mut root = node.clone();
        collapse_whitespace(&mut root);
        let markdown = self.process(&root)?;
        Ok(self.post_process(&markdown))
    }

    /// Register a rule on top of the defaults
    pub fn add_rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.register(rule);
        self
    }

    /// Keep elements matching the filter as HTML
    pub fn keep(&mut self, name: &str, filter: Filter) -> &mut Self {
        self.rules.keep(name, filter);
        self
    }

    /// Remove elements matching the filter
    pub fn remove(&mut self, name: &str, filter: Filter) -> &mut Self {
        self.rules.remove(name, filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut RuleSet),
    {
        plugin(&mut self.rules);
        self
    }

    /// Escape markdown special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text)
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get the rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Convert and join the children of `parent`
    fn process(&self, parent: &StructuredNode) -> Result<String> {
        let mut output = String::new();

        for (index, child) in parent.children.iter().enumerate() {
            let replacement = match child {
                Child::Text(text) => escape_markdown(text),
                Child::Element(element) => {
                    self.replacement_for_node(&NodeRef::with_parent(element, parent, index))?
                }
            };
            join_into(&mut output, &replacement);
        }

        Ok(output)
    }

    fn replacement_for_node(&self, node: &NodeRef) -> Result<String> {
        let rule = self.rules.resolve(node, &self.options)?;
        log::trace!("<{}> -> {}", node.tag, rule.name);

        if rule.verbatim {
            return Ok(rule.replace(node, "", &self.options));
        }

        let mut content = self.process(node)?;
        let (leading, trailing) = flanking_whitespace(node);
        if !leading.is_empty() || !trailing.is_empty() {
            content = content.trim().to_string();
        }

        Ok(format!(
            "{}{}{}",
            leading,
            rule.replace(node, &content, &self.options),
            trailing
        ))
    }

    /// Post-process the result
    fn post_process(&self, output: &str) -> String {
        let trimmed = output
            .trim_start_matches(['\t', '\r', '\n'])
            .trim_end();
        let mut result = BLANK_LINE_TAIL.replace_all(trimmed, "\n").into_owned();
        result.push('\n');
        self.options.line_ending.apply(&result)
    }
}

impl Default for TurndownService {
    fn default() -> Self {
        Self::new()
    }
}

/// Whitespace at the edges of an inline element, to be emitted outside its
/// delimiters. Dropped on a side where the sibling already supplies a space.
fn flanking_whitespace(node: &NodeRef) -> (&'static str, &'static str) {
    if node.is_block {
        return ("", "");
    }

    let text = node.text_content();
    let mut leading = if text.starts_with(is_ascii_space) { " " } else { "" };
    let mut trailing = if text.ends_with(is_ascii_space) { " " } else { "" };

    if sibling_touches(node.previous_sibling(), |s| s.ends_with(is_ascii_space)) {
        leading = "";
    }
    if sibling_touches(node.next_sibling(), |s| s.starts_with(is_ascii_space)) {
        trailing = "";
    }

    (leading, trailing)
}

fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn sibling_touches(sibling: Option<&Child>, test: impl Fn(&str) -> bool) -> bool {
    match sibling {
        Some(Child::Text(text)) => test(text),
        Some(Child::Element(element)) if !element.is_block => test(&element.text_content()),
        _ => false,
    }
}
