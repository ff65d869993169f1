//! Rule system for HTML to Markdown conversion.
//!
//! A [`RuleSet`] is an ordered list of rules. Each node is converted by the
//! first rule whose filter matches, consulting rules by descending
//! [`Precedence`]; within one precedence tier the most recently registered
//! rule is consulted first.

mod commonmark;
mod gfm;
mod policy;
mod rule;

pub use commonmark::commonmark_rules;
pub use gfm::{gfm, strikethrough, tables, task_list_items};
pub use rule::{Filter, Precedence, PredicateFn, ReplacementFn, Rule};

use turndown_core::{ConversionError, ConvertOptions, Result};

use crate::node::NodeRef;

/// Collection of rules for conversion
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Sorted by descending precedence, newest first within a tier
    rules: Vec<Rule>,
}

impl RuleSet {
    /// A rule set without any rules, not even the fallback
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Blank-node policy, CommonMark rules and the fallback
    pub fn commonmark() -> Self {
        let mut rules = Self::empty();
        rules.register(policy::blank_rule());
        rules.register(policy::fallback_rule());
        for rule in commonmark_rules() {
            rules.register(rule);
        }
        rules
    }

    /// The complete default set: CommonMark plus the GFM extensions,
    /// attribute-preserving wrappers and `<script>` removal
    pub fn new() -> Self {
        let mut rules = Self::commonmark();
        gfm(&mut rules);
        rules.register(policy::preserve_attributes_rule());
        rules.remove("script", Filter::tag("script"));
        rules
    }

    /// Add a rule at its precedence tier, ahead of the rules already there
    pub fn register(&mut self, rule: Rule) {
        let position = self
            .rules
            .iter()
            .position(|existing| existing.precedence <= rule.precedence)
            .unwrap_or(self.rules.len());
        self.rules.insert(position, rule);
    }

    /// Emit matching elements as their original HTML
    pub fn keep(&mut self, name: &str, filter: Filter) {
        self.register(
            Rule::new(name, filter, |node, _, _| policy::keep_replacement(node))
                .with_precedence(Precedence::KEEP)
                .verbatim(),
        );
    }

    /// Drop matching elements and everything inside them
    pub fn remove(&mut self, name: &str, filter: Filter) {
        self.register(
            Rule::new(name, filter, |_, _, _| String::new())
                .with_precedence(Precedence::REMOVE)
                .verbatim(),
        );
    }

    /// Find the rule that converts `node`
    pub fn resolve(&self, node: &NodeRef, options: &ConvertOptions) -> Result<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(node, options))
            .ok_or_else(|| ConversionError::NoRuleMatched {
                tag: node.tag.clone(),
            })
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Rule names in resolution order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::StructuredNode;

    fn resolve_name(rules: &RuleSet, node: &StructuredNode) -> String {
        let options = ConvertOptions::default();
        let body = StructuredNode::element("body").with_child(node.clone());
        let child = body.element_children().next().unwrap();
        let node = NodeRef::with_parent(child, &body, 0);
        rules.resolve(&node, &options).unwrap().name.clone()
    }

    #[test]
    fn test_empty_set_reports_no_rule() {
        let rules = RuleSet::empty();
        let node = StructuredNode::element("p");
        let err = rules
            .resolve(&NodeRef::new(&node), &ConvertOptions::default())
            .unwrap_err();
        assert_eq!(err, ConversionError::NoRuleMatched { tag: "p".into() });
    }

    #[test]
    fn test_blank_rule_goes_first() {
        let rules = RuleSet::new();
        let p = StructuredNode::element("p").with_text(" ");
        assert_eq!(resolve_name(&rules, &p), "blank");
    }

    #[test]
    fn test_unknown_element_hits_fallback() {
        let rules = RuleSet::new();
        let node = StructuredNode::element("section").with_text("x");
        assert_eq!(resolve_name(&rules, &node), "fallback");
    }

    #[test]
    fn test_override_beats_default() {
        let mut rules = RuleSet::new();
        rules.register(Rule::for_tag("shout", "p", |_, content, _| {
            content.to_uppercase()
        }));
        let p = StructuredNode::element("p").with_text("x");
        assert_eq!(resolve_name(&rules, &p), "shout");
    }

    #[test]
    fn test_last_registered_wins_within_tier() {
        let mut rules = RuleSet::commonmark();
        rules.register(Rule::for_tag("first", "em", |_, c, _| c.to_string()));
        rules.register(Rule::for_tag("second", "em", |_, c, _| c.to_string()));
        let em = StructuredNode::element("em").with_text("x");
        assert_eq!(resolve_name(&rules, &em), "second");
    }

    #[test]
    fn test_default_beats_keep_and_remove() {
        let mut rules = RuleSet::commonmark();
        rules.keep("keep-em", Filter::tag("em"));
        rules.remove("remove-em", Filter::tag("em"));
        let em = StructuredNode::element("em").with_text("x");
        assert_eq!(resolve_name(&rules, &em), "emphasis");

        rules.keep("keep-mark", Filter::tag("mark"));
        rules.remove("remove-mark", Filter::tag("mark"));
        let mark = StructuredNode::element("mark").with_text("x");
        assert_eq!(resolve_name(&rules, &mark), "keep-mark");
    }

    #[test]
    fn test_tiers_are_ordered() {
        let rules = RuleSet::new();
        let names: Vec<_> = rules.names().collect();
        assert_eq!(names.first(), Some(&"blank"));
        assert_eq!(names.last(), Some(&"fallback"));
        assert!(rules.get("tableWithoutHeading").is_some());
        assert!(rules.get("script").is_some());
    }
}
