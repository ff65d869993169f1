//! GitHub Flavored Markdown extensions: pipe tables, strikethrough and
//! task list items.
//!
//! Each extension is a plugin, a function that registers its rules on a
//! [`RuleSet`]; [`gfm`] applies all of them.

use super::{Filter, Rule, RuleSet};
use crate::node::{Child, NodeRef, StructuredNode};

/// Apply every GFM extension
pub fn gfm(rules: &mut RuleSet) {
    tables(rules);
    strikethrough(rules);
    task_list_items(rules);
}

/// Tables whose first row is a heading row become pipe tables; all other
/// tables are kept as HTML.
pub fn tables(rules: &mut RuleSet) {
    rules.keep(
        "tableWithoutHeading",
        Filter::predicate(|node, _| node.tag == "table" && !has_heading_row(node)),
    );
    rules.register(Rule::for_tags(
        "tableSection",
        &["thead", "tbody", "tfoot"],
        |_, content, _| content.to_string(),
    ));
    rules.register(Rule::new(
        "table",
        Filter::predicate(|node, _| node.tag == "table" && has_heading_row(node)),
        |_, content, _| {
            // the first row is separated from the heading by its section
            format!("\n\n{}\n\n", content.replacen("\n\n", "\n", 1))
        },
    ));
    rules.register(Rule::for_tag("tableRow", "tr", |node, content, _| {
        let mut row = format!("\n{}", content);
        if is_heading_row(node) {
            row.push('\n');
            for (index, cell) in node.element_children().enumerate() {
                let border = match cell.attr("align").map(str::to_lowercase).as_deref() {
                    Some("left") => ":--",
                    Some("right") => "--:",
                    Some("center") => ":-:",
                    _ => "---",
                };
                row.push_str(&cell_text(border, index));
            }
        }
        row
    }));
    rules.register(Rule::for_tags("tableCell", &["th", "td"], |node, content, _| {
        let content = content.replace('\n', " ").replace('|', "\\|");
        cell_text(&content, node.element_index())
    }));
}

/// `<del>`, `<s>` and `<strike>` become `~~text~~`
pub fn strikethrough(rules: &mut RuleSet) {
    rules.register(Rule::for_tags(
        "strikethrough",
        &["del", "s", "strike"],
        |_, content, _| format!("~~{}~~", content),
    ));
}

/// Checkboxes opening a list item become `[x]` / `[ ]`
pub fn task_list_items(rules: &mut RuleSet) {
    rules.register(Rule::new(
        "taskListItems",
        Filter::predicate(|node, _| {
            node.tag == "input"
                && node.attr("type") == Some("checkbox")
                && matches!(node.parent_tag(), Some("li") | Some("p"))
        }),
        |node, _, _| {
            let mark = if node.has_attr("checked") { "[x]" } else { "[ ]" };
            let spaced = matches!(
                node.next_sibling(),
                Some(Child::Text(text)) if text.starts_with(char::is_whitespace)
            );
            if spaced {
                mark.to_string()
            } else {
                format!("{} ", mark)
            }
        },
    ));
}

fn cell_text(content: &str, index: usize) -> String {
    let prefix = if index == 0 { "| " } else { " " };
    format!("{}{} |", prefix, content)
}

/// A row heads its table when it sits in `<thead>`, or opens the table (or
/// its body) and holds only `<th>` cells.
fn is_heading_row(row: &NodeRef) -> bool {
    match row.parent_tag() {
        Some("thead") => true,
        Some("table") | Some("tbody") => {
            row.is_first_child()
                && row.element_children().next().is_some()
                && row.element_children().all(|cell| cell.tag == "th")
        }
        _ => false,
    }
}

fn has_heading_row(table: &StructuredNode) -> bool {
    first_row(table).is_some_and(|row| is_heading_row(&row))
}

/// First `<tr>` of a table, directly inside it or inside a section
fn first_row(table: &StructuredNode) -> Option<NodeRef<'_>> {
    for (index, child) in table.children.iter().enumerate() {
        let Child::Element(element) = child else {
            continue;
        };
        match element.tag.as_str() {
            "tr" => return Some(NodeRef::with_parent(element, table, index)),
            "thead" | "tbody" | "tfoot" => {
                let row = element
                    .children
                    .iter()
                    .enumerate()
                    .find_map(|(i, c)| match c {
                        Child::Element(tr) if tr.tag == "tr" => {
                            Some(NodeRef::with_parent(tr, element, i))
                        }
                        _ => None,
                    });
                if row.is_some() {
                    return row;
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(head: StructuredNode) -> StructuredNode {
        StructuredNode::element("table").with_child(
            head.with_child(
                StructuredNode::element("tr")
                    .with_child(StructuredNode::element("th").with_text("A")),
            ),
        )
    }

    #[test]
    fn test_heading_row_detection() {
        assert!(has_heading_row(&table(StructuredNode::element("thead"))));
        assert!(has_heading_row(&table(StructuredNode::element("tbody"))));

        let no_heading = StructuredNode::element("table").with_child(
            StructuredNode::element("tbody").with_child(
                StructuredNode::element("tr")
                    .with_child(StructuredNode::element("td").with_text("A")),
            ),
        );
        assert!(!has_heading_row(&no_heading));
        assert!(!has_heading_row(&StructuredNode::element("table")));
    }

    #[test]
    fn test_cell_prefix() {
        assert_eq!(cell_text("a", 0), "| a |");
        assert_eq!(cell_text("b", 1), " b |");
    }

    #[test]
    fn test_plugins_register_rules() {
        let mut rules = RuleSet::commonmark();
        let before = rules.len();
        gfm(&mut rules);
        assert_eq!(rules.len(), before + 7);
        assert!(rules.get("taskListItems").is_some());
    }
}
