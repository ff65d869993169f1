//! CommonMark rules for HTML to Markdown conversion.

use turndown_core::{CodeBlockStyle, HeadingStyle};

use super::{Filter, Precedence, Rule};
use crate::node::{Child, NodeRef, StructuredNode};
use crate::utilities::{clean_attribute, repeat};

/// Create all CommonMark rules
pub fn commonmark_rules() -> Vec<Rule> {
    vec![
        paragraph_rule(),
        line_break_rule(),
        heading_rule(),
        blockquote_rule(),
        list_rule(),
        list_item_rule(),
        indented_code_block_rule(),
        fenced_code_block_rule(),
        horizontal_rule(),
        inline_link_rule(),
        emphasis_rule(),
        strong_rule(),
        code_rule(),
        image_rule(),
    ]
    .into_iter()
    .map(|rule| rule.with_precedence(Precedence::DEFAULT))
    .collect()
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("paragraph", "p", |_, content, _| {
        format!("\n\n{}\n\n", content.trim())
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tag("lineBreak", "br", |_, _, _| "  \n".to_string())
}

fn heading_rule() -> Rule {
    Rule::for_tags(
        "heading",
        &["h1", "h2", "h3", "h4", "h5", "h6"],
        |node, content, options| {
            let level: usize = node.tag[1..].parse().unwrap_or(1);
            let content = content.trim();

            match options.heading_style {
                HeadingStyle::Setext if level <= 2 => {
                    let underline = if level == 1 { "=" } else { "-" };
                    format!(
                        "\n\n{}\n{}\n\n",
                        content,
                        repeat(underline, content.chars().count())
                    )
                }
                _ => format!("\n\n{} {}\n\n", repeat("#", level), content),
            }
        },
    )
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", "blockquote", |_, content, _| {
        let quoted: Vec<String> = content
            .trim_matches('\n')
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    })
}

fn list_rule() -> Rule {
    Rule::for_tags("list", &["ul", "ol"], |node, content, _| {
        // a list closing a list item continues that item
        if node.parent_tag() == Some("li") && node.is_last_element_child() {
            format!("\n{}", content)
        } else {
            format!("\n\n{}\n\n", content)
        }
    })
}

fn list_item_rule() -> Rule {
    Rule::for_tag("listItem", "li", |node, content, options| {
        let prefix = match node.parent() {
            Some(parent) if parent.tag == "ol" => {
                let start: usize = parent
                    .attr("start")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(1);
                format!("{}. ", start.saturating_add(node.element_index()))
            }
            _ => format!("{} ", options.bullet_list_marker),
        };

        let body = content.trim_start_matches('\n');
        let trimmed = body.trim_end_matches('\n');
        let is_loose = trimmed.len() < body.len();

        let mut item = prefix;
        for (i, line) in trimmed.split('\n').enumerate() {
            if i > 0 {
                item.push('\n');
                if !line.is_empty() {
                    item.push_str("    ");
                }
            }
            item.push_str(line);
        }
        if is_loose {
            item.push('\n');
        }
        if node.next_sibling().is_some() {
            item.push('\n');
        }
        item
    })
}

/// The `<code>` element a `<pre>` wraps directly
fn code_block_child<'a>(node: &NodeRef<'a>) -> Option<&'a StructuredNode> {
    if node.tag != "pre" {
        return None;
    }
    match node.node.first_child()? {
        Child::Element(code) if code.tag == "code" => Some(code),
        _ => None,
    }
}

fn indented_code_block_rule() -> Rule {
    Rule::new(
        "indentedCodeBlock",
        Filter::predicate(|node, options| {
            options.code_block_style == CodeBlockStyle::Indented
                && code_block_child(node).is_some()
        }),
        |node, _, _| {
            let code = code_block_child(node)
                .map(|c| c.text_content())
                .unwrap_or_default();
            let indented: Vec<String> = code
                .trim_end_matches('\n')
                .split('\n')
                .map(|line| format!("    {}", line))
                .collect();
            format!("\n\n{}\n\n", indented.join("\n"))
        },
    )
    .verbatim()
}

fn fenced_code_block_rule() -> Rule {
    Rule::new(
        "fencedCodeBlock",
        Filter::predicate(|node, options| {
            options.code_block_style == CodeBlockStyle::Fenced
                && code_block_child(node).is_some()
        }),
        |node, _, options| {
            let Some(code_node) = code_block_child(node) else {
                return String::new();
            };
            let code = code_node.text_content();

            let language = code_node
                .attr("class")
                .unwrap_or("")
                .split_whitespace()
                .find_map(|class| class.strip_prefix("language-"))
                .unwrap_or("");

            let fence_char = options.fence.chars().next().unwrap_or('`');
            let fence_size = code
                .lines()
                .map(|line| line.chars().take_while(|c| *c == fence_char).count())
                .filter(|run| *run >= 3)
                .map(|run| run + 1)
                .fold(options.fence.chars().count().max(3), usize::max);
            let fence = fence_char.to_string().repeat(fence_size);

            format!(
                "\n\n{}{}\n{}\n{}\n\n",
                fence,
                language,
                code.strip_suffix('\n').unwrap_or(&code),
                fence
            )
        },
    )
    .verbatim()
}

fn horizontal_rule() -> Rule {
    Rule::for_tag("horizontalRule", "hr", |_, _, options| {
        format!("\n\n{}\n\n", options.hr)
    })
}

fn inline_link_rule() -> Rule {
    Rule::new(
        "inlineLink",
        Filter::predicate(|node, _| {
            node.tag == "a" && node.attr("href").is_some_and(|href| !href.is_empty())
        }),
        |node, content, _| {
            let href = node
                .attr("href")
                .unwrap_or("")
                .replace('(', "\\(")
                .replace(')', "\\)");
            let title = clean_attribute(node.attr("title"));
            let title_part = if title.is_empty() {
                String::new()
            } else {
                format!(" \"{}\"", title.replace('"', "\\\""))
            };

            format!("[{}]({}{})", content, href, title_part)
        },
    )
}

fn emphasis_rule() -> Rule {
    Rule::for_tags("emphasis", &["em", "i"], |_, content, options| {
        if content.trim().is_empty() {
            return String::new();
        }
        let delimiter = options.em_delimiter;
        format!("{}{}{}", delimiter, content, delimiter)
    })
}

fn strong_rule() -> Rule {
    Rule::for_tags("strong", &["strong", "b"], |_, content, options| {
        if content.trim().is_empty() {
            return String::new();
        }
        let delimiter = &options.strong_delimiter;
        format!("{}{}{}", delimiter, content, delimiter)
    })
}

fn code_rule() -> Rule {
    Rule::new(
        "code",
        Filter::predicate(|node, _| {
            if node.tag != "code" {
                return false;
            }
            // the sole child of a <pre> is a code block, not inline code
            let is_code_block = node.parent_tag() == Some("pre")
                && node.previous_sibling().is_none()
                && node.next_sibling().is_none();
            !is_code_block
        }),
        |node, _, _| {
            let content = node.text_content().replace("\r\n", " ").replace(['\r', '\n'], " ");
            if content.is_empty() {
                return String::new();
            }

            let longest_run = content
                .split(|c| c != '`')
                .map(str::len)
                .max()
                .unwrap_or(0);
            let mut delimiter = "`".to_string();
            // a delimiter must not equal any backtick run inside the code
            while content
                .split(|c| c != '`')
                .any(|run| run.len() == delimiter.len())
                && delimiter.len() <= longest_run
            {
                delimiter.push('`');
            }

            let padded = content.starts_with('`')
                || content.ends_with('`')
                || (content.starts_with(' ')
                    && content.ends_with(' ')
                    && content.trim() != "");
            let extra_space = if padded { " " } else { "" };

            format!("{0}{1}{2}{1}{0}", delimiter, extra_space, content)
        },
    )
    .verbatim()
}

fn image_rule() -> Rule {
    Rule::for_tag("image", "img", |node, _, _| {
        let alt = clean_attribute(node.attr("alt"));
        let src = clean_attribute(node.attr("src"));
        let title = clean_attribute(node.attr("title"));

        if src.is_empty() {
            return String::new();
        }

        let title_part = if title.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", title)
        };

        format!("![{}]({}{})", alt, src, title_part)
    })
}
