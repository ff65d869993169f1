//! Comment highlighting for code blocks.
//!
//! Works on already HTML-escaped code, so the markup comment delimiters are
//! matched in their escaped form. Recognized idioms are `// line`,
//! `# line`, `/* block */` and `<!-- markup -->`. Only the comment body is
//! wrapped; delimiters stay outside the span.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s:/\*(?P<block>.*?)\*/)",
        r"|(?s:&lt;!--(?P<markup>.*?)--&gt;)",
        r"|(?m:(?P<lead>^|[ \t])(?P<marker>//|#)(?P<gap>[ \t]*)(?P<line>[^\r\n]*))",
    ))
    .unwrap()
});

/// Wrap the body of every comment in `code` in `<span class="{class}">`
pub fn highlight_comments(code: &str, class: &str) -> String {
    COMMENT
        .replace_all(code, |caps: &Captures| {
            let span = |body: &str| {
                if body.is_empty() {
                    String::new()
                } else {
                    format!("<span class=\"{}\">{}</span>", class, body)
                }
            };

            if let Some(body) = caps.name("block") {
                format!("/*{}*/", span(body.as_str()))
            } else if let Some(body) = caps.name("markup") {
                format!("&lt;!--{}--&gt;", span(body.as_str()))
            } else {
                let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
                format!(
                    "{}{}{}{}",
                    group("lead"),
                    group("marker"),
                    group("gap"),
                    span(group("line"))
                )
            }
        })
        .into_owned()
}
