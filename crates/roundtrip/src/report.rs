//! Human-readable HTML rendering of a fidelity report.

use crate::check::FidelityReport;
use crate::diff::{DiffKind, DiffReport};

const ADDED_BACKGROUND: &str = "lawngreen";
const REMOVED_BACKGROUND: &str = "salmon";

impl FidelityReport {
    /// Render the report as a standalone HTML page
    pub fn to_html(&self, title: &str) -> String {
        let title = html_escape::encode_text(title);
        format!(
            r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title} &mdash; diff report</title>
    <style type="text/css">
      body {{
        font-family: 'Calibri', sans-serif;
        max-width: 750px;
        margin: auto;
      }}
      pre {{
        white-space: pre-wrap;
      }}
    </style>
  </head>
  <body>
    <h1>{title} &mdash; diff report</h1>
    <h2>Markdown diff</h2>
    {markdown}
    <h2>HTML diff</h2>
    {html}
  </body>
</html>
"#,
            markdown = diff_to_html(&self.markup_source),
            html = diff_to_html(&self.structured),
        )
    }
}

fn diff_to_html(report: &DiffReport) -> String {
    let spans: String = report
        .entries()
        .iter()
        .map(|entry| {
            let text = html_escape::encode_text(&entry.text);
            match entry.kind {
                DiffKind::Unchanged => format!("<span>{}</span>", text),
                DiffKind::Added => {
                    format!("<span style=\"background: {}\">{}</span>", ADDED_BACKGROUND, text)
                }
                DiffKind::Removed => {
                    format!("<span style=\"background: {}\">{}</span>", REMOVED_BACKGROUND, text)
                }
            }
        })
        .collect();
    format!("<pre><code>{}</code></pre>", spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_marks_changes() {
        let report = FidelityReport {
            structured: DiffReport::between("<p>a</p>\n", "<p>a</p>\n"),
            markup_source: DiffReport::between("a\n| x |\n", "a\nx\n"),
        };
        let html = report.to_html("notes & co");

        assert!(html.contains("<title>notes &amp; co &mdash; diff report</title>"));
        assert!(html.contains("<span style=\"background: salmon\">| x |\n</span>"));
        assert!(html.contains("<span style=\"background: lawngreen\">x\n</span>"));
        assert!(html.contains("<span>&lt;p&gt;a&lt;/p&gt;\n</span>"));
    }
}
