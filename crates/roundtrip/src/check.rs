//! Round-trip fidelity checking.
//!
//! Markdown is rendered to HTML, converted back to Markdown and rendered
//! again. Whatever the two directions cannot carry shows up in two diffs:
//! one between the Markdown before and after, one between the two renderings.

use turndown::TurndownService;
use turndown_core::{normalize_line_endings, Result};
use turnup::MarkupRenderer;

use crate::diff::DiffReport;

/// Result of one fidelity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FidelityReport {
    /// First rendering against the rendering of the round-tripped Markdown
    pub structured: DiffReport,
    /// Original Markdown against the round-tripped Markdown
    pub markup_source: DiffReport,
}

impl FidelityReport {
    /// True when neither representation changed
    pub fn is_lossless(&self) -> bool {
        !self.structured.has_changes() && !self.markup_source.has_changes()
    }
}

/// Runs both converters over a document and compares the results
#[derive(Debug, Clone, Copy)]
pub struct FidelityChecker<'e> {
    renderer: &'e MarkupRenderer,
    converter: &'e TurndownService,
}

impl<'e> FidelityChecker<'e> {
    pub fn new(renderer: &'e MarkupRenderer, converter: &'e TurndownService) -> Self {
        Self {
            renderer,
            converter,
        }
    }

    /// Check how well `markdown` survives a Markdown → HTML → Markdown cycle
    pub fn check(&self, markdown: &str, title: Option<&str>) -> Result<FidelityReport> {
        let rendered = self.renderer.render(markdown, title);
        let turned = self.converter.convert(&rendered)?;

        let first = self.renderer.render_body(markdown);
        let second = self.renderer.render_body(&turned);
        let structured = DiffReport::between(&comparable(&first), &comparable(&second));

        let markup_source =
            DiffReport::between(&with_final_newline(markdown), &with_final_newline(&turned));

        log::debug!(
            "fidelity check: markdown {}, html {}",
            if markup_source.has_changes() { "changed" } else { "unchanged" },
            if structured.has_changes() { "changed" } else { "unchanged" },
        );

        Ok(FidelityReport {
            structured,
            markup_source,
        })
    }
}

fn comparable(html: &str) -> String {
    format!("{}\n", html.trim())
}

fn with_final_newline(text: &str) -> String {
    let mut text = normalize_line_endings(text);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffKind;
    use turndown::RuleSet;
    use turndown_core::ConvertOptions;

    fn check(markdown: &str) -> FidelityReport {
        let renderer = MarkupRenderer::new();
        let converter = TurndownService::new();
        FidelityChecker::new(&renderer, &converter)
            .check(markdown, Some("Doc"))
            .unwrap()
    }

    #[test]
    fn test_identical_round_trip() {
        let report = check("# Title\n\nHello world.\n");
        assert!(report.is_lossless());
        assert!(report
            .markup_source
            .entries()
            .iter()
            .all(|e| e.kind == DiffKind::Unchanged));
    }

    #[test]
    fn test_rich_document_round_trip() {
        let markdown = "# Title\n\
                        \n\
                        Some _emphasis_ and **strong** text with `code`.\n\
                        \n\
                        - one\n\
                        - two\n\
                        \n\
                        5. five\n\
                        6. six\n\
                        \n\
                        > quoted\n\
                        \n\
                        | A | B |\n\
                        | :-- | --: |\n\
                        | 1 | 2 |\n\
                        \n\
                        ```rust\n\
                        let x = 1; // one\n\
                        ```\n";
        let report = check(markdown);
        assert!(!report.structured.has_changes(), "{:?}", report.structured);
        assert!(!report.markup_source.has_changes(), "{:?}", report.markup_source);
    }

    #[test]
    fn test_missing_final_newline_is_not_a_change() {
        assert!(check("Hello").is_lossless());
        assert!(check("Hello\r\n").is_lossless());
    }

    #[test]
    fn test_lossy_rules_report_removed_table() {
        let renderer = MarkupRenderer::new();
        let converter =
            TurndownService::with_rules(ConvertOptions::default(), RuleSet::commonmark());
        let report = FidelityChecker::new(&renderer, &converter)
            .check("| A | B |\n| --- | --- |\n| 1 | 2 |\n", None)
            .unwrap();

        assert!(report
            .markup_source
            .removed()
            .any(|e| e.text.contains('|')));
        assert!(report.structured.removed().any(|e| e.text.contains("<table>")));
    }

    #[test]
    fn test_check_is_deterministic() {
        let markdown = "Text *with* [a link](http://x.y \"t\") and ~~gone~~.\n";
        assert_eq!(check(markdown), check(markdown));
    }
}
