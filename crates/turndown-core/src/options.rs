//! Configuration options for rendering and conversion
//!
//! Both records are fixed at engine construction. With the `serde` feature
//! they can be read from a configuration file; missing keys fall back to
//! [`Default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heading style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum HeadingStyle {
    /// Use setext-style headings (underlined with = or -)
    /// Only works for h1 and h2, falls back to ATX for h3-h6
    Setext,
    /// Use ATX-style headings (prefixed with #)
    #[default]
    Atx,
}

/// Code block style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum CodeBlockStyle {
    /// Use indented code blocks (4 spaces)
    Indented,
    /// Use fenced code blocks (```)
    #[default]
    Fenced,
}

/// Line terminator written into converted Markdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator itself.
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Rewrite every line terminator in `text` to this policy.
    ///
    /// Existing `\r\n` pairs are normalized first, so applying the policy
    /// twice is a no-op.
    pub fn apply(self, text: &str) -> String {
        let normalized = normalize_line_endings(text);
        match self {
            LineEnding::Lf => normalized,
            LineEnding::CrLf => normalized.replace('\n', "\r\n"),
        }
    }
}

/// Replace `\r\n` and lone `\r` with `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Options for HTML to Markdown conversion
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ConvertOptions {
    /// Heading style (setext or atx)
    pub heading_style: HeadingStyle,

    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Code block style
    pub code_block_style: CodeBlockStyle,

    /// Fence string for fenced code blocks
    pub fence: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Line terminator of the produced Markdown
    pub line_ending: LineEnding,

    /// Reject input the HTML parser had to repair
    pub strict: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            hr: "_".repeat(30),
            bullet_list_marker: '-',
            code_block_style: CodeBlockStyle::Fenced,
            fence: "```".to_string(),
            em_delimiter: '_',
            strong_delimiter: "**".to_string(),
            line_ending: LineEnding::Lf,
            strict: false,
        }
    }
}

/// Options for Markdown to HTML rendering
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RenderOptions {
    /// GitHub-style pipe tables
    pub tables: bool,

    /// `~~strikethrough~~`
    pub strikethrough: bool,

    /// `- [x]` task list items
    pub task_lists: bool,

    /// Recognize `$math$` spans (passed through as literal text)
    pub math: bool,

    /// Recognize leading YAML metadata blocks (passed through as literal text)
    pub metadata_blocks: bool,

    /// Wrap comments inside code blocks in a highlight span
    pub highlight_comments: bool,

    /// CSS class of the comment highlight span
    pub comment_class: String,

    /// Elements whose `site` attribute differs from this value are hidden
    pub site: String,

    /// Embed the conditional-content script in full documents
    pub behavior_script: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            task_lists: true,
            math: true,
            metadata_blocks: true,
            highlight_comments: true,
            comment_class: "comment".to_string(),
            site: "intl".to_string(),
            behavior_script: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_policy_has_no_bare_newlines() {
        let out = LineEnding::CrLf.apply("a\nb\r\nc\n");
        assert_eq!(out, "a\r\nb\r\nc\r\n");
    }

    #[test]
    fn test_crlf_policy_is_idempotent() {
        let once = LineEnding::CrLf.apply("a\nb\n");
        assert_eq!(LineEnding::CrLf.apply(&once), once);
    }

    #[test]
    fn test_lf_policy_normalizes() {
        assert_eq!(LineEnding::Lf.apply("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_convert_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.heading_style, HeadingStyle::Atx);
        assert_eq!(options.bullet_list_marker, '-');
        assert_eq!(options.hr.len(), 30);
        assert_eq!(options.code_block_style, CodeBlockStyle::Fenced);
    }
}
