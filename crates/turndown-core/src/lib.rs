//! turndown-core - shared document model, options and errors
//!
//! This crate holds the pieces used by both conversion directions:
//! `turnup` (Markdown to HTML) and `turndown` (HTML to Markdown), as well as
//! the `roundtrip` fidelity checker built on top of them.
//!
//! # Architecture
//!
//! ```text
//!              ┌──────── turnup ────────┐
//! Markdown ────┤                        ├───▶ HTML
//!     ▲        └────────────────────────┘      │
//!     │        ┌─────── turndown ───────┐      │
//!     └────────┤  StructuredNode + rules├◀─────┘
//!              └────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use turndown_core::{ConvertOptions, Document, Format, LineEnding};
//!
//! let doc = Document::new("# Hello", Format::from_extension("md"));
//! assert_eq!(doc.format().target(), Format::Structured);
//!
//! let options = ConvertOptions {
//!     line_ending: LineEnding::CrLf,
//!     ..Default::default()
//! };
//! assert_eq!(options.line_ending.apply("a\nb"), "a\r\nb");
//! ```

mod document;
mod options;

pub use document::{Document, Format};
pub use options::{
    normalize_line_endings, CodeBlockStyle, ConvertOptions, HeadingStyle, LineEnding,
    RenderOptions,
};

/// Error type for conversion operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The HTML input could not be turned into a node tree
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// No rule accepted a node; the rule set is missing its fallback
    #[error("No rule matched <{tag}>")]
    NoRuleMatched { tag: String },

    /// A Markdown construct has no HTML mapping
    #[error("Unsupported construct: {0}")]
    UnsupportedConstruct(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
