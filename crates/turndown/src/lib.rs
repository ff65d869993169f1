//! # turndown
//!
//! Convert HTML to Markdown.
//!
//! A Rust take on [turndown](https://github.com/mixmark-io/turndown): HTML is
//! parsed into an owned [`StructuredNode`] tree, whitespace is normalized the
//! way a browser would render it, and every element is converted by the first
//! matching rule of a [`RuleSet`].
//!
//! ## Design
//!
//! - **Rules are data**: a rule is a filter, a replacement function pointer
//!   and a [`Precedence`]. Plugins such as [`gfm`] only register rules.
//! - **Parser agnostic**: any parser can build a [`StructuredNode`] tree; the
//!   default `html` feature provides one on top of `scraper`.
//! - **Nothing is lost silently**: elements without a Markdown equivalent,
//!   and blank elements that carry attributes, are emitted as HTML.
//!
//! ## Example
//!
//! ```rust
//! use turndown::TurndownService;
//!
//! let service = TurndownService::new();
//! let markdown = service.convert("<h1>Hello World</h1><p>Some <em>text</em></p>").unwrap();
//! assert_eq!(markdown, "# Hello World\n\nSome _text_\n");
//! ```
//!
//! ## Example (custom rule)
//!
//! ```rust
//! use turndown::{Rule, TurndownService};
//!
//! let mut service = TurndownService::new();
//! service.add_rule(Rule::for_tag("mark", "mark", |_, content, _| format!("=={}==", content)));
//! assert_eq!(service.convert("<mark>hi</mark>").unwrap(), "==hi==\n");
//! ```

#[cfg(feature = "html")]
pub mod html;
pub mod node;
pub mod rules;
mod service;
mod utilities;
mod whitespace;

#[cfg(feature = "html")]
pub use html::{parse_html, parse_html_with};
pub use node::{Child, NodeRef, StructuredNode};
pub use rules::{gfm, Filter, Precedence, Rule, RuleSet};
pub use service::TurndownService;
pub use utilities::*;
pub use whitespace::collapse_whitespace;

pub use turndown_core::{
    CodeBlockStyle, ConversionError, ConvertOptions, HeadingStyle, LineEnding, Result,
};
