//! # turnup
//!
//! Render Markdown to HTML, the inverse of the `turndown` crate.
//!
//! Parsing is done by `pulldown-cmark`; a few constructs are rendered our
//! own way so that converting the HTML back to Markdown is predictable:
//!
//! - headings carry no `id` or `class`,
//! - table cells use `align` attributes instead of inline styles,
//! - code blocks get their comments wrapped in a highlight `<span>`,
//! - math and metadata blocks are kept as literal text.
//!
//! ## Example
//!
//! ```rust
//! use turnup::MarkupRenderer;
//!
//! let renderer = MarkupRenderer::new();
//! assert_eq!(renderer.render_body("# Hello"), "<h1>Hello</h1>\n");
//!
//! let page = renderer.render("Some *text*", Some("Notes"));
//! assert!(page.contains("<title>Notes</title>"));
//! ```

mod highlight;
mod render;
mod template;

pub use highlight::highlight_comments;
pub use render::MarkupRenderer;
pub use template::{SITE_TOGGLE_SCRIPT, SITE_TOGGLE_VERSION};

pub use turndown_core::RenderOptions;
