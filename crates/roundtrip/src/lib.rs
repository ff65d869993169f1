//! # roundtrip
//!
//! Convert documents between Markdown and HTML and report what a round trip
//! would lose.
//!
//! ```text
//!              Engine::convert(&Document)
//!                        │
//!          ┌─────────────┴─────────────┐
//!     Markdown source              HTML source
//!          │                           │
//!   MarkupRenderer (turnup)    TurndownService (turndown)
//!          │                           │
//!   FidelityChecker ──► FidelityReport │
//!          └─────────────┬─────────────┘
//!                   Conversion ──► bundle::plan
//! ```
//!
//! ## Example
//!
//! ```rust
//! use roundtrip::{Document, Engine};
//!
//! let engine = Engine::new();
//! let conversion = engine
//!     .convert(&Document::markup_source("# Title\n\n| a |\n| --- |\n| 1 |\n"))
//!     .unwrap();
//!
//! assert!(conversion.output.content().contains("<table>"));
//! assert!(conversion.fidelity.unwrap().is_lossless());
//! ```

pub mod bundle;
mod check;
mod diff;
mod engine;
mod report;

pub use check::{FidelityChecker, FidelityReport};
pub use diff::{DiffEntry, DiffKind, DiffReport};
pub use engine::{Conversion, Engine};

pub use turndown_core::{
    ConversionError, ConvertOptions, Document, Format, RenderOptions, Result,
};
