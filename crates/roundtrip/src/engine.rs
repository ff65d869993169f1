//! The conversion engine: one renderer, one converter, both directions.

use turndown::TurndownService;
use turndown_core::{ConvertOptions, Document, Format, RenderOptions, Result};
use turnup::MarkupRenderer;

use crate::check::{FidelityChecker, FidelityReport};

/// Outcome of [`Engine::convert`]
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The converted document, in the opposite format of the source
    pub output: Document,
    /// Present when the source was Markdown
    pub fidelity: Option<FidelityReport>,
}

/// Converts documents in either direction.
///
/// Build one engine and share it by reference; it holds no per-call state.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    renderer: MarkupRenderer,
    converter: TurndownService,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(render: RenderOptions, convert: ConvertOptions) -> Self {
        Self::with_parts(
            MarkupRenderer::with_options(render),
            TurndownService::with_options(convert),
        )
    }

    /// Use an already configured renderer and converter
    pub fn with_parts(renderer: MarkupRenderer, converter: TurndownService) -> Self {
        Self {
            renderer,
            converter,
        }
    }

    pub fn renderer(&self) -> &MarkupRenderer {
        &self.renderer
    }

    pub fn converter(&self) -> &TurndownService {
        &self.converter
    }

    /// Markdown to a full HTML document
    pub fn render_to_structured(&self, markdown: &str, title: Option<&str>) -> String {
        self.renderer.render(markdown, title)
    }

    /// HTML to Markdown
    pub fn convert_to_markup_source(&self, html: &str) -> Result<String> {
        self.converter.convert(html)
    }

    pub fn check_fidelity(&self, markdown: &str, title: Option<&str>) -> Result<FidelityReport> {
        FidelityChecker::new(&self.renderer, &self.converter).check(markdown, title)
    }

    /// Convert `document` into the other format. Markdown sources also get
    /// a fidelity report.
    pub fn convert(&self, document: &Document) -> Result<Conversion> {
        log::info!(
            "converting {} to {}",
            document.format().display_name(),
            document.format().target().display_name()
        );

        match document.format() {
            Format::MarkupSource => {
                let html = self.render_to_structured(document.content(), document.title());
                let fidelity = self.check_fidelity(document.content(), document.title())?;
                if !fidelity.is_lossless() {
                    log::warn!("converting the result back to Markdown will not be lossless");
                }
                Ok(Conversion {
                    output: with_title(Document::structured(html), document.title()),
                    fidelity: Some(fidelity),
                })
            }
            Format::Structured => {
                let markdown = self.convert_to_markup_source(document.content())?;
                Ok(Conversion {
                    output: with_title(Document::markup_source(markdown), document.title()),
                    fidelity: None,
                })
            }
        }
    }
}

fn with_title(document: Document, title: Option<&str>) -> Document {
    match title {
        Some(title) => document.with_title(title),
        None => document,
    }
}
