//! Input and output documents

/// The two representations the engine converts between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Markdown
    MarkupSource,
    /// HTML
    Structured,
}

impl Format {
    /// Infer the format from a file extension (`html`/`htm` are HTML,
    /// everything else is treated as Markdown).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Format::Structured,
            _ => Format::MarkupSource,
        }
    }

    /// The format a document of this format converts into.
    pub fn target(self) -> Self {
        match self {
            Format::MarkupSource => Format::Structured,
            Format::Structured => Format::MarkupSource,
        }
    }

    /// Canonical file extension
    pub fn extension(self) -> &'static str {
        match self {
            Format::MarkupSource => "md",
            Format::Structured => "html",
        }
    }

    /// Human-readable name, as used in provenance notes
    pub fn display_name(self) -> &'static str {
        match self {
            Format::MarkupSource => "Markdown",
            Format::Structured => "HTML",
        }
    }
}

/// A piece of content in a declared format.
///
/// Documents are never mutated by the engine; conversions produce new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    content: String,
    format: Format,
    title: Option<String>,
}

impl Document {
    pub fn new(content: impl Into<String>, format: Format) -> Self {
        Self {
            content: content.into(),
            format,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn markup_source(content: impl Into<String>) -> Self {
        Self::new(content, Format::MarkupSource)
    }

    pub fn structured(content: impl Into<String>) -> Self {
        Self::new(content, Format::Structured)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_extension("html"), Format::Structured);
        assert_eq!(Format::from_extension("HTM"), Format::Structured);
        assert_eq!(Format::from_extension("md"), Format::MarkupSource);
        assert_eq!(Format::from_extension("txt"), Format::MarkupSource);
    }

    #[test]
    fn test_target_flips() {
        assert_eq!(Format::MarkupSource.target(), Format::Structured);
        assert_eq!(Format::Structured.target().extension(), "md");
    }

    #[test]
    fn test_document_title() {
        let doc = Document::markup_source("# Hi").with_title("notes");
        assert_eq!(doc.title(), Some("notes"));
        assert_eq!(doc.format(), Format::MarkupSource);
    }
}
