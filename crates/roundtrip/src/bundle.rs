//! Derived-file naming for a finished conversion.
//!
//! A conversion of `notes.md` stamped `lq3x0k2a` is laid out as
//!
//! ```text
//! notes_lq3x0k2a/
//!     notes_v_lq3x0k2a.html
//!     info/
//!         README_lq3x0k2a.md
//!         DIFF_REPORT_lq3x0k2a.html
//! ```
//!
//! The diff report only exists for Markdown sources.

use std::path::PathBuf;

use turndown_core::Format;

use crate::engine::Conversion;

/// One file of a planned bundle, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub path: PathBuf,
    pub contents: String,
}

/// All files produced by one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// Top-level directory every file lives in
    pub directory: PathBuf,
    pub files: Vec<BundleFile>,
}

/// Name of a source file without extension, stripped of the version suffix a
/// previous conversion appended (`notes_v_lq3x0k2a` → `notes`)
pub fn bare_name(file_stem: &str) -> &str {
    match file_stem.find("_v_") {
        Some(index) if index + 3 < file_stem.len() => &file_stem[..index],
        _ => file_stem,
    }
}

/// Base-36 rendering of a millisecond timestamp
pub fn stamp(millis: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if millis == 0 {
        return "0".to_string();
    }
    let mut value = millis;
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Provenance note shipped next to the converted file
pub fn readme(source_name: &str, source_format: Format, stamp: &str) -> String {
    let mut readme = format!(
        "# README\n\nThis file was converted from {from} to {to}.\n\nThe original {from} file was {source_name}.\n",
        from = source_format.display_name(),
        to = source_format.target().display_name(),
    );
    if source_format == Format::MarkupSource {
        readme.push_str(&format!(
            "\nSee DIFF_REPORT_{}.html for any changes to expect when converting back to Markdown.\n",
            stamp
        ));
    }
    readme
}

/// Lay out the files for `conversion` of the source file `file_stem.extension`
pub fn plan(file_stem: &str, extension: &str, stamp: &str, conversion: &Conversion) -> Bundle {
    let base = bare_name(file_stem);
    let source_format = conversion.output.format().target();
    let directory = PathBuf::from(format!("{}_{}", base, stamp));

    let mut files = vec![
        BundleFile {
            path: directory.join(format!(
                "{}_v_{}.{}",
                base,
                stamp,
                conversion.output.format().extension()
            )),
            contents: conversion.output.content().to_string(),
        },
        BundleFile {
            path: directory.join("info").join(format!("README_{}.md", stamp)),
            contents: readme(&format!("{}.{}", file_stem, extension), source_format, stamp),
        },
    ];

    if let Some(fidelity) = &conversion.fidelity {
        files.push(BundleFile {
            path: directory.join("info").join(format!("DIFF_REPORT_{}.html", stamp)),
            contents: fidelity.to_html(base),
        });
    }

    Bundle { directory, files }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use std::path::Path;
    use turndown_core::Document;

    #[test]
    fn test_bare_name_strips_version_suffix() {
        assert_eq!(bare_name("notes"), "notes");
        assert_eq!(bare_name("notes_v_lq3x0k2a"), "notes");
        assert_eq!(bare_name("notes_v_"), "notes_v_");
    }

    #[test]
    fn test_stamp_is_base36() {
        assert_eq!(stamp(0), "0");
        assert_eq!(stamp(35), "z");
        assert_eq!(stamp(36), "10");
        assert_eq!(stamp(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_markdown_bundle_has_diff_report() {
        let engine = Engine::new();
        let source = Document::markup_source("# Hi\n").with_title("notes");
        let conversion = engine.convert(&source).unwrap();
        let bundle = plan("notes_v_abc", "md", "s1", &conversion);

        assert_eq!(bundle.directory, Path::new("notes_s1"));
        let paths: Vec<_> = bundle.files.iter().map(|f| f.path.as_path()).collect();
        assert_eq!(
            paths,
            [
                Path::new("notes_s1/notes_v_s1.html"),
                Path::new("notes_s1/info/README_s1.md"),
                Path::new("notes_s1/info/DIFF_REPORT_s1.html"),
            ]
        );
        assert!(bundle.files[1].contents.contains("notes_v_abc.md"));
        assert!(bundle.files[1].contents.contains("DIFF_REPORT_s1.html"));
    }

    #[test]
    fn test_html_bundle_has_no_diff_report() {
        let engine = Engine::new();
        let conversion = engine.convert(&Document::structured("<p>x</p>")).unwrap();
        let bundle = plan("page", "htm", "s2", &conversion);

        assert_eq!(bundle.files.len(), 2);
        assert_eq!(bundle.files[0].path, Path::new("page_s2/page_v_s2.md"));
        assert_eq!(bundle.files[0].contents, "x\n");
        assert_eq!(
            bundle.files[1].contents,
            "# README\n\nThis file was converted from HTML to Markdown.\n\nThe original HTML file was page.htm.\n"
        );
    }
}
