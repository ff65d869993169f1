//! turndown-for-what: convert a Markdown file to HTML or an HTML file to
//! Markdown.
//!
//! Usage:
//!   turndown-for-what notes.md              # writes notes_<stamp>/ next to the cwd
//!   turndown-for-what page.html --out dist  # writes dist/page_<stamp>/
//!   turndown-for-what notes.md --stdout     # prints the converted document only

mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use roundtrip::{bundle, Document, Engine, Format};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "turndown-for-what")]
#[command(about = "Convert Markdown to HTML and back, with a round-trip diff report")]
#[command(version)]
struct Cli {
    /// File to convert; `.html`/`.htm` files are converted to Markdown,
    /// anything else to HTML
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Override the format inferred from the file extension
    #[arg(long, value_enum)]
    from: Option<SourceFormat>,

    /// Directory the conversion bundle is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out: PathBuf,

    /// TOML file with [convert] and [render] options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the converted document instead of writing a bundle
    #[arg(long)]
    stdout: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceFormat {
    Markdown,
    Html,
}

impl From<SourceFormat> for Format {
    fn from(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Markdown => Format::MarkupSource,
            SourceFormat::Html => Format::Structured,
        }
    }
}

fn init_logger(filter_level: log::LevelFilter) -> Result<()> {
    simplelog::TermLogger::init(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose.log_level_filter())?;

    let config = Config::load(cli.config.as_deref())?;
    let engine = Engine::with_options(config.render, config.convert);

    let content = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let (stem, extension) = split_file_name(&cli.input)?;
    let format = cli
        .from
        .map(Format::from)
        .unwrap_or_else(|| Format::from_extension(&extension));

    let document = Document::new(content, format).with_title(bundle::bare_name(&stem));
    let conversion = engine
        .convert(&document)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    if let Some(fidelity) = &conversion.fidelity {
        if fidelity.is_lossless() {
            log::info!("round trip is lossless");
        } else {
            log::info!(
                "round trip changes {} Markdown and {} HTML passages",
                fidelity.markup_source.removed().count() + fidelity.markup_source.added().count(),
                fidelity.structured.removed().count() + fidelity.structured.added().count(),
            );
        }
    }

    if cli.stdout {
        print!("{}", conversion.output.content());
        return Ok(());
    }

    let millis = u64::try_from(chrono::Utc::now().timestamp_millis())
        .context("System clock is before the Unix epoch")?;
    let stamp = bundle::stamp(millis);
    let planned = bundle::plan(&stem, &extension, &stamp, &conversion);

    for file in &planned.files {
        let path = cli.out.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
    }

    println!("{}", cli.out.join(&planned.directory).display());
    Ok(())
}

/// File stem and extension of the input path
fn split_file_name(path: &Path) -> Result<(String, String)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    Ok((stem.to_string(), extension.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_name() {
        let (stem, ext) = split_file_name(Path::new("docs/notes_v_abc.md")).unwrap();
        assert_eq!(stem, "notes_v_abc");
        assert_eq!(ext, "md");
        assert_eq!(Format::from_extension(&ext), Format::MarkupSource);

        let (stem, ext) = split_file_name(Path::new("README")).unwrap();
        assert_eq!((stem.as_str(), ext.as_str()), ("README", ""));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "turndown-for-what",
            "page.htm",
            "--from",
            "markdown",
            "-o",
            "dist",
        ])
        .unwrap();
        assert_eq!(cli.input, Path::new("page.htm"));
        assert!(matches!(cli.from, Some(SourceFormat::Markdown)));
        assert_eq!(cli.out, Path::new("dist"));
        assert!(!cli.stdout);
    }
}
