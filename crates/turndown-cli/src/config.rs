//! Optional TOML configuration.
//!
//! ```toml
//! [convert]
//! heading_style = "setext"
//! line_ending = "crlf"
//!
//! [render]
//! site = "cn"
//! highlight_comments = false
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use turndown_core::{ConvertOptions, RenderOptions};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML to Markdown options
    pub convert: ConvertOptions,
    /// Markdown to HTML options
    pub render: RenderOptions,
}

impl Config {
    /// Load the configuration file, or the defaults when no file is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turndown_core::{HeadingStyle, LineEnding};

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [convert]
            heading_style = "setext"
            line_ending = "crlf"

            [render]
            site = "cn"
            "#,
        )
        .unwrap();

        assert_eq!(config.convert.heading_style, HeadingStyle::Setext);
        assert_eq!(config.convert.line_ending, LineEnding::CrLf);
        assert_eq!(config.convert.bullet_list_marker, '-');
        assert_eq!(config.render.site, "cn");
        assert!(config.render.tables);
    }

    #[test]
    fn test_no_file_means_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.convert, ConvertOptions::default());
    }
}
