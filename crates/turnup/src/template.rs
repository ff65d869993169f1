//! Full-document scaffolding around a rendered body.

use turndown_core::RenderOptions;

/// Version of the embedded behavior script
pub const SITE_TOGGLE_VERSION: u32 = 1;

/// Behavior script embedded verbatim in every full document
pub const SITE_TOGGLE_SCRIPT: &str = include_str!("assets/site-toggle.js");

/// Wrap `body` in the document preamble
pub fn document(body: &str, title: Option<&str>, options: &RenderOptions) -> String {
    let title = html_escape::encode_text(title.unwrap_or(""));
    let site = html_escape::encode_double_quoted_attribute(&options.site);

    let mut html = format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style type="text/css">
      [site]:not([site="{site}"]) {{
        display: none;
      }}
    </style>
  </head>
  <body>
{body}"#
    );

    if options.behavior_script {
        html.push_str(&format!(
            "<script type=\"text/javascript\" data-asset=\"site-toggle/{}\">\n{}</script>\n",
            SITE_TOGGLE_VERSION, SITE_TOGGLE_SCRIPT
        ));
    }

    html.push_str("  </body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_rule_uses_configured_site() {
        let options = RenderOptions {
            site: "cn".to_string(),
            ..Default::default()
        };
        let html = document("<p>x</p>\n", None, &options);
        assert!(html.contains(r#"[site]:not([site="cn"])"#));
        assert!(html.contains("<title></title>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_script_can_be_left_out() {
        let options = RenderOptions {
            behavior_script: false,
            ..Default::default()
        };
        let html = document("<p>x</p>\n", Some("T"), &options);
        assert!(!html.contains("<script"));
        assert!(html.contains("<p>x</p>\n  </body>"));
    }
}
