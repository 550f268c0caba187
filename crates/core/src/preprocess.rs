//! Streaming removal of noise elements before the document is parsed.
//!
//! Stripping happens on the raw markup with `lol_html` so that nothing from
//! scripts, navigation, page chrome or images can leak into the text the
//! extractor later reads.

use std::sync::LazyLock;

use regex::Regex;

use crate::{PrecisError, Result};

/// Elements removed together with their contents.
pub const DEFAULT_NOISE_ELEMENTS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "template",
    "nav",
    "header",
    "footer",
    "aside",
    "img",
    "picture",
    "svg",
    "iframe",
    ".placeholder",
    "[data-placeholder]",
    ".no-js",
    ".noscript",
];

static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").unwrap());

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// CSS selectors whose matches are dropped with all descendants
    pub noise_elements: Vec<String>,
    /// Whether to remove elements hidden with inline styles
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { noise_elements: DEFAULT_NOISE_ELEMENTS.iter().map(|s| s.to_string()).collect(), remove_hidden: true }
    }
}

/// Removes every noise element from `html`.
///
/// # Errors
///
/// Returns [`PrecisError::HtmlParseError`] when a configured selector is not
/// supported by the streaming rewriter, or when rewriting fails.
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> Result<String> {
    for selector in &config.noise_elements {
        selector
            .parse::<lol_html::Selector>()
            .map_err(|e| PrecisError::HtmlParseError(format!("Invalid noise selector '{}': {}", selector, e)))?;
    }

    let mut handlers: Vec<_> = config
        .noise_elements
        .iter()
        .map(|selector| {
            lol_html::element!(selector.as_str(), |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    if config.remove_hidden {
        handlers.push(lol_html::element!("[style]", |el| {
            if let Some(style) = el.get_attribute("style")
                && HIDDEN_STYLE.is_match(&style)
            {
                el.remove();
            }
            Ok(())
        }));
    }

    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| PrecisError::HtmlParseError(e.to_string()))?;
    rewriter.end().map_err(|e| PrecisError::HtmlParseError(e.to_string()))?;

    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_noise_elements() {
        let html = r#"
            <html>
                <head><script>alert('test');</script><style>body{color:red;}</style></head>
                <body>
                    <header>Site header</header>
                    <nav><a href="/">Home</a></nav>
                    <noscript>Enable JavaScript</noscript>
                    <img src="cat.jpg" alt="A cat sitting on a mat">
                    <article><p>Content</p></article>
                    <aside>Related posts</aside>
                    <footer>Copyright</footer>
                </body>
            </html>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default()).unwrap();
        assert!(!result.contains("alert"), "Script content should be removed");
        assert!(!result.contains("color:red"), "Style content should be removed");
        assert!(!result.contains("Site header"));
        assert!(!result.contains("Home"));
        assert!(!result.contains("Enable JavaScript"));
        assert!(!result.contains("A cat sitting"), "Image alt text should be removed");
        assert!(!result.contains("Related posts"));
        assert!(!result.contains("Copyright"));
        assert!(result.contains("<p>Content</p>"));
    }

    #[test]
    fn test_remove_placeholder_markers() {
        let html = r#"<div><p class="placeholder">Loading comments</p><p data-placeholder="1">Wait</p><p>Kept</p></div>"#;
        let result = preprocess_html(html, &PreprocessConfig::default()).unwrap();
        assert!(!result.contains("Loading comments"));
        assert!(!result.contains("Wait"));
        assert!(result.contains("Kept"));
    }

    #[test]
    fn test_remove_hidden_elements() {
        let html = r#"
            <div style="display:none">Hidden content</div>
            <div style="visibility: hidden">Invisible content</div>
            <div style="color: blue">Visible content</div>
        "#;

        let result = preprocess_html(html, &PreprocessConfig::default()).unwrap();
        assert!(!result.contains("Hidden content"));
        assert!(!result.contains("Invisible content"));
        assert!(result.contains("Visible content"));
    }

    #[test]
    fn test_keep_hidden_when_disabled() {
        let config = PreprocessConfig { remove_hidden: false, ..Default::default() };
        let result = preprocess_html(r#"<div style="display:none">Hidden</div>"#, &config).unwrap();
        assert!(result.contains("Hidden"));
    }

    #[test]
    fn test_invalid_selector() {
        let config = PreprocessConfig { noise_elements: vec!["[[broken".to_string()], remove_hidden: false };
        let result = preprocess_html("<p>x</p>", &config);
        assert!(matches!(result, Err(PrecisError::HtmlParseError(_))));
    }

    #[test]
    fn test_preserves_multibyte_text() {
        let html = "<p>سلام دنیا — naïve café</p><script>x</script>";
        let result = preprocess_html(html, &PreprocessConfig::default()).unwrap();
        assert!(result.contains("سلام دنیا — naïve café"));
    }
}
