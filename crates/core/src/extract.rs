//! Main-content selection and text normalization.
//!
//! Extraction runs in four steps: noise elements are stripped from the raw
//! markup, the ordered selector list is scanned until one selector yields
//! text, the body is used when none does, and the resulting text is
//! normalized into deduplicated lines joined by single spaces.

use std::collections::HashSet;

use serde::Serialize;

use crate::noise::NoiseFilter;
use crate::parse::Document;
use crate::preprocess::PreprocessConfig;
use crate::{PrecisError, Result};

/// Content region selectors in priority order.
///
/// Semantic containers come first, then content-class containers, then
/// generic main-content markers, the id marker, and finally the post body.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".post-content",
    ".entry-content",
    ".article-content",
    ".article-body",
    ".content",
    "main",
    r#"[role="main"]"#,
    "#content",
    ".post-body",
];

/// Title used when the page offers none.
pub const FALLBACK_TITLE: &str = "Untitled";

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Ordered selector list; the first selector with text wins
    pub selectors: Vec<String>,
    /// Noise element removal applied before selection
    pub preprocess: PreprocessConfig,
    /// Minimum character count of the normalized content
    pub min_content_length: usize,
    /// Maximum title length in characters
    pub title_limit: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            preprocess: PreprocessConfig::default(),
            min_content_length: 100,
            title_limit: 200,
        }
    }
}

/// The result of content extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    /// Page title, at most `title_limit` characters
    pub title: String,
    /// Normalized, deduplicated plain text
    pub content: String,
    /// The selector that supplied the content, `None` for the body fallback
    pub selector: Option<String>,
}

/// Extracts the title and main text of `html`.
///
/// # Errors
///
/// Returns [`PrecisError::InsufficientContent`] when the normalized content
/// is shorter than `config.min_content_length` characters, and
/// [`PrecisError::HtmlParseError`] for invalid configured selectors.
pub fn extract(html: &str, config: &ExtractConfig, noise: &NoiseFilter) -> Result<ExtractedDocument> {
    let title = extract_title(&Document::parse(html), config.title_limit);

    let doc = Document::parse_cleaned(html, &config.preprocess)?;
    let (selector, content) = match select_main_content(&doc, &config.selectors, noise)? {
        Some((selector, content)) => (Some(selector.to_string()), content),
        None => (None, normalize_text(&doc.body_text(), noise)),
    };

    let length = content.chars().count();
    tracing::debug!(selector = selector.as_deref().unwrap_or("body"), length, "extracted content");

    if length < config.min_content_length {
        return Err(PrecisError::InsufficientContent { length, minimum: config.min_content_length });
    }

    Ok(ExtractedDocument { title, content, selector })
}

/// Scans `selectors` in order and returns the first one whose matches hold
/// any normalized text, together with that text.
///
/// Later selectors are never evaluated once one succeeds.
pub fn select_main_content<'s>(
    doc: &Document, selectors: &'s [String], noise: &NoiseFilter,
) -> Result<Option<(&'s str, String)>> {
    for selector in selectors {
        let elements = doc.select(selector)?;
        if elements.is_empty() {
            continue;
        }

        let raw = elements.iter().map(|el| el.block_text()).collect::<Vec<_>>().join("\n");
        let content = normalize_text(&raw, noise);
        if !content.is_empty() {
            return Ok(Some((selector.as_str(), content)));
        }
    }

    Ok(None)
}

/// Normalizes raw text into a single line.
///
/// Each line has its whitespace runs collapsed and is trimmed; empty lines
/// and blocklisted lines are dropped; repeated lines keep only their first
/// occurrence. Survivors are joined with single spaces, and a line is also
/// dropped when joining it to the text before it would form a blocklisted
/// phrase.
pub fn normalize_text(text: &str, noise: &NoiseFilter) -> String {
    let mut seen = HashSet::new();
    let window = noise.max_phrase_chars();
    let mut out = String::new();

    for line in text.lines().map(collapse_whitespace) {
        if line.is_empty() || noise.is_noise(&line) || seen.contains(&line) {
            continue;
        }
        if !out.is_empty() {
            if noise.is_noise(&format!("{} {}", tail_chars(&out, window), line)) {
                continue;
            }
            out.push(' ');
        }
        out.push_str(&line);
        seen.insert(line);
    }

    out
}

/// The last `n` characters of `text`.
fn tail_chars(text: &str, n: usize) -> &str {
    let skip = text.chars().count().saturating_sub(n);
    text.char_indices().nth(skip).map_or("", |(idx, _)| &text[idx..])
}

/// Picks the page title: `<title>`, then the first `<h1>`, then `og:title`,
/// then [`FALLBACK_TITLE`]. The result is truncated to `limit` characters.
pub fn extract_title(doc: &Document, limit: usize) -> String {
    let title = doc
        .title()
        .or_else(|| doc.first_heading())
        .or_else(|| doc.meta_content("og:title"))
        .map(|t| collapse_whitespace(&t))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    title.chars().take(limit).collect()
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
