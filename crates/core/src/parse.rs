//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use precis_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.first_heading(), Some("Title".to_string()));
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{PrecisError, PreprocessConfig, Result, preprocess};

/// Elements whose boundaries end a line of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "main",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and reading the few head fields the extractor needs.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string without preprocessing.
    ///
    /// Parsing is lenient: malformed markup still yields a tree.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Strips noise elements and then parses the remaining markup.
    ///
    /// # Errors
    ///
    /// Propagates [`PrecisError::HtmlParseError`] from the preprocessing step.
    pub fn parse_cleaned(html: &str, config: &PreprocessConfig) -> Result<Self> {
        let cleaned = preprocess::preprocess_html(html, config)?;
        Ok(Self::parse(&cleaned))
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use precis_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|element| Element { element }).collect())
    }

    /// Gets the trimmed content of the document `<title>`, if non-empty.
    ///
    /// Only the head is consulted; `<title>` inside inline SVG is ignored.
    pub fn title(&self) -> Option<String> {
        self.first_text("head > title")
    }

    /// Gets the trimmed text of the first `<h1>`, if non-empty.
    pub fn first_heading(&self) -> Option<String> {
        self.first_text("h1")
    }

    /// Gets the `content` of a `<meta>` tag matched by `property` or `name`.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        let selector = format!(r#"meta[property="{key}"], meta[name="{key}"]"#);
        self.select(&selector)
            .ok()?
            .into_iter()
            .filter_map(|el| el.attr("content").map(|c| c.trim().to_string()))
            .find(|c| !c.is_empty())
    }

    /// Gets the line-structured text of `<body>`, or of the whole document
    /// when there is no body element.
    pub fn body_text(&self) -> String {
        match self.select("body").ok().and_then(|els| els.into_iter().next()) {
            Some(body) => body.block_text(),
            None => Element { element: self.html.root_element() }.block_text(),
        }
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        let sel = Selector::parse(selector).ok()?;
        self.html
            .select(&sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|t| !t.is_empty())
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text of this element with a line break at every block boundary.
    ///
    /// Inline runs stay on the same line, so `<p>a <b>b</b></p><p>c</p>`
    /// becomes `"a b\nc"` (surrounded by newlines).
    pub fn block_text(&self) -> String {
        let mut out = String::new();
        collect_block_text(self.element, &mut out);
        out
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}

fn collect_block_text(element: ElementRef<'_>, out: &mut String) {
    let is_block = BLOCK_ELEMENTS.contains(&element.value().name());
    if is_block {
        out.push('\n');
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_block_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }

    if is_block {
        out.push('\n');
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PrecisError::HtmlParseError(format!("Invalid selector: {}", e)))
}
