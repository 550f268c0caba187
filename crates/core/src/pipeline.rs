//! Main processing API.
//!
//! This module provides the orchestrator that turns a URL into a
//! [`ProcessedBlog`]: validate, fetch, extract, summarize, translate and
//! measure. The main entry point is the [`Pipeline`] struct, along with the
//! convenience functions [`process`] and [`process_html`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use precis_core::{Dictionary, Pipeline, PipelineConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(PipelineConfig::default(), Arc::new(Dictionary::builtin()))?;
//! let blog = pipeline.process("https://example.com/post").await?;
//! println!("{}: {}", blog.title, blog.summary);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::blog::{ProcessedBlog, truncate_chars};
use crate::dictionary::Dictionary;
use crate::extract::{ExtractConfig, ExtractedDocument, extract};
use crate::fetch::{FetchConfig, Fetcher, validate_url};
use crate::metrics;
use crate::noise::NoiseFilter;
use crate::summarize::{SummaryConfig, summarize};
use crate::translate::translate;
use crate::Result;

#[cfg(feature = "fetch")]
use crate::fetch::HttpFetcher;

/// Configuration for a [`Pipeline`].
///
/// # Example
///
/// ```rust
/// use precis_core::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .timeout(10)
///     .max_sentences(2)
///     .content_limit(2000)
///     .build();
/// assert_eq!(config.summary.max_sentences, 2);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// HTTP fetch settings.
    pub fetch: FetchConfig,

    /// Content extraction settings.
    pub extract: ExtractConfig,

    /// Summary selection settings.
    pub summary: SummaryConfig,

    /// Blocklist shared by extraction and summarization.
    pub noise: NoiseFilter,

    /// Maximum characters of content kept in the output record (default: 5000).
    pub content_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extract: ExtractConfig::default(),
            summary: SummaryConfig::default(),
            noise: NoiseFilter::default(),
            content_limit: 5000,
        }
    }
}

impl PipelineConfig {
    /// Creates a new builder for PipelineConfig.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }
}

/// Builder for PipelineConfig.
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: PipelineConfig::default() }
    }

    /// Sets the fetch timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the maximum number of redirects followed.
    pub fn max_redirects(mut self, value: usize) -> Self {
        self.config.fetch.max_redirects = value;
        self
    }

    /// Sets the User-Agent sent with requests.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Adds a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.fetch.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the content selector priority list.
    pub fn selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extract.selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the minimum extracted content length.
    pub fn min_content_length(mut self, value: usize) -> Self {
        self.config.extract.min_content_length = value;
        self
    }

    /// Sets the maximum number of summary sentences.
    pub fn max_sentences(mut self, value: usize) -> Self {
        self.config.summary.max_sentences = value;
        self
    }

    /// Sets the exclusive minimum sentence length.
    pub fn min_sentence_chars(mut self, value: usize) -> Self {
        self.config.summary.min_sentence_chars = value;
        self
    }

    /// Sets the noise blocklist.
    pub fn noise(mut self, noise: NoiseFilter) -> Self {
        self.config.noise = noise;
        self
    }

    /// Sets the output content limit in characters.
    pub fn content_limit(mut self, value: usize) -> Self {
        self.config.content_limit = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one run produced.
///
/// `document` holds the untruncated extracted text for persistence sinks;
/// `blog` is the record handed to callers.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub blog: ProcessedBlog,
    pub document: ExtractedDocument,
}

/// Stateless orchestrator over a page source and a shared dictionary.
///
/// A pipeline holds only read-only state, so one instance can serve any
/// number of concurrent runs.
pub struct Pipeline<F> {
    fetcher: F,
    config: PipelineConfig,
    dictionary: Arc<Dictionary>,
}

#[cfg(feature = "fetch")]
impl Pipeline<HttpFetcher> {
    /// Creates a pipeline that fetches over HTTP with `config.fetch`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PrecisError::ConfigError`] or
    /// [`crate::PrecisError::Http`] if the HTTP client cannot be built.
    pub fn new(config: PipelineConfig, dictionary: Arc<Dictionary>) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch.clone())?;
        Ok(Self::with_fetcher(fetcher, config, dictionary))
    }
}

impl<F> Pipeline<F> {
    /// Creates a pipeline around any page source.
    pub fn with_fetcher(fetcher: F, config: PipelineConfig, dictionary: Arc<Dictionary>) -> Self {
        Self { fetcher, config, dictionary }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs extraction, summarization, translation and metrics over
    /// already-fetched HTML.
    ///
    /// `url` is recorded as given and not validated.
    pub fn process_html(&self, url: &str, html: &str) -> Result<ProcessedBlog> {
        self.process_page(url, html).map(|output| output.blog)
    }

    /// Like [`Pipeline::process_html`] but also returns the full extracted document.
    pub fn process_page(&self, url: &str, html: &str) -> Result<PipelineOutput> {
        let document = extract(html, &self.config.extract, &self.config.noise)?;
        let summary = summarize(&document.content, &self.config.summary, &self.config.noise)?;
        let summary_text = summary.text();
        let translated_summary = translate(&summary_text, &self.dictionary);

        let word_count = metrics::word_count(&document.content);

        let blog = ProcessedBlog {
            url: url.to_string(),
            title: document.title.clone(),
            content: truncate_chars(&document.content, self.config.content_limit),
            summary: summary_text,
            translated_summary,
            word_count,
            read_time: metrics::read_time(word_count),
        };

        tracing::debug!(url, word_count, sentences = summary.len(), "processed page");

        Ok(PipelineOutput { blog, document })
    }
}

impl<F: Fetcher> Pipeline<F> {
    /// Validates `url`, fetches it, and processes the page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PrecisError::InvalidUrl`] without touching the
    /// network for malformed URLs, a fetch error when retrieval fails, and
    /// the extraction or summarization error when the page has too little
    /// content. Dropping the returned future aborts an in-flight fetch.
    pub async fn process(&self, url: &str) -> Result<ProcessedBlog> {
        self.run(url).await.map(|output| output.blog)
    }

    /// Like [`Pipeline::process`] but also returns the full extracted document.
    pub async fn run(&self, url: &str) -> Result<PipelineOutput> {
        let url = url.trim();
        let parsed = validate_url(url)?;

        tracing::debug!(%parsed, "fetching");
        let html = self.fetcher.fetch(&parsed).await?;

        self.process_page(url, &html)
    }
}

/// Convenience function: fetch and process `url` with default settings and
/// the built-in dictionary.
#[cfg(feature = "fetch")]
pub async fn process(url: &str) -> Result<ProcessedBlog> {
    Pipeline::new(PipelineConfig::default(), Arc::new(Dictionary::builtin()))?
        .process(url)
        .await
}

/// Convenience function: process already-fetched HTML with default settings
/// and the built-in dictionary.
pub fn process_html(url: &str, html: &str) -> Result<ProcessedBlog> {
    Pipeline::with_fetcher((), PipelineConfig::default(), Arc::new(Dictionary::builtin())).process_html(url, html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrecisError;

    const ARTICLE: &str = r#"
        <html>
        <head><title>Learning Rust</title></head>
        <body>
            <nav>Home | Archive | About</nav>
            <article>
                <p>Hello world, this is a new blog post about programming in Rust.</p>
                <p>Ownership rules let the compiler check memory safety at build time.</p>
                <p>Short one.</p>
                <p>Borrowing lets code read data without taking ownership of it.</p>
                <p>The fourth sentence would never make it into the summary.</p>
            </article>
            <footer>All rights reserved.</footer>
        </body>
        </html>
    "#;

    fn pipeline() -> Pipeline<()> {
        Pipeline::with_fetcher((), PipelineConfig::default(), Arc::new(Dictionary::builtin()))
    }

    #[test]
    fn test_process_html() {
        let blog = pipeline().process_html("https://example.com/rust", ARTICLE).unwrap();

        assert_eq!(blog.url, "https://example.com/rust");
        assert_eq!(blog.title, "Learning Rust");
        assert!(!blog.content.contains("Archive"));
        assert!(!blog.content.contains("All rights reserved"));
        assert_eq!(
            blog.summary,
            "Hello world, this is a new blog post about programming in Rust. \
             Ownership rules let the compiler check memory safety at build time. \
             Borrowing lets code read data without taking ownership of it."
        );
        assert!(blog.translated_summary.starts_with("سلام دنیا, این"));
        assert_eq!(blog.word_count, metrics::word_count(&blog.content));
        assert_eq!(blog.read_time, 1);
    }

    #[test]
    fn test_content_truncated_but_counted_in_full() {
        let config = PipelineConfig::builder().content_limit(20).build();
        let pipeline = Pipeline::with_fetcher((), config, Arc::new(Dictionary::builtin()));
        let output = pipeline.process_page("https://example.com/rust", ARTICLE).unwrap();

        assert_eq!(output.blog.content.chars().count(), 20);
        assert_eq!(output.blog.word_count, metrics::word_count(&output.document.content));
        assert!(output.document.content.len() > 20);
    }

    #[test]
    fn test_insufficient_content() {
        let result = pipeline().process_html("https://example.com", "<body><p>Nothing much.</p></body>");
        assert!(matches!(result, Err(PrecisError::InsufficientContent { .. })));
    }

    #[test]
    fn test_no_summary() {
        let html = format!("<body><article>{}</article></body>", "Tiny bit. ".repeat(20));
        let result = pipeline().process_html("https://example.com", &html);
        assert!(matches!(result, Err(PrecisError::NoSummary)));
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::builder()
            .timeout(3)
            .max_redirects(1)
            .user_agent("precis-test")
            .header("X-Test", "1")
            .selectors(["main"])
            .min_content_length(10)
            .max_sentences(1)
            .min_sentence_chars(5)
            .noise(NoiseFilter::empty())
            .content_limit(42)
            .build();

        assert_eq!(config.fetch.timeout, 3);
        assert_eq!(config.fetch.max_redirects, 1);
        assert_eq!(config.fetch.user_agent, "precis-test");
        assert!(config.fetch.headers.contains(&("X-Test".to_string(), "1".to_string())));
        assert_eq!(config.extract.selectors, vec!["main".to_string()]);
        assert_eq!(config.extract.min_content_length, 10);
        assert_eq!(config.summary.max_sentences, 1);
        assert_eq!(config.summary.min_sentence_chars, 5);
        assert!(config.noise.phrases().is_empty());
        assert_eq!(config.content_limit, 42);
    }

    #[test]
    fn test_convenience_process_html() {
        let blog = process_html("https://example.com/rust", ARTICLE).unwrap();
        assert_eq!(blog.title, "Learning Rust");
    }
}
