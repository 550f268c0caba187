//! Content fetching from URLs, files, and stdin.
//!
//! Network access goes through the [`Fetcher`] trait so the pipeline can be
//! driven by any page source. [`HttpFetcher`] is the reqwest-backed
//! implementation with a bounded timeout and redirect count.

use std::fs;
use std::future::Future;
use std::path::PathBuf;

use url::Url;

use crate::{PrecisError, Result};

/// Source of raw page HTML.
///
/// Implementations must be shareable across tasks; the returned future must
/// be `Send` so a single pipeline can serve concurrent requests.
pub trait Fetcher: Send + Sync {
    /// Retrieves the HTML body of `url`.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;
}

/// Parses `url` and checks that it is an absolute http(s) URL with a host.
///
/// # Errors
///
/// Returns [`PrecisError::InvalidUrl`] otherwise.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| PrecisError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PrecisError::InvalidUrl(format!(
            "{}: URL must use http:// or https://",
            url
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(PrecisError::InvalidUrl(format!("{}: URL has no host", url)));
    }

    Ok(parsed)
}

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Maximum number of redirects followed.
    pub max_redirects: usize,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 15,
            max_redirects: 5,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36".to_string(),
            headers: vec![
                (
                    "Accept".to_string(),
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
                ),
                ("Accept-Language".to_string(), "en-US,en;q=0.9".to_string()),
            ],
        }
    }
}

#[cfg(feature = "fetch")]
pub use http::{HttpFetcher, fetch_url};

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::{Client, StatusCode, redirect};
    use url::Url;

    use super::{FetchConfig, Fetcher, validate_url};
    use crate::{PrecisError, Result};

    /// reqwest-backed [`Fetcher`].
    ///
    /// The underlying client is built once and reused for every request.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
        config: FetchConfig,
    }

    impl HttpFetcher {
        /// Builds a client honoring the timeout, redirect limit and headers of `config`.
        ///
        /// # Errors
        ///
        /// Returns [`PrecisError::ConfigError`] for invalid header names or values.
        pub fn new(config: FetchConfig) -> Result<Self> {
            let mut headers = HeaderMap::new();
            for (name, value) in &config.headers {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| PrecisError::ConfigError(format!("header name '{}': {}", name, e)))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|e| PrecisError::ConfigError(format!("header value for '{}': {}", name, e)))?;
                headers.insert(name, value);
            }

            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .redirect(redirect::Policy::limited(config.max_redirects))
                .user_agent(config.user_agent.as_str())
                .default_headers(headers)
                .build()?;

            Ok(Self { client, config })
        }

        fn classify(&self, err: reqwest::Error, url: &Url) -> PrecisError {
            let classified = if err.is_timeout() {
                PrecisError::Timeout { timeout: self.config.timeout }
            } else if err.is_redirect() {
                PrecisError::TooManyRedirects { limit: self.config.max_redirects }
            } else if err.is_connect() {
                PrecisError::Unreachable { host: url.host_str().unwrap_or_default().to_string() }
            } else {
                PrecisError::Http(err)
            };
            tracing::warn!(%url, error = %classified, "fetch failed");
            classified
        }
    }

    impl Fetcher for HttpFetcher {
        async fn fetch(&self, url: &Url) -> Result<String> {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| self.classify(e, url))?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(%url, status = status.as_u16(), "non-success response");
                return Err(match status {
                    StatusCode::FORBIDDEN => PrecisError::Blocked,
                    StatusCode::NOT_FOUND => PrecisError::NotFound,
                    other => PrecisError::HttpStatus { status: other.as_u16() },
                });
            }

            let body = response.text().await.map_err(|e| self.classify(e, url))?;
            tracing::debug!(%url, bytes = body.len(), "fetched page");
            Ok(body)
        }
    }

    /// Fetches HTML content from a URL with a one-off client.
    ///
    /// The URL is validated before any network access.
    pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
        let parsed = validate_url(url)?;
        HttpFetcher::new(config.clone())?.fetch(&parsed).await
    }
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(PrecisError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path_buf.display()),
        )))
    } else {
        fs::read_to_string(&path_buf).map_err(PrecisError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(PrecisError::from)?;

    Ok(buffer)
}
