pub mod blog;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod metrics;
pub mod noise;
pub mod parse;
pub mod pipeline;
pub mod preprocess;
pub mod summarize;
pub mod translate;

pub use blog::{OutputFormat, ProcessedBlog};
pub use dictionary::Dictionary;
pub use error::{ErrorKind, ErrorResponse, PrecisError, Result};
pub use extract::{DEFAULT_CONTENT_SELECTORS, ExtractConfig, ExtractedDocument, extract, normalize_text};
pub use fetch::{FetchConfig, Fetcher, fetch_file, fetch_stdin, validate_url};
#[cfg(feature = "fetch")]
pub use fetch::{HttpFetcher, fetch_url};
pub use metrics::{read_time, word_count};
pub use noise::NoiseFilter;
pub use parse::Document;
#[cfg(feature = "fetch")]
pub use pipeline::process;
pub use pipeline::{Pipeline, PipelineConfig, PipelineConfigBuilder, PipelineOutput, process_html};
#[doc(hidden)]
pub use preprocess::PreprocessConfig;
pub use preprocess::preprocess_html;
pub use summarize::{Summary, SummaryConfig, summarize};
pub use translate::translate;
