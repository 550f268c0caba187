//! The processed output record and its renderings.
//!
//! This module defines [`ProcessedBlog`], the complete result of one
//! processing run: extracted text, the extractive summary, its lexical
//! translation, and reading metrics.

use std::str::FromStr;

use serde::Serialize;

use crate::{PrecisError, Result};

/// Output format options for a processed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON object with camelCase keys.
    Json,
    /// Titled plain-text report.
    PlainText,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::PlainText),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// The complete, immutable result of processing one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedBlog {
    /// Source URL as given by the caller.
    pub url: String,

    /// Page title, at most 200 characters.
    pub title: String,

    /// Extracted plain text, truncated to the configured content limit.
    pub content: String,

    /// Extractive summary, sentences joined by single spaces.
    pub summary: String,

    /// Summary after dictionary substitution.
    pub translated_summary: String,

    /// Whitespace-delimited tokens in the full extracted content.
    pub word_count: usize,

    /// Estimated reading time in whole minutes.
    pub read_time: usize,
}

impl ProcessedBlog {
    /// Converts the record to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.to_json_string(true),
            OutputFormat::PlainText => Ok(self.to_text()),
        }
    }

    /// Gets the record as a `serde_json::Value`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| PrecisError::SerializeError(e.to_string()))
    }

    fn to_json_string(&self, pretty: bool) -> Result<String> {
        let rendered = if pretty { serde_json::to_string_pretty(self) } else { serde_json::to_string(self) };
        rendered.map_err(|e| PrecisError::SerializeError(e.to_string()))
    }

    /// Renders a plain-text report with a header, the summary and its translation.
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.title);
        output.push('\n');
        output.push_str(&"=".repeat(self.title.chars().count()));
        output.push('\n');

        let minutes = if self.read_time == 1 { "minute" } else { "minutes" };
        output.push_str(&format!(
            "Source: {} | Words: {} | Read time: {} {}\n\n",
            self.url, self.word_count, self.read_time, minutes
        ));

        output.push_str("Summary\n-------\n");
        output.push_str(&self.summary);
        output.push_str("\n\nTranslation\n-----------\n");
        output.push_str(&self.translated_summary);
        output.push('\n');

        output
    }
}

/// Truncates `text` to at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
