//! Extractive summary selection.
//!
//! The summary is the lead of the article: content is split into sentences,
//! repeated sentences are dropped, short fragments and boilerplate are
//! filtered out, and the first few survivors are kept in their original order.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::noise::NoiseFilter;
use crate::{PrecisError, Result};

/// A run of non-terminal characters followed by its terminal punctuation, if any.
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?\n]+[.!?]*").unwrap());

/// Configuration for summary selection
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Maximum number of sentences kept
    pub max_sentences: usize,
    /// Sentences must be strictly longer than this many characters
    pub min_sentence_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { max_sentences: 3, min_sentence_chars: 30 }
    }
}

/// Ordered sentences selected from the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Summary {
    sentences: Vec<String>,
}

impl Summary {
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// The sentences joined with single spaces.
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Splits `content` into trimmed, non-empty sentence candidates.
///
/// Terminal punctuation stays attached to its sentence; newlines also end a
/// sentence.
pub fn split_sentences(content: &str) -> Vec<String> {
    SENTENCE
        .find_iter(content)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Selects the extractive summary of `content`.
///
/// # Errors
///
/// Returns [`PrecisError::NoSummary`] when no sentence survives filtering.
pub fn summarize(content: &str, config: &SummaryConfig, noise: &NoiseFilter) -> Result<Summary> {
    let mut seen = HashSet::new();

    let sentences: Vec<String> = split_sentences(content)
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .filter(|s| s.chars().count() > config.min_sentence_chars && !noise.is_noise(s))
        .take(config.max_sentences)
        .collect();

    tracing::debug!(sentences = sentences.len(), "selected summary");

    if sentences.is_empty() {
        return Err(PrecisError::NoSummary);
    }

    Ok(Summary { sentences })
}
