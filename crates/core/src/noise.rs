//! Boilerplate phrase blocklist shared by extraction and summarization.

use std::fs;
use std::path::Path;

use crate::{PrecisError, Result};

/// Phrases that mark a line or sentence as page chrome rather than article text.
const DEFAULT_PHRASES: &[&str] = &[
    "enable javascript",
    "javascript is disabled",
    "javascript is required",
    "please enable cookies",
    "we use cookies",
    "accept cookies",
    "cookie policy",
    "subscribe to our newsletter",
    "sign up for our newsletter",
    "all rights reserved",
    "skip to content",
    "skip to main content",
    "loading...",
    "advertisement",
    "share this article",
    "share on facebook",
    "share on twitter",
    "click here to",
    "read more",
    "privacy policy",
    "terms of service",
];

/// Case-insensitive substring blocklist.
///
/// Phrases are stored lowercased; matching lowercases the candidate once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseFilter {
    phrases: Vec<String>,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASES.iter().copied())
    }
}

impl NoiseFilter {
    /// Builds a filter from arbitrary phrases. Empty phrases are dropped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// A filter that matches nothing.
    pub fn empty() -> Self {
        Self { phrases: Vec::new() }
    }

    /// Loads phrases from a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let phrases: Vec<String> =
            serde_json::from_str(json).map_err(|e| PrecisError::ConfigError(format!("noise blocklist: {}", e)))?;
        Ok(Self::new(phrases))
    }

    /// Loads phrases from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Returns a copy with extra phrases appended.
    pub fn extended<I, S>(&self, more: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases = self.phrases.clone();
        phrases.extend(Self::new(more).phrases);
        Self { phrases }
    }

    /// True when `text` contains any blocklisted phrase, ignoring case.
    pub fn is_noise(&self, text: &str) -> bool {
        if self.phrases.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        self.phrases.iter().any(|p| lower.contains(p.as_str()))
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Length in characters of the longest phrase.
    pub fn max_phrase_chars(&self) -> usize {
        self.phrases.iter().map(|p| p.chars().count()).max().unwrap_or(0)
    }
}
