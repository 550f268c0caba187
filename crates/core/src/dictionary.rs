//! Word substitution tables for lexical translation.
//!
//! A [`Dictionary`] is loaded once and then only read. Keys are stored
//! lowercased; values keep the casing they were given.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{PrecisError, Result};

/// File name looked up under the user config directory.
pub const DICTIONARY_FILE: &str = "dictionary.json";

/// English to Persian word table shipped with the library.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("hello", "سلام"),
    ("world", "دنیا"),
    ("is", "است"),
    ("and", "و"),
    ("or", "یا"),
    ("in", "در"),
    ("to", "به"),
    ("from", "از"),
    ("with", "با"),
    ("for", "برای"),
    ("this", "این"),
    ("that", "آن"),
    ("we", "ما"),
    ("you", "شما"),
    ("they", "آنها"),
    ("i", "من"),
    ("blog", "وبلاگ"),
    ("article", "مقاله"),
    ("post", "پست"),
    ("page", "صفحه"),
    ("website", "وب\u{200c}سایت"),
    ("web", "وب"),
    ("internet", "اینترنت"),
    ("computer", "کامپیوتر"),
    ("software", "نرم\u{200c}افزار"),
    ("code", "کد"),
    ("program", "برنامه"),
    ("programming", "برنامه\u{200c}نویسی"),
    ("language", "زبان"),
    ("data", "داده"),
    ("time", "زمان"),
    ("day", "روز"),
    ("year", "سال"),
    ("people", "مردم"),
    ("book", "کتاب"),
    ("news", "اخبار"),
    ("life", "زندگی"),
    ("work", "کار"),
    ("school", "مدرسه"),
    ("student", "دانشجو"),
    ("home", "خانه"),
    ("city", "شهر"),
    ("country", "کشور"),
    ("water", "آب"),
    ("food", "غذا"),
    ("friend", "دوست"),
    ("family", "خانواده"),
    ("love", "عشق"),
    ("health", "سلامت"),
    ("money", "پول"),
    ("market", "بازار"),
    ("business", "کسب\u{200c}وکار"),
    ("technology", "فناوری"),
    ("science", "علم"),
    ("research", "پژوهش"),
    ("system", "سیستم"),
    ("security", "امنیت"),
    ("network", "شبکه"),
    ("user", "کاربر"),
    ("new", "جدید"),
    ("good", "خوب"),
    ("bad", "بد"),
    ("big", "بزرگ"),
    ("small", "کوچک"),
    ("important", "مهم"),
    ("first", "اول"),
    ("last", "آخر"),
    ("best", "بهترین"),
    ("more", "بیشتر"),
    ("all", "همه"),
    ("yes", "بله"),
    ("no", "نه"),
    ("today", "امروز"),
    ("read", "خواندن"),
    ("write", "نوشتن"),
    ("learn", "یادگیری"),
    ("help", "کمک"),
    ("question", "سوال"),
    ("answer", "پاسخ"),
    ("problem", "مشکل"),
    ("example", "مثال"),
    ("summary", "خلاصه"),
    ("translation", "ترجمه"),
    ("thanks", "متشکرم"),
    ("please", "لطفا"),
];

/// Immutable lowercase-word to replacement table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Builds a dictionary, lowercasing every key. Later duplicates win.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();
        Self { entries }
    }

    /// The English to Persian table shipped with the library.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ENTRIES.iter().copied())
    }

    /// Parses a JSON object of `"word": "replacement"` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| PrecisError::ConfigError(format!("dictionary: {}", e)))?;
        Ok(Self::new(entries))
    }

    /// Reads a JSON dictionary file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads `<config_dir>/precis/dictionary.json` when it exists, otherwise
    /// the built-in table.
    pub fn load_default() -> Result<Self> {
        match user_dictionary_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading user dictionary");
                Self::from_file(path)
            }
            _ => Ok(Self::builtin()),
        }
    }

    /// Looks up an already-lowercased word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn contains_key(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over replacement values.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

/// Location of the per-user dictionary override.
pub fn user_dictionary_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("precis").join(DICTIONARY_FILE))
}
