//! Word-for-word dictionary substitution.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::dictionary::Dictionary;

/// Maximal runs of Unicode word characters.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Replaces every word of `text` found in `dictionary`.
///
/// Lookup uses the lowercased word; the replacement is inserted exactly as
/// stored. Unknown words and everything between words pass through
/// untouched, so the result is a partial, word-granular substitution.
///
/// # Example
///
/// ```rust
/// use precis_core::{Dictionary, translate};
///
/// let dict = Dictionary::new([("hello", "سلام"), ("world", "دنیا")]);
/// assert_eq!(translate("Hello, world!", &dict), "سلام, دنیا!");
/// ```
pub fn translate(text: &str, dictionary: &Dictionary) -> String {
    if dictionary.is_empty() {
        return text.to_string();
    }

    WORD.replace_all(text, |caps: &Captures<'_>| {
        let word = &caps[0];
        match dictionary.get(&word.to_lowercase()) {
            Some(replacement) => replacement.to_string(),
            None => word.to_string(),
        }
    })
    .into_owned()
}
