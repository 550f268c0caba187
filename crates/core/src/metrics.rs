//! Word count and reading time.

/// Assumed average reading speed in words per minute.
pub const WORDS_PER_MINUTE: usize = 200;

/// Counts whitespace-delimited tokens.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Minutes needed to read `word_count` words, rounded up.
pub fn read_time(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}
