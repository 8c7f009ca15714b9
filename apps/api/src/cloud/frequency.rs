//! Frequency Aggregator — turns raw captions into a ranked, truncated word list.
//!
//! Pure function, no I/O. Ranking is count-descending with ties kept in the order
//! each word was first seen in the concatenated caption text.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Maximum number of ranked words handed to the layout engine.
pub const TOP_N: usize = 300;

/// Tokens shorter than this (in characters, after normalization) are discarded.
pub const MIN_WORD_LEN: usize = 3;

/// Common function words excluded from counting.
#[rustfmt::skip]
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "to", "of", "in", "on", "for", "with",
    "is", "are", "was", "were", "be", "been", "being",
    "it", "this", "that", "these", "those",
    "i", "you", "we", "they", "he", "she", "them",
    "my", "your", "our", "their",
];

/// A normalized word and how many times it occurred across all captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Tunables for aggregation. `Default` gives the stock stopword list and a top-300 cap.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub top_n: usize,
    pub min_word_len: usize,
    pub stopwords: HashSet<String>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_n: TOP_N,
            min_word_len: MIN_WORD_LEN,
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl AggregateOptions {
    /// Default options plus caller-supplied stopwords (lowercased, blanks ignored).
    pub fn with_extra_stopwords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        options.stopwords.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        options
    }
}

/// Token separator: Unicode whitespace plus the zero-width no-break space (U+FEFF),
/// minus NEL (U+0085), which browsers do not treat as a word break.
pub fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Lowercases and strips everything that is not an ASCII word character or separator.
pub fn normalize_word(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || is_separator(c))
        .collect::<String>()
        .trim_matches(is_separator)
        .to_string()
}

/// Builds the ranked word list with the default options.
#[cfg(test)]
pub fn build_word_counts<S: AsRef<str>>(captions: &[S]) -> Vec<WordCount> {
    build_word_counts_with(captions, &AggregateOptions::default())
}

/// Builds the ranked word list.
///
/// Steps:
/// 1. Join captions with a single space (order matters for tie-breaks only)
/// 2. Split on separator runs and normalize each token
/// 3. Drop empty, short, and stopword tokens
/// 4. Count in first-seen order, stable-sort by count descending, truncate to `top_n`
pub fn build_word_counts_with<S: AsRef<str>>(
    captions: &[S],
    options: &AggregateOptions,
) -> Vec<WordCount> {
    let all_text = captions
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");

    let mut ranked: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in all_text.split(is_separator).map(normalize_word) {
        if token.is_empty()
            || token.chars().count() < options.min_word_len
            || options.stopwords.contains(&token)
        {
            continue;
        }
        match index.get(&token) {
            Some(&slot) => ranked[slot].count += 1,
            None => {
                index.insert(token.clone(), ranked.len());
                ranked.push(WordCount {
                    word: token,
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable: equal counts keep first-seen order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(options.top_n);
    ranked
}
